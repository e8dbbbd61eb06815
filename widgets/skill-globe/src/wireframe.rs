//! Latitude/longitude guide curves.

use glam::Vec3;

use crate::sphere::OrbitState;

/// Meridians are drawn in pairs: each longitude here and the one 90 degrees on.
const MERIDIAN_LONGITUDES: [f32; 6] = [0.0, 30.0, 60.0, 90.0, 120.0, 150.0];
const PARALLEL_LATITUDES: [f32; 5] = [-60.0, -30.0, 0.0, 30.0, 60.0];
const SAMPLE_STEP: usize = 5;

/// Pole to pole at fixed longitude.
fn meridian(orbit: &OrbitState, lon: f32, radius: f32) -> Vec<Vec3> {
    (-90..=90)
        .step_by(SAMPLE_STEP)
        .map(|lat| orbit.project(lat as f32, lon, radius))
        .collect()
}

/// A closed ring at fixed latitude; the last sample repeats the first.
fn parallel(orbit: &OrbitState, lat: f32, radius: f32) -> Vec<Vec3> {
    (0..=360)
        .step_by(SAMPLE_STEP)
        .map(|lon| orbit.project(lat, lon as f32, radius))
        .collect()
}

/// Every guide curve in paint order, projected for `orbit`.
pub fn curves(orbit: &OrbitState, radius: f32) -> Vec<Vec<Vec3>> {
    let mut curves = Vec::with_capacity(MERIDIAN_LONGITUDES.len() * 2 + PARALLEL_LATITUDES.len());
    for lon in MERIDIAN_LONGITUDES {
        curves.push(meridian(orbit, lon, radius));
        curves.push(meridian(orbit, lon + 90.0, radius));
    }
    for lat in PARALLEL_LATITUDES {
        curves.push(parallel(orbit, lat, radius));
    }
    curves
}
