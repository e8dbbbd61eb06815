//! Orbit state and the sphere-to-screen projection.
//!
//! Angles are stored in degrees. Positions are relative to the sphere
//! center with +y pointing down the screen and +z toward the viewer.

use folio_engine::ConfigError;
use glam::{Vec2, Vec3};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SphereConfig {
    /// Sphere radius in pixels.
    pub radius: f32,
    pub pitch_min: f32,
    pub pitch_max: f32,
    /// Pitch at mount, clamped into `[pitch_min, pitch_max]`.
    pub initial_pitch: f32,
    /// Yaw added every idle frame, in degrees.
    pub auto_rotate_step: f32,
    /// Degrees of rotation per pixel of drag.
    pub drag_sensitivity: f32,
    /// Clamp for each axis of a single drag delta, in pixels. Unclamped when `None`.
    pub max_drag_delta: Option<f32>,
    pub min_scale: f32,
    pub max_scale: f32,
    pub min_opacity: f32,
    pub max_opacity: f32,
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            radius: 210.0,
            pitch_min: -60.0,
            pitch_max: 60.0,
            initial_pitch: -15.0,
            auto_rotate_step: 0.12,
            drag_sensitivity: 0.4,
            max_drag_delta: None,
            min_scale: 0.55,
            max_scale: 1.05,
            min_opacity: 0.3,
            max_opacity: 1.0,
        }
    }
}

impl SphereConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_positive("radius", self.radius)?;
        ConfigError::check_positive("drag_sensitivity", self.drag_sensitivity)?;
        if let Some(max) = self.max_drag_delta {
            ConfigError::check_positive("max_drag_delta", max)?;
        }
        if !self.auto_rotate_step.is_finite() {
            return Err(ConfigError::NotPositive {
                field: "auto_rotate_step",
                value: self.auto_rotate_step,
            });
        }
        ConfigError::check_range("pitch", self.pitch_min, self.pitch_max)?;
        ConfigError::check_range("scale", self.min_scale, self.max_scale)?;
        ConfigError::check_range("opacity", self.min_opacity, self.max_opacity)?;
        ConfigError::check_positive("min_scale", self.min_scale)
    }

    pub fn clamp_pitch(&self, pitch: f32) -> f32 {
        pitch.clamp(self.pitch_min, self.pitch_max)
    }

    /// Where `depth` sits across the sphere: 0 at the back, 1 at the front.
    pub fn depth_fraction(&self, depth: f32) -> f32 {
        ((depth + self.radius) / (2.0 * self.radius)).clamp(0.0, 1.0)
    }

    pub fn depth_scale(&self, depth: f32) -> f32 {
        let t = self.depth_fraction(depth);
        self.min_scale + t * (self.max_scale - self.min_scale)
    }

    pub fn depth_opacity(&self, depth: f32) -> f32 {
        let t = self.depth_fraction(depth);
        self.min_opacity + t * (self.max_opacity - self.min_opacity)
    }

    fn limit(&self, delta: Vec2) -> Vec2 {
        match self.max_drag_delta {
            Some(max) => delta.clamp(Vec2::splat(-max), Vec2::splat(max)),
            None => delta,
        }
    }
}

/// Current orientation of the sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitState {
    /// Spin about the vertical axis, kept in `[0, 360)`.
    pub yaw: f32,
    /// Tilt about the horizontal axis, always within the configured range.
    pub pitch: f32,
}

impl OrbitState {
    pub fn new(cfg: &SphereConfig) -> Self {
        Self {
            yaw: 0.0,
            pitch: cfg.clamp_pitch(cfg.initial_pitch),
        }
    }

    /// Idle auto-rotation step.
    pub fn advance(&mut self, step: f32) {
        self.add_yaw(step);
    }

    /// Apply a drag of `delta` pixels: x spins, y tilts (dragging up tilts
    /// the top away).
    pub fn apply_drag(&mut self, delta: Vec2, cfg: &SphereConfig) {
        let delta = cfg.limit(delta);
        self.add_yaw(delta.x * cfg.drag_sensitivity);
        self.pitch = cfg.clamp_pitch(self.pitch - delta.y * cfg.drag_sensitivity);
    }

    /// Re-establish the pitch bound after the range changed.
    pub fn clamp(&mut self, cfg: &SphereConfig) {
        self.pitch = cfg.clamp_pitch(self.pitch);
    }

    fn add_yaw(&mut self, degrees: f32) {
        let yaw = (self.yaw + degrees).rem_euclid(360.0);
        // rem_euclid can round up to exactly 360 for tiny negative inputs.
        self.yaw = if yaw >= 360.0 { 0.0 } else { yaw };
    }

    /// Project a point at (`lat`, `lon`) degrees on a sphere of `radius`.
    ///
    /// The returned `z` is the depth: larger is nearer the viewer.
    pub fn project(&self, lat: f32, lon: f32, radius: f32) -> Vec3 {
        let la = lat.to_radians();
        let lo = (lon + self.yaw).to_radians();
        let p = self.pitch.to_radians();

        let x = radius * la.cos() * lo.sin();
        let y = -radius * la.sin();
        let z = radius * la.cos() * lo.cos();

        Vec3::new(x, y * p.cos() - z * p.sin(), y * p.sin() + z * p.cos())
    }
}
