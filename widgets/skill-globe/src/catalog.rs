//! The labels placed on the globe.

use std::rc::Rc;

use folio_engine::{ConfigError, Rgba};
use serde::Deserialize;

/// A fixed point on the sphere, in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPoint {
    pub name: Rc<str>,
    pub color: Rgba,
    pub lat: f32,
    pub lon: f32,
}

impl LabelPoint {
    pub fn new(name: &str, color: Rgba, lat: f32, lon: f32) -> Self {
        Self {
            name: Rc::from(name),
            color,
            lat,
            lon,
        }
    }
}

/// Catalog entry as it appears in a JSON override.
#[derive(Debug, Clone, Deserialize)]
pub struct LabelSpec {
    pub name: String,
    pub color: Rgba,
    pub lat: f32,
    pub lon: f32,
}

impl From<LabelSpec> for LabelPoint {
    fn from(spec: LabelSpec) -> Self {
        LabelPoint::new(&spec.name, spec.color, spec.lat, spec.lon)
    }
}

const DEFAULT_LABELS: [(&str, [u8; 3], f32, f32); 15] = [
    ("TypeScript", [0x31, 0x78, 0xC6], 20.0, 0.0),
    ("React", [0x61, 0xDA, 0xFB], 20.0, 72.0),
    ("Next.js", [0xFF, 0xFF, 0xFF], 20.0, 144.0),
    ("Node.js", [0x33, 0x99, 0x33], 20.0, 216.0),
    ("Python", [0x37, 0x76, 0xAB], 20.0, 288.0),
    ("Tailwind", [0x06, 0xB6, 0xD4], -20.0, 36.0),
    ("PostgreSQL", [0x41, 0x69, 0xE1], -20.0, 108.0),
    ("Docker", [0x24, 0x96, 0xED], -20.0, 180.0),
    ("Git", [0xF0, 0x50, 0x32], -20.0, 252.0),
    ("C++", [0x00, 0x59, 0x9C], -20.0, 324.0),
    ("MongoDB", [0x47, 0xA2, 0x48], 55.0, 60.0),
    ("Spring", [0x6D, 0xB3, 0x3F], 55.0, 180.0),
    ("Figma", [0xF2, 0x4E, 0x1E], 55.0, 300.0),
    ("Expo", [0xAA, 0xAA, 0xAA], -55.0, 120.0),
    ("Vercel", [0xFF, 0xFF, 0xFF], -55.0, 240.0),
];

/// Two rings of five around the equator band, three near each pole region.
pub fn default_catalog() -> Vec<LabelPoint> {
    DEFAULT_LABELS
        .iter()
        .map(|&(name, [r, g, b], lat, lon)| LabelPoint::new(name, Rgba::rgb8(r, g, b), lat, lon))
        .collect()
}

/// Convert a JSON catalog, rejecting an empty one.
pub fn from_specs(specs: Vec<LabelSpec>) -> Result<Vec<LabelPoint>, ConfigError> {
    if specs.is_empty() {
        return Err(ConfigError::EmptyCatalog);
    }
    Ok(specs.into_iter().map(LabelPoint::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_fifteen_distinct_labels() {
        let labels = default_catalog();
        assert_eq!(labels.len(), 15);
        let mut names: Vec<&str> = labels.iter().map(|l| &*l.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 15);
        assert!(labels.iter().all(|l| (-90.0..=90.0).contains(&l.lat)));
    }

    #[test]
    fn default_colors_match_hex() {
        let labels = default_catalog();
        assert_eq!(labels[0].color, Rgba::from_hex("#3178C6").unwrap());
        assert_eq!(labels[2].color, Rgba::from_hex("#fff").unwrap());
        assert_eq!(labels[13].color, Rgba::from_hex("#aaa").unwrap());
    }

    #[test]
    fn specs_parse_from_json() {
        let specs: Vec<LabelSpec> =
            serde_json::from_str(r##"[{"name": "Rust", "color": "#dea584", "lat": 10, "lon": 45}]"##)
                .unwrap();
        let labels = from_specs(specs).unwrap();
        assert_eq!(&*labels[0].name, "Rust");
        assert_eq!(labels[0].color, Rgba::rgb8(0xde, 0xa5, 0x84));
        assert_eq!(labels[0].lon, 45.0);
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert!(matches!(from_specs(Vec::new()), Err(ConfigError::EmptyCatalog)));
    }
}
