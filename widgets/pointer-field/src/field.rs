//! Dot grid math: which cells are near the pointer and how bright they are.
//!
//! Cells are implicit. Cell `(col, row)` has its center at
//! `(col * spacing + spacing / 2, row * spacing + spacing / 2)`; nothing is
//! stored between frames.

use std::ops::RangeInclusive;

use folio_engine::{ConfigError, Rgba, Viewport};
use glam::Vec2;
use serde::Deserialize;

/// Pointer position before the first move. Far enough off-screen that no cell
/// center is within the default radius.
pub const OFFSCREEN: Vec2 = Vec2::new(-1000.0, -1000.0);

/// Smallest accepted grid spacing, in pixels.
pub const MIN_SPACING: f32 = 1.0;
/// Largest accepted `radius / spacing`: bounds the scanned window to
/// roughly 257 x 257 cells per frame.
pub const MAX_RADIUS_CELLS: f32 = 128.0;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Distance between neighboring cell centers, in pixels.
    pub spacing: f32,
    /// Influence radius: cells at or beyond this distance are not drawn.
    pub radius: f32,
    /// Opacity of a dot directly under the pointer.
    pub max_opacity: f32,
    pub dot_radius: f32,
    pub color: Rgba,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            spacing: 24.0,
            radius: 340.0,
            max_opacity: 0.2,
            dot_radius: 1.0,
            color: Rgba::VIOLET,
        }
    }
}

impl FieldConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_at_least("spacing", self.spacing, MIN_SPACING)?;
        ConfigError::check_positive("radius", self.radius)?;
        ConfigError::check_at_most("radius / spacing", self.radius / self.spacing, MAX_RADIUS_CELLS)?;
        ConfigError::check_positive("max_opacity", self.max_opacity)?;
        ConfigError::check_positive("dot_radius", self.dot_radius)?;
        ConfigError::check_range("max_opacity", self.max_opacity, 1.0)
    }

    pub fn cell_center(&self, col: i64, row: i64) -> Vec2 {
        let half = self.spacing * 0.5;
        Vec2::new(
            col as f32 * self.spacing + half,
            row as f32 * self.spacing + half,
        )
    }

    /// Opacity at `distance` from the pointer: `max_opacity` at 0, falling
    /// linearly to 0 at `radius`, never negative.
    pub fn falloff(&self, distance: f32) -> f32 {
        ((1.0 - distance / self.radius) * self.max_opacity).max(0.0)
    }

    /// Column (or row) indices whose centers could lie within `radius` of
    /// `pointer` along one axis, intersected with the cells whose centers
    /// fit inside `[0, extent]`. `None` when the intersection is empty.
    pub fn axis_range(&self, pointer: f32, extent: f32) -> Option<RangeInclusive<i64>> {
        let half = self.spacing * 0.5;
        if !pointer.is_finite() || !(extent >= half) {
            return None;
        }
        let lo = ((pointer - self.radius) / self.spacing).floor().max(0.0);
        let reach = ((pointer + self.radius) / self.spacing).ceil();
        let last_visible = ((extent - half) / self.spacing).floor();
        let hi = reach.min(last_visible);
        if hi < lo {
            return None;
        }
        Some(lo as i64..=hi as i64)
    }

    /// Every dot to draw this frame, row by row.
    pub fn dots(&self, pointer: Vec2, viewport: Viewport) -> impl Iterator<Item = Dot> {
        let cfg = *self;
        let cols = cfg.axis_range(pointer.x, viewport.width);
        let rows = cfg.axis_range(pointer.y, viewport.height);
        let cells = match (cols, rows) {
            (Some(cols), Some(rows)) => Some((cols, rows)),
            _ => None,
        };
        cells
            .into_iter()
            .flat_map(|(cols, rows)| rows.flat_map(move |row| cols.clone().map(move |col| (col, row))))
            .filter_map(move |(col, row)| {
                let center = cfg.cell_center(col, row);
                let distance = center.distance(pointer);
                (distance < cfg.radius).then(|| Dot {
                    center,
                    opacity: cfg.falloff(distance),
                })
            })
    }
}

/// One visible grid dot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dot {
    pub center: Vec2,
    pub opacity: f32,
}
