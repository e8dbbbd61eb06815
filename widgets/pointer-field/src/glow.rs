//! Soft cursor glow drawn beneath the dot grid.

use folio_engine::{ConfigError, DrawList, Rgba};
use glam::Vec2;
use serde::Deserialize;

pub const MAX_LAYERS: u32 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct GlowConfig {
    pub enabled: bool,
    /// Radius of the outermost disc.
    pub radius: f32,
    /// Number of stacked discs. More layers give a smoother falloff.
    pub layers: u32,
    /// Alpha of each disc; overlapping discs brighten toward the center.
    pub layer_alpha: f32,
    pub color: Rgba,
}

impl Default for GlowConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            radius: 300.0,
            layers: 6,
            layer_alpha: 0.02,
            color: Rgba::VIOLET,
        }
    }
}

impl GlowConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_positive("glow.radius", self.radius)?;
        ConfigError::check_positive("glow.layer_alpha", self.layer_alpha)?;
        ConfigError::check_at_most("glow.layers", self.layers as f32, MAX_LAYERS as f32)?;
        ConfigError::check_range("glow.layer_alpha", self.layer_alpha, 1.0)
    }

    /// `(radius, alpha)` for each disc, outermost first.
    pub fn discs(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        let layers = self.layers.max(1);
        (0..layers).map(move |i| {
            let radius = self.radius * (layers - i) as f32 / layers as f32;
            (radius, self.layer_alpha)
        })
    }

    /// Record the glow around `center`.
    pub fn draw(&self, list: &mut DrawList, center: Vec2) {
        if !self.enabled {
            return;
        }
        for (radius, alpha) in self.discs() {
            list.fill_circle(center, radius, self.color.with_alpha(alpha));
        }
    }
}
