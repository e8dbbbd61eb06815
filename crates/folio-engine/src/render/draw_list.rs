//! Retained per-frame drawing description.
//!
//! Widgets record commands in paint order; surfaces replay them. Later
//! commands draw over earlier ones.

use std::rc::Rc;

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::render::color::Rgba;

/// Per-marker data for host-side label rendering.
/// 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct MarkerInstance {
    /// Anchor X (marker center) in surface pixels.
    pub x: f32,
    /// Anchor Y (marker center) in surface pixels.
    pub y: f32,
    /// Uniform scale of the marker.
    pub scale: f32,
    /// Opacity (0.0 - 1.0).
    pub opacity: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// Index of the label in the widget's catalog.
    pub label_index: f32,
}

impl MarkerInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// A text label anchored at a point.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub label: Rc<str>,
    pub instance: MarkerInstance,
}

impl Marker {
    pub fn color(&self) -> Rgba {
        Rgba::rgb(self.instance.r, self.instance.g, self.instance.b)
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.instance.x, self.instance.y)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Erase the whole surface.
    Clear,
    FillCircle { center: Vec2, radius: f32, color: Rgba },
    StrokeCircle { center: Vec2, radius: f32, width: f32, color: Rgba },
    /// Open path through `points`.
    StrokePolyline { points: Vec<Vec2>, width: f32, color: Rgba },
    Marker(Marker),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(1024),
        }
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn clear_surface(&mut self) {
        self.push(DrawCommand::Clear);
    }

    /// Skips degenerate circles (non-positive radius or fully transparent).
    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        if radius <= 0.0 || color.a <= 0.0 {
            return;
        }
        self.push(DrawCommand::FillCircle { center, radius, color });
    }

    pub fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Rgba) {
        if radius <= 0.0 || width <= 0.0 {
            return;
        }
        self.push(DrawCommand::StrokeCircle { center, radius, width, color });
    }

    pub fn stroke_polyline(&mut self, points: Vec<Vec2>, width: f32, color: Rgba) {
        if points.len() < 2 || width <= 0.0 {
            return;
        }
        self.push(DrawCommand::StrokePolyline { points, width, color });
    }

    pub fn marker(&mut self, marker: Marker) {
        self.push(DrawCommand::Marker(marker));
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Markers in paint order.
    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Marker(m) => Some(m),
            _ => None,
        })
    }

    /// Filled circles in paint order, as (center, radius, color).
    pub fn filled_circles(&self) -> impl Iterator<Item = (Vec2, f32, Rgba)> + '_ {
        self.commands.iter().filter_map(|c| match *c {
            DrawCommand::FillCircle { center, radius, color } => Some((center, radius, color)),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_instance_is_32_bytes() {
        assert_eq!(std::mem::size_of::<MarkerInstance>(), 32);
        assert_eq!(MarkerInstance::STRIDE_BYTES, 32);
    }

    #[test]
    fn degenerate_shapes_are_skipped() {
        let mut list = DrawList::new();
        list.fill_circle(Vec2::ZERO, 0.0, Rgba::WHITE);
        list.fill_circle(Vec2::ZERO, 1.0, Rgba::TRANSPARENT);
        list.stroke_circle(Vec2::ZERO, 5.0, 0.0, Rgba::WHITE);
        list.stroke_polyline(vec![Vec2::ZERO], 1.0, Rgba::WHITE);
        assert!(list.is_empty());
    }

    #[test]
    fn markers_keep_paint_order() {
        let mut list = DrawList::new();
        list.clear_surface();
        for (i, name) in ["back", "front"].iter().enumerate() {
            list.marker(Marker {
                label: Rc::from(*name),
                instance: MarkerInstance {
                    label_index: i as f32,
                    ..Default::default()
                },
            });
        }
        let names: Vec<&str> = list.markers().map(|m| &*m.label).collect();
        assert_eq!(names, ["back", "front"]);
        assert_eq!(list.len(), 3);
    }
}
