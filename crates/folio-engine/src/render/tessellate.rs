//! Lyon tessellation of a [`DrawList`] into flat GPU-ready buffers.
//!
//! Circles and polylines become a triangle list of [`VectorVertex`]; markers
//! are copied out as [`MarkerInstance`]s for the host to render as text.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use lyon::math::point;
use lyon::path::{Path, Winding};
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, FillVertexConstructor,
    StrokeOptions, StrokeTessellator, StrokeVertex, StrokeVertexConstructor, VertexBuffers,
};

use crate::render::color::Rgba;
use crate::render::draw_list::{DrawCommand, DrawList, MarkerInstance};

/// Per-vertex data for vector rendering.
/// 6 floats = 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct VectorVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorVertex {
    /// Number of floats per vertex.
    pub const FLOATS: usize = 6;
    /// Stride in bytes.
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4; // 24
}

struct VertexCtor {
    color: Rgba,
}

impl VertexCtor {
    fn vertex(&self, x: f32, y: f32) -> VectorVertex {
        VectorVertex {
            x,
            y,
            r: self.color.r,
            g: self.color.g,
            b: self.color.b,
            a: self.color.a,
        }
    }
}

impl FillVertexConstructor<VectorVertex> for VertexCtor {
    fn new_vertex(&mut self, vertex: FillVertex) -> VectorVertex {
        self.vertex(vertex.position().x, vertex.position().y)
    }
}

impl StrokeVertexConstructor<VectorVertex> for VertexCtor {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> VectorVertex {
        self.vertex(vertex.position().x, vertex.position().y)
    }
}

/// Tessellated output of one frame.
pub struct VectorBuffer {
    fill_tess: FillTessellator,
    stroke_tess: StrokeTessellator,
    geometry: VertexBuffers<VectorVertex, u32>,
    vertices: Vec<f32>,
    markers: Vec<MarkerInstance>,
    max_vertices: usize,
    max_markers: usize,
}

impl VectorBuffer {
    pub fn new(max_vertices: usize, max_markers: usize) -> Self {
        Self {
            fill_tess: FillTessellator::new(),
            stroke_tess: StrokeTessellator::new(),
            geometry: VertexBuffers::new(),
            vertices: Vec::with_capacity(max_vertices * VectorVertex::FLOATS),
            markers: Vec::with_capacity(max_markers),
            max_vertices,
            max_markers,
        }
    }

    /// Replace the buffer contents with the tessellation of `list`.
    ///
    /// Output past the configured capacities is dropped, whole triangles at a time.
    pub fn rebuild(&mut self, list: &DrawList) {
        self.clear();
        for command in list.commands() {
            match command {
                DrawCommand::Clear => self.clear(),
                DrawCommand::FillCircle { center, radius, color } => {
                    let path = circle_path(*center, *radius);
                    self.fill(&path, *color);
                }
                DrawCommand::StrokeCircle { center, radius, width, color } => {
                    let path = circle_path(*center, *radius);
                    self.stroke(&path, *width, *color);
                }
                DrawCommand::StrokePolyline { points, width, color } => {
                    if points.len() < 2 {
                        continue;
                    }
                    let mut builder = Path::builder();
                    builder.begin(point(points[0].x, points[0].y));
                    for p in &points[1..] {
                        builder.line_to(point(p.x, p.y));
                    }
                    builder.end(false);
                    self.stroke(&builder.build(), *width, *color);
                }
                DrawCommand::Marker(marker) => {
                    if self.markers.len() < self.max_markers {
                        self.markers.push(marker.instance);
                    }
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.markers.clear();
    }

    /// Number of vertices currently in the buffer.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / VectorVertex::FLOATS
    }

    /// Raw pointer to the flat float buffer (for shared-memory reads).
    pub fn vertices_ptr(&self) -> *const f32 {
        self.vertices.as_ptr()
    }

    pub fn vertices(&self) -> &[VectorVertex] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn markers_ptr(&self) -> *const f32 {
        self.markers.as_ptr() as *const f32
    }

    pub fn markers(&self) -> &[MarkerInstance] {
        &self.markers
    }

    fn fill(&mut self, path: &Path, color: Rgba) {
        let result = self.fill_tess.tessellate_path(
            path,
            &FillOptions::tolerance(0.5),
            &mut BuffersBuilder::new(&mut self.geometry, VertexCtor { color }),
        );
        if result.is_ok() {
            self.flush_geometry();
        }
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }

    fn stroke(&mut self, path: &Path, width: f32, color: Rgba) {
        let result = self.stroke_tess.tessellate_path(
            path,
            &StrokeOptions::tolerance(0.5).with_line_width(width),
            &mut BuffersBuilder::new(&mut self.geometry, VertexCtor { color }),
        );
        if result.is_ok() {
            self.flush_geometry();
        }
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }

    /// Flush indexed geometry to the flat buffer as a triangle list.
    fn flush_geometry(&mut self) {
        for tri in self.geometry.indices.chunks_exact(3) {
            if self.vertex_count() + 3 > self.max_vertices {
                return;
            }
            for idx in tri {
                let v = &self.geometry.vertices[*idx as usize];
                self.vertices.extend_from_slice(&[v.x, v.y, v.r, v.g, v.b, v.a]);
            }
        }
    }
}

fn circle_path(center: Vec2, radius: f32) -> Path {
    let mut builder = Path::builder();
    builder.add_circle(point(center.x, center.y), radius, Winding::Positive);
    builder.build()
}
