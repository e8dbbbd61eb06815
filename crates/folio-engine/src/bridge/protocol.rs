/// Shared-memory layout for host-driven rendering.
/// Must stay in sync with the JavaScript reader.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 12 floats]
/// [Vector vertices: max_vector_vertices × 6 floats]
/// [Markers: max_markers × 8 floats]
/// ```
///
/// Capacities are written into the header every frame alongside the counts,
/// so the reader never needs compile-time constants.

use crate::api::widget::WidgetConfig;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 12;

/// Header field indices.
pub const HEADER_FRAME_COUNTER: usize = 0;
pub const HEADER_VIEWPORT_WIDTH: usize = 1;
pub const HEADER_VIEWPORT_HEIGHT: usize = 2;
pub const HEADER_MAX_VECTOR_VERTICES: usize = 3;
pub const HEADER_VECTOR_VERTEX_COUNT: usize = 4;
pub const HEADER_MAX_MARKERS: usize = 5;
pub const HEADER_MARKER_COUNT: usize = 6;
pub const HEADER_CURSOR: usize = 7;
pub const HEADER_PROTOCOL_VERSION: usize = 8;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per vector vertex: x, y, r, g, b, a. Fixed wire format.
pub const VECTOR_VERTEX_FLOATS: usize = 6;

/// Floats per marker: x, y, scale, opacity, r, g, b, label_index. Fixed wire format.
pub const MARKER_FLOATS: usize = 8;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_vector_vertices: usize,
    pub max_markers: usize,

    /// Offset (in floats) where vector data begins.
    pub vector_data_offset: usize,
    /// Offset (in floats) where marker data begins.
    pub marker_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    pub fn new(max_vector_vertices: usize, max_markers: usize) -> Self {
        let vector_data_offset = HEADER_FLOATS;
        let marker_data_offset = vector_data_offset + max_vector_vertices * VECTOR_VERTEX_FLOATS;
        let buffer_total_floats = marker_data_offset + max_markers * MARKER_FLOATS;

        Self {
            max_vector_vertices,
            max_markers,
            vector_data_offset,
            marker_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    pub fn from_config(config: &WidgetConfig) -> Self {
        Self::new(config.max_vector_vertices, config.max_markers)
    }
}

/// Per-frame values the header carries besides the capacities.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameHeader {
    pub frame: u64,
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub vector_vertex_count: usize,
    pub marker_count: usize,
    pub cursor: u32,
}

impl ProtocolLayout {
    /// Fill `header` for one frame.
    pub fn write_header(&self, frame: &FrameHeader, header: &mut [f32; HEADER_FLOATS]) {
        header.fill(0.0);
        // Frame counter wraps at f32 precision; the reader only compares for change.
        header[HEADER_FRAME_COUNTER] = (frame.frame % (1 << 24)) as f32;
        header[HEADER_VIEWPORT_WIDTH] = frame.viewport_width;
        header[HEADER_VIEWPORT_HEIGHT] = frame.viewport_height;
        header[HEADER_MAX_VECTOR_VERTICES] = self.max_vector_vertices as f32;
        header[HEADER_VECTOR_VERTEX_COUNT] = frame.vector_vertex_count as f32;
        header[HEADER_MAX_MARKERS] = self.max_markers as f32;
        header[HEADER_MARKER_COUNT] = frame.marker_count as f32;
        header[HEADER_CURSOR] = frame.cursor as f32;
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_follow_sections() {
        let layout = ProtocolLayout::new(100, 10);
        assert_eq!(layout.vector_data_offset, 12);
        assert_eq!(layout.marker_data_offset, 12 + 600);
        assert_eq!(layout.buffer_total_floats, 12 + 600 + 80);
        assert_eq!(layout.buffer_total_bytes, layout.buffer_total_floats * 4);
    }

    #[test]
    fn header_roundtrips_counts() {
        let layout = ProtocolLayout::from_config(&WidgetConfig::default());
        let mut header = [1.0; HEADER_FLOATS];
        layout.write_header(
            &FrameHeader {
                frame: 7,
                viewport_width: 800.0,
                viewport_height: 600.0,
                vector_vertex_count: 42,
                marker_count: 15,
                cursor: 2,
            },
            &mut header,
        );
        assert_eq!(header[HEADER_FRAME_COUNTER], 7.0);
        assert_eq!(header[HEADER_VECTOR_VERTEX_COUNT], 42.0);
        assert_eq!(header[HEADER_MARKER_COUNT], 15.0);
        assert_eq!(header[HEADER_CURSOR], 2.0);
        assert_eq!(header[HEADER_PROTOCOL_VERSION], PROTOCOL_VERSION);
        assert_eq!(header[HEADER_FLOATS - 1], 0.0);
    }
}
