use folio_engine::bridge::protocol::HEADER_FLOATS;
use folio_engine::{
    ConfigError, Cursor, DrawList, FrameContext, InputEvent, InputQueue, ListenerSpec,
    ProtocolLayout, RenderContext, Viewport, Widget, WidgetConfig,
};
#[cfg(feature = "vectors")]
use folio_engine::bridge::protocol::FrameHeader;
#[cfg(feature = "vectors")]
use folio_engine::VectorBuffer;

/// Generic widget runner that wires up the per-frame loop.
///
/// One tick = apply resizes, let the widget consume the input batch, drain
/// the batch, record the frame into the draw list.
pub struct WidgetRunner<W: Widget> {
    widget: W,
    ctx: FrameContext,
    input: InputQueue,
    draw_list: DrawList,
    config: WidgetConfig,
    layout: ProtocolLayout,
    header: [f32; HEADER_FLOATS],
    initialized: bool,
    #[cfg(feature = "vectors")]
    vectors: VectorBuffer,
}

impl<W: Widget> WidgetRunner<W> {
    pub fn new(widget: W) -> Self {
        let config = widget.config();
        let layout = ProtocolLayout::from_config(&config);

        Self {
            #[cfg(feature = "vectors")]
            vectors: VectorBuffer::new(config.max_vector_vertices, config.max_markers),
            widget,
            ctx: FrameContext::default(),
            input: InputQueue::new(),
            draw_list: DrawList::new(),
            layout,
            config,
            header: [0.0; HEADER_FLOATS],
            initialized: false,
        }
    }

    /// Initialize the widget with the surface size known at mount time.
    pub fn init(&mut self, viewport: Viewport) {
        self.ctx = FrameContext::new(viewport);
        self.widget.init(&mut self.ctx);
        self.initialized = true;
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame tick.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        self.ctx.begin_frame(dt);
        if let Some((width, height)) = self.input.last_resize() {
            self.ctx.viewport = Viewport::new(width.max(0.0), height.max(0.0));
        }

        self.widget.update(&mut self.ctx, &self.input);
        self.input.drain();

        self.draw_list.clear();
        let mut render_ctx = RenderContext {
            draw_list: &mut self.draw_list,
            viewport: self.ctx.viewport,
        };
        self.widget.render(&mut render_ctx);
    }

    /// Tessellate the current draw list and refresh the shared header.
    #[cfg(feature = "vectors")]
    pub fn tessellate(&mut self) {
        self.vectors.rebuild(&self.draw_list);
        let frame = FrameHeader {
            frame: self.ctx.frame,
            viewport_width: self.ctx.viewport.width,
            viewport_height: self.ctx.viewport.height,
            vector_vertex_count: self.vectors.vertex_count(),
            marker_count: self.vectors.marker_count(),
            cursor: self.ctx.cursor.code(),
        };
        self.layout.write_header(&frame, &mut self.header);
    }

    /// Forward a JSON override to the widget.
    pub fn configure(&mut self, json: &str) -> Result<(), ConfigError> {
        self.widget.configure(json)
    }

    pub fn listeners(&self) -> &'static [ListenerSpec] {
        self.widget.listeners()
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.widget
    }

    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    pub fn viewport(&self) -> Viewport {
        self.ctx.viewport
    }

    pub fn cursor(&self) -> Cursor {
        self.ctx.cursor
    }

    pub fn frame(&self) -> u64 {
        self.ctx.frame
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    // ---- Pointer accessors for shared-memory reads ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    #[cfg(feature = "vectors")]
    pub fn vector_vertices_ptr(&self) -> *const f32 {
        self.vectors.vertices_ptr()
    }

    #[cfg(feature = "vectors")]
    pub fn vector_vertex_count(&self) -> u32 {
        self.vectors.vertex_count() as u32
    }

    #[cfg(feature = "vectors")]
    pub fn markers_ptr(&self) -> *const f32 {
        self.vectors.markers_ptr()
    }

    #[cfg(feature = "vectors")]
    pub fn marker_count(&self) -> u32 {
        self.vectors.marker_count() as u32
    }

    /// Label text of the `index`-th marker of the current frame.
    pub fn marker_label(&self, index: usize) -> Option<&str> {
        self.draw_list.markers().nth(index).map(|m| &*m.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_engine::{ListenerKind, Rgba};
    use glam::Vec2;

    /// Draws one dot at the last pointer position.
    struct Tracker {
        last: Option<Vec2>,
        updates: u32,
    }

    impl Widget for Tracker {
        fn listeners(&self) -> &'static [ListenerSpec] {
            const LISTENERS: &[ListenerSpec] = &[ListenerSpec::window(ListenerKind::PointerMove)];
            LISTENERS
        }

        fn update(&mut self, _ctx: &mut FrameContext, input: &InputQueue) {
            self.updates += 1;
            for event in input.iter() {
                if let InputEvent::PointerMove { x, y } = *event {
                    self.last = Some(Vec2::new(x, y));
                }
            }
        }

        fn render(&self, ctx: &mut RenderContext) {
            ctx.draw_list.clear_surface();
            if let Some(p) = self.last {
                ctx.draw_list.fill_circle(p, 1.0, Rgba::WHITE);
            }
        }
    }

    fn runner() -> WidgetRunner<Tracker> {
        WidgetRunner::new(Tracker { last: None, updates: 0 })
    }

    #[test]
    fn tick_before_init_is_noop() {
        let mut r = runner();
        r.tick(0.016);
        assert_eq!(r.widget().updates, 0);
        assert!(r.draw_list().is_empty());
    }

    #[test]
    fn input_is_consumed_once() {
        let mut r = runner();
        r.init(Viewport::new(800.0, 600.0));
        r.push_input(InputEvent::PointerMove { x: 5.0, y: 6.0 });
        r.tick(0.016);
        assert_eq!(r.widget().last, Some(Vec2::new(5.0, 6.0)));
        assert_eq!(r.draw_list().len(), 2);

        r.widget_mut().last = None;
        r.tick(0.016);
        assert_eq!(r.widget().last, None);
        assert_eq!(r.frame(), 2);
    }

    #[test]
    fn resize_updates_viewport_before_update() {
        let mut r = runner();
        r.init(Viewport::new(800.0, 600.0));
        r.push_input(InputEvent::Resize { width: 1024.0, height: 768.0 });
        r.tick(0.016);
        assert_eq!(r.viewport(), Viewport::new(1024.0, 768.0));
    }

    #[cfg(feature = "vectors")]
    #[test]
    fn tessellate_fills_header() {
        use folio_engine::bridge::protocol::{HEADER_VECTOR_VERTEX_COUNT, HEADER_VIEWPORT_WIDTH};

        let mut r = runner();
        r.init(Viewport::new(320.0, 200.0));
        r.push_input(InputEvent::PointerMove { x: 10.0, y: 10.0 });
        r.tick(0.016);
        r.tessellate();
        assert!(r.vector_vertex_count() > 0);
        assert_eq!(r.header[HEADER_VIEWPORT_WIDTH], 320.0);
        assert_eq!(r.header[HEADER_VECTOR_VERTEX_COUNT], r.vector_vertex_count() as f32);
    }
}
