use crate::api::error::ConfigError;
use crate::api::types::{Cursor, ListenerSpec, Viewport};
use crate::input::queue::InputQueue;
use crate::render::draw_list::DrawList;

/// How the host sizes a widget's drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurfaceFit {
    /// Match the window's inner size (full-page background layers).
    #[default]
    Viewport,
    /// Match the canvas element's own client box.
    Element,
}

/// Engine-level configuration, provided by the widget.
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    /// How the drawing surface tracks resizes.
    pub fit: SurfaceFit,
    /// Maximum number of tessellated vector vertices per frame (default: 65536).
    pub max_vector_vertices: usize,
    /// Maximum number of markers per frame (default: 64).
    pub max_markers: usize,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            fit: SurfaceFit::Viewport,
            max_vector_vertices: 65536,
            max_markers: 64,
        }
    }
}

/// The contract every widget fulfills.
///
/// A widget owns its state as plain fields. The runner feeds it one batch of
/// input per frame and asks it to describe the frame as a [`DrawList`], so the
/// whole state machine is testable without a browser.
pub trait Widget {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> WidgetConfig {
        WidgetConfig::default()
    }

    /// Listeners the widget needs for as long as it is mounted.
    fn listeners(&self) -> &'static [ListenerSpec];

    /// Called once the initial viewport is known.
    fn init(&mut self, _ctx: &mut FrameContext) {}

    /// Per-frame tick. Consume this frame's input and advance state.
    fn update(&mut self, ctx: &mut FrameContext, input: &InputQueue);

    /// Read-only pass that records this frame's drawing.
    fn render(&self, ctx: &mut RenderContext);

    /// Apply a JSON configuration override on top of the ones already
    /// applied: keys it leaves out keep their current values. Rejected
    /// overrides leave the current configuration untouched.
    fn configure(&mut self, _json: &str) -> Result<(), ConfigError> {
        Ok(())
    }
}

/// Mutable per-frame state shared between the runner and the widget.
#[derive(Debug, Clone, Default)]
pub struct FrameContext {
    /// Current drawing surface size.
    pub viewport: Viewport,
    /// Frames ticked since init.
    pub frame: u64,
    /// Seconds since the previous frame, as reported by the host.
    pub dt: f32,
    /// Cursor the widget wants shown over its surface.
    pub cursor: Cursor,
}

impl FrameContext {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    /// Advance the frame counter at the start of a tick.
    pub fn begin_frame(&mut self, dt: f32) {
        self.frame += 1;
        self.dt = dt;
    }
}

/// Render context passed to [`Widget::render`].
pub struct RenderContext<'a> {
    pub draw_list: &'a mut DrawList,
    pub viewport: Viewport,
}
