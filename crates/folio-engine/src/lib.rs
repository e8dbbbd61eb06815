pub mod api;
pub mod input;
pub mod host;
pub mod render;
pub mod bridge;

// Re-export key types at crate root for convenience
pub use api::widget::{Widget, WidgetConfig, FrameContext, RenderContext, SurfaceFit};
pub use api::types::{Viewport, Cursor, ListenerKind, ListenerTarget, ListenerSpec};
pub use api::error::{HostError, ConfigError};
pub use api::overrides::Overrides;
pub use input::queue::{InputEvent, InputQueue};
pub use host::{Host, ListenerId, FrameId};
pub use host::mount::Mount;
pub use host::headless::{HeadlessHost, HostStats};
pub use render::color::Rgba;
pub use render::draw_list::{DrawCommand, DrawList, Marker, MarkerInstance};
pub use render::surface::{Surface, RecordingSurface};
pub use bridge::protocol::ProtocolLayout;

#[cfg(feature = "vectors")]
pub use render::tessellate::{VectorBuffer, VectorVertex};
