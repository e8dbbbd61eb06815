//! Host environment seam.
//!
//! A host is whatever owns the event dispatch and the frame scheduler: the
//! browser window in production, [`headless::HeadlessHost`] in tests. Widgets
//! never talk to a host directly; a [`mount::Mount`] registers everything a
//! widget needs and releases it again when dropped.

pub mod headless;
pub mod mount;

use crate::api::error::HostError;
use crate::api::types::ListenerSpec;

/// Handle for a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u32);

/// Handle for a requested animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(pub u32);

/// Registration primitives a host provides.
///
/// Every successful `listen` must be paired with exactly one `unlisten`, and
/// every `request_frame` with either the frame firing or one `cancel_frame`.
pub trait Host {
    /// Subscribe to an input source.
    fn listen(&mut self, spec: ListenerSpec) -> Result<ListenerId, HostError>;

    /// Remove a subscription. Unknown ids are ignored.
    fn unlisten(&mut self, id: ListenerId);

    /// Ask for one callback before the next repaint.
    fn request_frame(&mut self) -> Result<FrameId, HostError>;

    /// Cancel a pending frame request. Unknown or already-fired ids are ignored.
    fn cancel_frame(&mut self, id: FrameId);
}
