use crate::api::error::HostError;
use crate::api::types::ListenerSpec;
use crate::host::{FrameId, Host, ListenerId};

/// Scoped registration of a widget's listeners and frame loop.
///
/// Created on mount; dropping it deregisters every listener it registered and
/// cancels the pending frame, so no callback can outlive the widget.
pub struct Mount<H: Host> {
    host: H,
    listeners: Vec<ListenerId>,
    pending_frame: Option<FrameId>,
}

impl<H: Host> Mount<H> {
    /// Register `specs` on `host` and schedule the first frame.
    ///
    /// On failure everything registered so far is released before the error
    /// is returned.
    pub fn attach(mut host: H, specs: &[ListenerSpec]) -> Result<Self, HostError> {
        let mut listeners = Vec::with_capacity(specs.len());
        for spec in specs {
            match host.listen(*spec) {
                Ok(id) => listeners.push(id),
                Err(err) => {
                    for id in listeners.drain(..) {
                        host.unlisten(id);
                    }
                    return Err(err);
                }
            }
        }

        let mut mount = Self {
            host,
            listeners,
            pending_frame: None,
        };
        mount.schedule_frame()?;
        Ok(mount)
    }

    /// Mark the pending frame as delivered. Call at the top of the frame callback.
    pub fn frame_fired(&mut self) {
        self.pending_frame = None;
    }

    /// Request the next frame unless one is already pending.
    pub fn schedule_frame(&mut self) -> Result<(), HostError> {
        if self.pending_frame.is_none() {
            self.pending_frame = Some(self.host.request_frame()?);
        }
        Ok(())
    }

    pub fn pending_frame(&self) -> Option<FrameId> {
        self.pending_frame
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn release(&mut self) {
        if let Some(frame) = self.pending_frame.take() {
            self.host.cancel_frame(frame);
        }
        for id in self.listeners.drain(..) {
            self.host.unlisten(id);
        }
    }
}

impl<H: Host> Drop for Mount<H> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::ListenerKind;
    use crate::host::headless::HeadlessHost;

    const SPECS: &[ListenerSpec] = &[
        ListenerSpec::window(ListenerKind::PointerMove),
        ListenerSpec::window(ListenerKind::Resize),
    ];

    #[test]
    fn attach_registers_listeners_and_first_frame() {
        let host = HeadlessHost::new();
        let mount = Mount::attach(host.clone(), SPECS).unwrap();
        assert_eq!(mount.listener_count(), 2);
        assert!(mount.pending_frame().is_some());
        assert_eq!(host.active_listeners(), 2);
        assert_eq!(host.pending_frames(), 1);
    }

    #[test]
    fn drop_releases_everything() {
        let host = HeadlessHost::new();
        {
            let _mount = Mount::attach(host.clone(), SPECS).unwrap();
        }
        assert_eq!(host.active_listeners(), 0);
        assert_eq!(host.pending_frames(), 0);
        let stats = host.stats();
        assert_eq!(stats.listens, 2);
        assert_eq!(stats.unlistens, 2);
        assert_eq!(stats.frames_cancelled, 1);
    }

    #[test]
    fn schedule_is_idempotent_until_fired() {
        let host = HeadlessHost::new();
        let mut mount = Mount::attach(host.clone(), SPECS).unwrap();
        mount.schedule_frame().unwrap();
        mount.schedule_frame().unwrap();
        assert_eq!(host.stats().frames_requested, 1);

        assert!(host.fire_frame(mount.pending_frame().unwrap()));
        mount.frame_fired();
        mount.schedule_frame().unwrap();
        assert_eq!(host.stats().frames_requested, 2);
        assert_eq!(host.pending_frames(), 1);
    }

    #[test]
    fn failed_listener_rolls_back() {
        let host = HeadlessHost::new();
        host.reject(ListenerKind::Resize);
        let result = Mount::attach(host.clone(), SPECS);
        assert!(matches!(result, Err(HostError::ListenerRejected { event: "resize", .. })));
        assert_eq!(host.active_listeners(), 0);
        assert_eq!(host.pending_frames(), 0);
    }
}
