use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::rc::Rc;

use crate::api::error::HostError;
use crate::api::types::{ListenerKind, ListenerSpec};
use crate::host::{FrameId, Host, ListenerId};

/// Running totals of every registration a [`HeadlessHost`] has seen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostStats {
    pub listens: u32,
    pub unlistens: u32,
    pub frames_requested: u32,
    pub frames_cancelled: u32,
    pub frames_fired: u32,
}

#[derive(Default)]
struct HeadlessState {
    next_id: u32,
    listeners: BTreeMap<ListenerId, ListenerSpec>,
    frames: BTreeSet<FrameId>,
    rejected: HashSet<ListenerKind>,
    stats: HostStats,
}

/// A host with no event source and no display.
///
/// It only keeps books: which listeners and frames are live, and how many were
/// ever registered or released. Clones share the same books, so a test can
/// hand one clone to a mount and inspect another after the mount is gone.
#[derive(Clone, Default)]
pub struct HeadlessHost {
    state: Rc<RefCell<HeadlessState>>,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every future `listen` for `kind` fail.
    pub fn reject(&self, kind: ListenerKind) {
        self.state.borrow_mut().rejected.insert(kind);
    }

    /// Deliver a pending frame. Returns false if it was cancelled or never requested.
    pub fn fire_frame(&self, id: FrameId) -> bool {
        let mut state = self.state.borrow_mut();
        if state.frames.remove(&id) {
            state.stats.frames_fired += 1;
            true
        } else {
            false
        }
    }

    /// The oldest pending frame, if any.
    pub fn next_frame(&self) -> Option<FrameId> {
        self.state.borrow().frames.iter().next().copied()
    }

    pub fn active_listeners(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    pub fn pending_frames(&self) -> usize {
        self.state.borrow().frames.len()
    }

    pub fn stats(&self) -> HostStats {
        self.state.borrow().stats
    }
}

impl Host for HeadlessHost {
    fn listen(&mut self, spec: ListenerSpec) -> Result<ListenerId, HostError> {
        let mut state = self.state.borrow_mut();
        if state.rejected.contains(&spec.kind) {
            return Err(HostError::ListenerRejected {
                event: spec.kind.event_name(),
                reason: "rejected by headless host".to_string(),
            });
        }
        state.next_id += 1;
        let id = ListenerId(state.next_id);
        state.listeners.insert(id, spec);
        state.stats.listens += 1;
        Ok(id)
    }

    fn unlisten(&mut self, id: ListenerId) {
        let mut state = self.state.borrow_mut();
        if state.listeners.remove(&id).is_some() {
            state.stats.unlistens += 1;
        }
    }

    fn request_frame(&mut self) -> Result<FrameId, HostError> {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = FrameId(state.next_id);
        state.frames.insert(id);
        state.stats.frames_requested += 1;
        Ok(id)
    }

    fn cancel_frame(&mut self, id: FrameId) {
        let mut state = self.state.borrow_mut();
        if state.frames.remove(&id) {
            state.stats.frames_cancelled += 1;
        }
    }
}
