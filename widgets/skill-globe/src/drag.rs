use glam::Vec2;

/// Drag gesture tracking. The orbit only changes through the deltas this
/// hands out, and auto-rotation runs only while it is `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        /// Pointer position at the previous move (or at the press).
        last: Vec2,
    },
}

impl DragState {
    /// Press: start (or restart) a gesture at `at`.
    pub fn begin(&mut self, at: Vec2) {
        *self = DragState::Dragging { last: at };
    }

    /// Move to `to`. Returns the delta since the last position while dragging.
    pub fn moved(&mut self, to: Vec2) -> Option<Vec2> {
        match self {
            DragState::Dragging { last } => {
                let delta = to - *last;
                *last = to;
                Some(delta)
            }
            DragState::Idle => None,
        }
    }

    /// Release, wherever it happened.
    pub fn end(&mut self) {
        *self = DragState::Idle;
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }
}
