/// Input event types the engine understands.
/// Coordinates are viewport pixels; touch events carry the first touch point only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A mouse button was pressed at (x, y).
    PointerDown { x: f32, y: f32 },
    /// The mouse moved to (x, y).
    PointerMove { x: f32, y: f32 },
    /// A mouse button was released at (x, y).
    PointerUp { x: f32, y: f32 },
    /// A touch began at (x, y).
    TouchStart { x: f32, y: f32 },
    /// The first touch moved to (x, y).
    TouchMove { x: f32, y: f32 },
    /// A touch ended.
    TouchEnd,
    /// The drawing surface must be resized to (width, height).
    Resize { width: f32, height: f32 },
}

/// A queue of input events.
/// Host listeners write events into the queue; the runner hands the batch to
/// the widget once per frame and then drains it.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event.
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    /// The most recent resize in this batch, if any.
    pub fn last_resize(&self) -> Option<(f32, f32)> {
        self.events.iter().rev().find_map(|e| match *e {
            InputEvent::Resize { width, height } => Some((width, height)),
            _ => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0 });
        q.push(InputEvent::TouchEnd);
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn last_resize_wins() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Resize { width: 100.0, height: 100.0 });
        q.push(InputEvent::PointerMove { x: 1.0, y: 1.0 });
        q.push(InputEvent::Resize { width: 320.0, height: 240.0 });
        assert_eq!(q.last_resize(), Some((320.0, 240.0)));
    }
}
