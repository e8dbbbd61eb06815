/// Size of a widget's drawing surface, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const ZERO: Self = Self { width: 0.0, height: 0.0 };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero (or negative), i.e. nothing can be drawn.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    pub fn center(&self) -> glam::Vec2 {
        glam::Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Whether a point lies inside `[0, width] x [0, height]`.
    pub fn contains(&self, p: glam::Vec2) -> bool {
        p.x >= 0.0 && p.y >= 0.0 && p.x <= self.width && p.y <= self.height
    }
}

/// Pointer cursor a widget asks its surface to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    Grab,
    Grabbing,
}

impl Cursor {
    /// CSS `cursor` value.
    pub fn css(self) -> &'static str {
        match self {
            Cursor::Default => "default",
            Cursor::Grab => "grab",
            Cursor::Grabbing => "grabbing",
        }
    }

    /// Wire value for the host-driven protocol.
    pub fn code(self) -> u32 {
        match self {
            Cursor::Default => 0,
            Cursor::Grab => 1,
            Cursor::Grabbing => 2,
        }
    }
}

/// Input sources a widget can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    PointerDown,
    PointerMove,
    PointerUp,
    TouchStart,
    TouchMove,
    TouchEnd,
    Resize,
}

impl ListenerKind {
    /// DOM event name.
    pub fn event_name(self) -> &'static str {
        match self {
            ListenerKind::PointerDown => "mousedown",
            ListenerKind::PointerMove => "mousemove",
            ListenerKind::PointerUp => "mouseup",
            ListenerKind::TouchStart => "touchstart",
            ListenerKind::TouchMove => "touchmove",
            ListenerKind::TouchEnd => "touchend",
            ListenerKind::Resize => "resize",
        }
    }
}

/// Where a listener is attached.
///
/// `Window` listeners see events anywhere on the page, which is what lets a
/// drag end when the button is released outside the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerTarget {
    Window,
    Surface,
}

/// One listener registration request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerSpec {
    pub kind: ListenerKind,
    pub target: ListenerTarget,
}

impl ListenerSpec {
    pub const fn window(kind: ListenerKind) -> Self {
        Self { kind, target: ListenerTarget::Window }
    }

    pub const fn surface(kind: ListenerKind) -> Self {
        Self { kind, target: ListenerTarget::Surface }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn zero_viewport_is_empty() {
        assert!(Viewport::ZERO.is_empty());
        assert!(Viewport::new(800.0, 0.0).is_empty());
        assert!(!Viewport::new(800.0, 600.0).is_empty());
    }

    #[test]
    fn contains_is_inclusive_of_edges() {
        let vp = Viewport::new(100.0, 50.0);
        assert!(vp.contains(Vec2::new(0.0, 0.0)));
        assert!(vp.contains(Vec2::new(100.0, 50.0)));
        assert!(!vp.contains(Vec2::new(100.5, 10.0)));
        assert!(!vp.contains(Vec2::new(-0.1, 10.0)));
    }

    #[test]
    fn listener_event_names() {
        assert_eq!(ListenerKind::PointerMove.event_name(), "mousemove");
        assert_eq!(ListenerKind::TouchEnd.event_name(), "touchend");
        assert_eq!(ListenerKind::Resize.event_name(), "resize");
    }
}
