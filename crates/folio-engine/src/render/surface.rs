use crate::api::types::{Cursor, Viewport};
use crate::render::draw_list::DrawList;

/// Something a [`DrawList`] can be replayed onto.
pub trait Surface {
    /// Resize the backing store to exactly `viewport`.
    fn resize(&mut self, viewport: Viewport);

    /// Replay one frame.
    fn paint(&mut self, list: &DrawList);

    fn set_cursor(&mut self, _cursor: Cursor) {}
}

/// Surface that keeps the last painted frame, for tests and native runs.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub size: Viewport,
    pub resizes: u32,
    pub paints: u32,
    pub cursor: Cursor,
    pub last_frame: DrawList,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Surface for RecordingSurface {
    fn resize(&mut self, viewport: Viewport) {
        self.size = viewport;
        self.resizes += 1;
    }

    fn paint(&mut self, list: &DrawList) {
        self.paints += 1;
        self.last_frame.clone_from(list);
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }
}
