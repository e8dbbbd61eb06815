use folio_engine::{Cursor, Host, HostError, InputEvent, Mount, Surface, Viewport, Widget};

use crate::runner::WidgetRunner;

/// A widget mounted on a host, for exactly as long as this value lives.
///
/// Mounting registers the widget's listeners and the first frame; every
/// delivered frame ticks the widget, paints, and requests the next frame.
/// Dropping the session releases all of it.
pub struct Session<W: Widget, H: Host, S: Surface> {
    runner: WidgetRunner<W>,
    surface: Option<S>,
    cursor: Option<Cursor>,
    mount: Mount<H>,
}

impl<W: Widget, H: Host, S: Surface> Session<W, H, S> {
    /// Mount `widget`. A missing surface is tolerated: the widget still runs
    /// but nothing is painted.
    pub fn mount(
        widget: W,
        host: H,
        surface: Option<S>,
        viewport: Viewport,
    ) -> Result<Self, HostError> {
        let mut runner = WidgetRunner::new(widget);
        runner.init(viewport);

        let mount = Mount::attach(host, runner.listeners())?;

        let mut surface = surface;
        if let Some(surface) = surface.as_mut() {
            surface.resize(viewport);
        }

        log::info!(
            "mounted: {} listeners, {}x{}",
            mount.listener_count(),
            viewport.width,
            viewport.height
        );

        Ok(Self {
            runner,
            surface,
            cursor: None,
            mount,
        })
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.runner.push_input(event);
    }

    /// Frame callback body. Always schedules the next frame.
    pub fn on_frame(&mut self, dt: f32) -> Result<(), HostError> {
        self.mount.frame_fired();

        let before = self.runner.viewport();
        self.runner.tick(dt);

        if let Some(surface) = self.surface.as_mut() {
            let viewport = self.runner.viewport();
            if viewport != before {
                surface.resize(viewport);
            }
            let cursor = self.runner.cursor();
            if self.cursor != Some(cursor) {
                surface.set_cursor(cursor);
                self.cursor = Some(cursor);
            }
            surface.paint(self.runner.draw_list());
        }

        self.mount.schedule_frame()
    }

    pub fn runner(&self) -> &WidgetRunner<W> {
        &self.runner
    }

    pub fn runner_mut(&mut self) -> &mut WidgetRunner<W> {
        &mut self.runner
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }
}

impl<W: Widget, H: Host, S: Surface> Drop for Session<W, H, S> {
    fn drop(&mut self) {
        log::info!("unmounting after {} frames", self.runner.frame());
    }
}
