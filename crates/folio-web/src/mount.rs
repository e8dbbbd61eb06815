//! Self-driven mounting: Rust owns the listeners and the frame loop.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use folio_engine::{ConfigError, HostError, InputEvent, Widget};
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

use crate::canvas::CanvasSurface;
use crate::host::{measure, InputSink, WebHost};
use crate::session::Session;

pub type WebSession<W> = Session<W, WebHost, CanvasSurface>;

type Slot<W> = Rc<RefCell<Option<WebSession<W>>>>;

/// A widget mounted on a page canvas. Dropping it unmounts the widget.
pub struct MountedWidget<W: Widget + 'static> {
    slot: Slot<W>,
}

impl<W: Widget + 'static> MountedWidget<W> {
    /// Apply a configuration override to the running widget.
    pub fn configure(&self, json: &str) -> Result<(), ConfigError> {
        match self.slot.borrow_mut().as_mut() {
            Some(session) => session.runner_mut().configure(json),
            None => Ok(()),
        }
    }
}

impl<W: Widget + 'static> Drop for MountedWidget<W> {
    fn drop(&mut self) {
        let session = self.slot.borrow_mut().take();
        drop(session);
    }
}

/// Mount `widget` on the canvas with id `canvas_id`.
///
/// A missing canvas or 2D context is logged and tolerated: the widget is
/// mounted without a surface and paints nothing until the next mount.
pub fn mount_widget<W: Widget + 'static>(
    widget: W,
    canvas_id: &str,
) -> Result<MountedWidget<W>, HostError> {
    let window = web_sys::window().ok_or(HostError::Unavailable("window"))?;
    let document = window.document().ok_or(HostError::Unavailable("document"))?;

    let canvas = document
        .get_element_by_id(canvas_id)
        .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok());
    let surface = match canvas.clone() {
        Some(canvas) => CanvasSurface::acquire(canvas)
            .map_err(|err| log::warn!("#{canvas_id}: {err}; rendering disabled"))
            .ok(),
        None => {
            log::warn!("#{canvas_id} is not a canvas; rendering disabled");
            None
        }
    };

    let fit = widget.config().fit;
    let slot: Slot<W> = Rc::new(RefCell::new(None));

    let sink: InputSink = {
        let weak = Rc::downgrade(&slot);
        Rc::new(move |event: InputEvent| {
            with_session(&weak, |session| session.push_input(event));
        })
    };

    let on_frame: Box<dyn FnMut(f64)> = {
        let weak = Rc::downgrade(&slot);
        let mut last_timestamp: Option<f64> = None;
        Box::new(move |timestamp: f64| {
            let dt = last_timestamp.map_or(0.0, |prev| ((timestamp - prev) / 1000.0) as f32);
            last_timestamp = Some(timestamp);
            with_session(&weak, |session| {
                if let Err(err) = session.on_frame(dt.max(0.0)) {
                    log::warn!("frame loop stopped: {err}");
                }
            });
        })
    };

    let viewport = measure(&window, canvas.as_ref(), fit);
    let host = WebHost::new(window, canvas, fit, sink, on_frame);
    let session = Session::mount(widget, host, surface, viewport)?;
    *slot.borrow_mut() = Some(session);

    Ok(MountedWidget { slot })
}

fn with_session<W: Widget + 'static>(weak: &Weak<RefCell<Option<WebSession<W>>>>, f: impl FnOnce(&mut WebSession<W>)) {
    let Some(slot) = weak.upgrade() else {
        return;
    };
    let Ok(mut guard) = slot.try_borrow_mut() else {
        log::debug!("session busy; callback dropped");
        return;
    };
    if let Some(session) = guard.as_mut() {
        f(session);
    }
}
