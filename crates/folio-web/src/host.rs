//! Browser implementation of [`Host`].

use std::collections::HashMap;
use std::rc::Rc;

use folio_engine::{
    FrameId, Host, HostError, InputEvent, ListenerId, ListenerKind, ListenerSpec, ListenerTarget,
    SurfaceFit, Viewport,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, HtmlCanvasElement, MouseEvent, TouchEvent, Window};

/// Where translated input events go.
pub type InputSink = Rc<dyn Fn(InputEvent)>;

struct Registration {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

/// Registers DOM listeners and animation frames on a window.
///
/// Each listener owns its closure; removing the listener drops the closure.
/// A single frame closure is reused for every `requestAnimationFrame`.
pub struct WebHost {
    window: Window,
    canvas: Option<HtmlCanvasElement>,
    fit: SurfaceFit,
    sink: InputSink,
    frame_callback: Closure<dyn FnMut(f64)>,
    listeners: HashMap<ListenerId, Registration>,
    pending_frame: Option<(FrameId, i32)>,
    next_id: u32,
}

impl WebHost {
    pub fn new(
        window: Window,
        canvas: Option<HtmlCanvasElement>,
        fit: SurfaceFit,
        sink: InputSink,
        on_frame: Box<dyn FnMut(f64)>,
    ) -> Self {
        Self {
            window,
            canvas,
            fit,
            sink,
            frame_callback: Closure::wrap(on_frame),
            listeners: HashMap::new(),
            pending_frame: None,
            next_id: 0,
        }
    }

    fn next_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    fn target(&self, target: ListenerTarget) -> EventTarget {
        match (target, &self.canvas) {
            (ListenerTarget::Surface, Some(canvas)) => canvas.clone().into(),
            // Without a canvas, surface listeners fall back to the whole window.
            _ => self.window.clone().into(),
        }
    }

    fn translator(&self, kind: ListenerKind) -> Closure<dyn FnMut(Event)> {
        let sink = self.sink.clone();
        match kind {
            ListenerKind::PointerDown | ListenerKind::PointerMove | ListenerKind::PointerUp => {
                Closure::wrap(Box::new(move |event: Event| {
                    let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                        return;
                    };
                    let x = mouse.client_x() as f32;
                    let y = mouse.client_y() as f32;
                    sink(match kind {
                        ListenerKind::PointerDown => InputEvent::PointerDown { x, y },
                        ListenerKind::PointerUp => InputEvent::PointerUp { x, y },
                        _ => InputEvent::PointerMove { x, y },
                    });
                }) as Box<dyn FnMut(Event)>)
            }
            ListenerKind::TouchStart | ListenerKind::TouchMove => {
                Closure::wrap(Box::new(move |event: Event| {
                    let Some(touch) = event
                        .dyn_ref::<TouchEvent>()
                        .and_then(|t| t.touches().get(0))
                    else {
                        return;
                    };
                    let x = touch.client_x() as f32;
                    let y = touch.client_y() as f32;
                    sink(match kind {
                        ListenerKind::TouchStart => InputEvent::TouchStart { x, y },
                        _ => InputEvent::TouchMove { x, y },
                    });
                }) as Box<dyn FnMut(Event)>)
            }
            ListenerKind::TouchEnd => Closure::wrap(Box::new(move |_event: Event| {
                sink(InputEvent::TouchEnd);
            }) as Box<dyn FnMut(Event)>),
            ListenerKind::Resize => {
                let window = self.window.clone();
                let canvas = self.canvas.clone();
                let fit = self.fit;
                Closure::wrap(Box::new(move |_event: Event| {
                    let size = measure(&window, canvas.as_ref(), fit);
                    sink(InputEvent::Resize {
                        width: size.width,
                        height: size.height,
                    });
                }) as Box<dyn FnMut(Event)>)
            }
        }
    }
}

impl Host for WebHost {
    fn listen(&mut self, spec: ListenerSpec) -> Result<ListenerId, HostError> {
        let event = spec.kind.event_name();
        let target = self.target(spec.target);
        let callback = self.translator(spec.kind);
        target
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .map_err(|err| HostError::ListenerRejected {
                event,
                reason: format!("{err:?}"),
            })?;

        let id = ListenerId(self.next_id());
        self.listeners.insert(
            id,
            Registration {
                target,
                event,
                callback,
            },
        );
        Ok(id)
    }

    fn unlisten(&mut self, id: ListenerId) {
        if let Some(reg) = self.listeners.remove(&id) {
            let _ = reg
                .target
                .remove_event_listener_with_callback(reg.event, reg.callback.as_ref().unchecked_ref());
        }
    }

    fn request_frame(&mut self) -> Result<FrameId, HostError> {
        let handle = self
            .window
            .request_animation_frame(self.frame_callback.as_ref().unchecked_ref())
            .map_err(|err| HostError::FrameRejected(format!("{err:?}")))?;
        let id = FrameId(self.next_id());
        // A previous entry, if any, has already fired.
        self.pending_frame = Some((id, handle));
        Ok(id)
    }

    fn cancel_frame(&mut self, id: FrameId) {
        if let Some((pending, handle)) = self.pending_frame {
            if pending == id {
                let _ = self.window.cancel_animation_frame(handle);
                self.pending_frame = None;
            }
        }
    }
}

impl Drop for WebHost {
    fn drop(&mut self) {
        let ids: Vec<ListenerId> = self.listeners.keys().copied().collect();
        for id in ids {
            self.unlisten(id);
        }
        if let Some((id, _)) = self.pending_frame {
            self.cancel_frame(id);
        }
    }
}

/// Current surface size under `fit`.
pub fn measure(window: &Window, canvas: Option<&HtmlCanvasElement>, fit: SurfaceFit) -> Viewport {
    match (fit, canvas) {
        (SurfaceFit::Element, Some(canvas)) => {
            Viewport::new(canvas.client_width().max(0) as f32, canvas.client_height().max(0) as f32)
        }
        _ => {
            let dim = |v: Result<JsValue, JsValue>| {
                v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0).max(0.0) as f32
            };
            Viewport::new(dim(window.inner_width()), dim(window.inner_height()))
        }
    }
}
