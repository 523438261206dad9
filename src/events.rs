//! Browser event wiring. Handlers only enqueue [`InputEvent`]s; the frame
//! loop drains the queue before each tick.

use crate::audio::TrackAudio;
use crate::dom;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use torus_core::InputEvent;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone, Default)]
pub struct EventQueue {
    inner: Rc<RefCell<VecDeque<InputEvent>>>,
}

impl EventQueue {
    pub fn push(&self, event: InputEvent) {
        self.inner.borrow_mut().push_back(event);
    }

    /// Take every queued event, oldest first.
    pub fn drain(&self) -> Vec<InputEvent> {
        self.inner.borrow_mut().drain(..).collect()
    }
}

pub(crate) fn listen<E: wasm_bindgen::convert::FromWasmAbi + 'static>(
    target: &web::EventTarget,
    event: &str,
    handler: impl FnMut(E) + 'static,
) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        log::error!("[events] add {} listener: {:?}", event, e);
    }
    closure.forget();
}

pub fn wire_pointer(document: &web::Document, queue: &EventQueue) {
    let queue = queue.clone();
    listen(document, "pointermove", move |ev: web::PointerEvent| {
        queue.push(InputEvent::PointerMoved {
            client_x: ev.client_x() as f32,
            client_y: ev.client_y() as f32,
        });
    });
}

pub fn wire_resize(window: &web::Window, canvas: &web::HtmlCanvasElement, queue: &EventQueue) {
    let queue = queue.clone();
    let canvas = canvas.clone();
    listen(window, "resize", move |_: web::Event| {
        let Some(w) = web::window() else {
            return;
        };
        let viewport = dom::window_viewport(&w);
        dom::sync_canvas_backing_size(&canvas, viewport);
        queue.push(InputEvent::Resized(viewport));
    });
}

/// Every click is a user gesture that may start or resume audio.
pub fn wire_gesture(document: &web::Document, audio: &Rc<RefCell<TrackAudio>>) {
    let audio = audio.clone();
    listen(document, "click", move |_: web::MouseEvent| {
        audio.borrow_mut().on_gesture();
    });
}
