use crate::audio::TrackAudio;
use crate::caption::DomCaption;
use crate::events::EventQueue;
use std::cell::RefCell;
use std::rc::Rc;
use torus_core::{Clock, FrameDriver, FrameLoop, InstantClock, LoopControl, TickInput};
use torus_render::GpuRenderer;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type WebDriver = FrameDriver<GpuRenderer<'static>, DomCaption>;

/// State owned by the animation-frame callback.
pub struct FrameContext {
    pub driver: WebDriver,
    pub queue: EventQueue,
    pub audio: Rc<RefCell<TrackAudio>>,
    pub clock: InstantClock,
}

impl FrameContext {
    pub fn frame(&mut self) -> LoopControl {
        for event in self.queue.drain() {
            self.driver.handle(event);
        }
        let (playback_sec, amplitude) = {
            let mut audio = self.audio.borrow_mut();
            (audio.playback_sec(), audio.amplitude())
        };
        let input = TickInput {
            elapsed_sec: self.clock.elapsed_sec(),
            playback_sec,
            amplitude,
        };
        match self.driver.tick(input) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.driver.renderer_mut().reconfigure();
            }
            Err(e) => log::error!("render error: {:?}", e),
        }
        LoopControl::Continue
    }
}

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn request_frame(slot: &FrameSlot) {
    if let (Some(w), Some(cb)) = (web::window(), slot.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

/// `requestAnimationFrame` loop: reschedules itself until the tick asks to exit.
pub struct RafLoop;

impl FrameLoop for RafLoop {
    fn run<F>(self, mut tick: F)
    where
        F: FnMut() -> LoopControl + 'static,
    {
        let slot: FrameSlot = Rc::new(RefCell::new(None));
        let slot_tick = slot.clone();
        *slot.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if tick() == LoopControl::Continue {
                request_frame(&slot_tick);
            } else {
                log::info!("[frame] loop stopped");
            }
        }) as Box<dyn FnMut()>));
        request_frame(&slot);
    }
}

pub fn start_loop(ctx: FrameContext) {
    let ctx = Rc::new(RefCell::new(ctx));
    RafLoop.run(move || ctx.borrow_mut().frame());
}
