#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;
use torus_core::{
    torus_wireframe, CaptionTrack, FrameDriver, InstantClock, VisualizerConfig, DEMO_CAPTIONS_LRC,
};
use torus_render::GpuRenderer;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod caption;
mod constants;
mod dom;
mod events;
mod frame;
mod panel;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("torus-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::canvas_by_id(&document, constants::CANVAS_ID)?;

    let viewport = dom::window_viewport(&window);
    dom::sync_canvas_backing_size(&canvas, viewport);

    let config = VisualizerConfig::default();
    let track = CaptionTrack::parse_lrc(DEMO_CAPTIONS_LRC)?;
    let mesh = torus_wireframe(&config.layout.torus_for(viewport));
    let (w, h) = viewport.pixel_size();
    let renderer = GpuRenderer::new(wgpu::SurfaceTarget::Canvas(canvas.clone()), w, h, &mesh).await?;

    let lyrics = dom::element_or_create(&document, constants::LYRICS_ID, "div")?;
    let captions = caption::DomCaption::new(lyrics);
    let driver = FrameDriver::new(config, track, viewport, renderer, captions);

    let queue = events::EventQueue::default();
    panel::build(&document, driver.params().values(), &queue)?;
    let audio = Rc::new(RefCell::new(audio::TrackAudio::new(
        constants::TRACK_URL,
        &queue,
    )?));

    events::wire_pointer(&document, &queue);
    events::wire_resize(&window, &canvas, &queue);
    events::wire_gesture(&document, &audio);

    frame::start_loop(frame::FrameContext {
        driver,
        queue,
        audio,
        clock: InstantClock::new(),
    });
    Ok(())
}
