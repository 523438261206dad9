use anyhow::Context;
use smallvec::smallvec;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use torus_core::{
    torus_wireframe, CaptionSink, CaptionTrack, Clock, FrameDriver, InputEvent, InstantClock,
    ParamName, TickInput, Viewport, VisualizerConfig, DEMO_CAPTIONS_LRC,
};
use torus_render::GpuRenderer;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, Event, KeyEvent, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowBuilder};

mod analyser;
mod mic;
mod transport;

use transport::{Transport, TransportEvents, SEEK_STEP_SEC, TRACK_TAIL_SEC};

const WINDOW_TITLE: &str = "torus-bloom";
/// Up/Down moves the selected parameter by this fraction of its range.
const NUDGE_FRACTION: f32 = 1.0 / 20.0;

/// Mirrors captions into the log and the window title.
struct TitleCaption {
    window: Arc<Window>,
}

impl CaptionSink for TitleCaption {
    fn set_text(&mut self, text: &str) {
        log::info!("[lyrics] {}", text);
        self.window.set_title(&format!("{} | {}", WINDOW_TITLE, text));
    }
}

fn window_viewport(window: &Window) -> Viewport {
    let scale = window.scale_factor();
    let logical: LogicalSize<f32> = window.inner_size().to_logical(scale);
    Viewport::new(logical.width, logical.height).with_pixel_ratio(scale as f32)
}

fn load_track() -> anyhow::Result<CaptionTrack> {
    match std::env::args().nth(1) {
        Some(path) => {
            let src = std::fs::read_to_string(&path)
                .with_context(|| format!("reading captions from {}", path))?;
            let track = CaptionTrack::parse_lrc(&src).with_context(|| format!("parsing {}", path))?;
            log::info!("[lyrics] {} captions from {}", track.len(), path);
            Ok(track)
        }
        None => Ok(CaptionTrack::parse_lrc(DEMO_CAPTIONS_LRC)?),
    }
}

/// Next value for the selected parameter after an Up (+1) or Down (-1) press.
fn nudged(name: ParamName, current: f32, direction: f32) -> f32 {
    let (min, max) = name.range();
    (current + direction * (max - min) * NUDGE_FRACTION).clamp(min, max)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let track = load_track()?;
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(1280.0, 720.0))
            .build(&event_loop)?,
    );

    let config = VisualizerConfig::default();
    let viewport = window_viewport(&window);
    let mesh = torus_wireframe(&config.layout.torus_for(viewport));
    let (w, h) = viewport.pixel_size();
    let renderer = pollster::block_on(GpuRenderer::new(window.clone(), w, h, &mesh))?;

    let mut transport = Transport::new(track.last_time() + TRACK_TAIL_SEC);
    log::info!(
        "[transport] {:.1}s; Space play/pause, Left/Right seek, Home restart, 1-6 + Up/Down tune",
        transport.duration()
    );
    let captions = TitleCaption {
        window: window.clone(),
    };
    let mut driver = FrameDriver::new(config, track, viewport, renderer, captions);
    driver.handle(InputEvent::Audio(torus_core::AudioEvent::Loaded));

    let amplitude: mic::SharedAmplitude = Arc::new(Mutex::new(None));
    let _stream = match mic::start_capture(amplitude.clone()) {
        Ok(s) => Some(s),
        Err(e) => {
            log::warn!("[mic] capture unavailable: {:?}", e);
            None
        }
    };

    let clock = InstantClock::new();
    let mut selected = ParamName::Red;
    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                driver.handle(InputEvent::Resized(window_viewport(&window)));
            }
            WindowEvent::CursorMoved { position, .. } => {
                let p = position.to_logical::<f32>(window.scale_factor());
                driver.handle(InputEvent::PointerMoved {
                    client_x: p.x,
                    client_y: p.y,
                });
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                let now = Instant::now();
                let audio: TransportEvents = match logical_key.as_ref() {
                    Key::Named(NamedKey::Space) => transport.toggle(now),
                    Key::Named(NamedKey::ArrowLeft) => {
                        smallvec![transport.seek_by(-SEEK_STEP_SEC, now)]
                    }
                    Key::Named(NamedKey::ArrowRight) => {
                        smallvec![transport.seek_by(SEEK_STEP_SEC, now)]
                    }
                    Key::Named(NamedKey::Home) => smallvec![transport.seek_to(0.0, now)],
                    Key::Named(k @ (NamedKey::ArrowUp | NamedKey::ArrowDown)) => {
                        let dir = if k == NamedKey::ArrowUp { 1.0 } else { -1.0 };
                        let v = nudged(selected, driver.params().get(selected), dir);
                        driver.handle(InputEvent::ParamChanged(selected, v));
                        log::info!("[params] {} = {:.2}", selected.key(), v);
                        TransportEvents::new()
                    }
                    Key::Character(c) => {
                        let picked = c
                            .parse::<usize>()
                            .ok()
                            .and_then(|n| n.checked_sub(1))
                            .and_then(|i| ParamName::ALL.get(i).copied());
                        if let Some(name) = picked {
                            selected = name;
                            log::info!("[params] selected {}", name.key());
                        }
                        TransportEvents::new()
                    }
                    _ => TransportEvents::new(),
                };
                for ev in audio {
                    driver.handle(InputEvent::Audio(ev));
                }
            }
            _ => {}
        },
        Event::AboutToWait => {
            let now = Instant::now();
            if let Some(ev) = transport.poll_end(now) {
                driver.handle(InputEvent::Audio(ev));
            }
            let input = TickInput {
                elapsed_sec: clock.elapsed_sec(),
                playback_sec: Some(transport.position(now)),
                amplitude: amplitude.lock().ok().and_then(|a| *a),
            };
            match driver.tick(input) {
                Ok(()) => window.request_redraw(),
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    driver.renderer_mut().reconfigure()
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("render error: out of memory");
                    elwt.exit();
                }
                Err(e) => log::error!("render error: {:?}", e),
            }
        }
        _ => {}
    })?;
    Ok(())
}
