//! Per-tick orchestration.
//!
//! [`FrameDriver`] owns every piece of mutable state (parameters, uniforms,
//! camera, pointer, layout, lyric cursor, audio state) together with the
//! renderer and caption sink it drives. Host events go through
//! [`FrameDriver::handle`] between ticks; [`FrameDriver::tick`] runs the fixed
//! per-frame sequence.

use crate::audio::{AudioEvent, AudioSourceState, CursorAction};
use crate::camera::{Camera, CameraDrift, PointerOffset};
use crate::config::VisualizerConfig;
use crate::layout::{Layout, Viewport};
use crate::lyrics::{CaptionSink, CaptionTrack, LyricCursor};
use crate::params::{BloomSettings, ParamBinding, ParamChange, ParamName, ParameterStore};
use crate::uniforms::{UniformBlock, UniformBridge, UniformSet};
use glam::Vec3;

/// Rendering collaborator.
pub trait Renderer {
    type Error: std::fmt::Debug;
    /// Match the output and post-processing targets to a new pixel size.
    fn resize(&mut self, width: u32, height: u32);
    /// Draw one frame through the full post-processing chain.
    fn render(&mut self, view: &FrameView<'_>) -> Result<(), Self::Error>;
}

/// Read-only snapshot handed to the renderer each frame.
pub struct FrameView<'a> {
    pub camera: &'a Camera,
    pub uniforms: &'a UniformSet,
    pub bloom: &'a BloomSettings,
    pub mesh_scale: f32,
}

impl FrameView<'_> {
    pub fn uniform_block(&self) -> UniformBlock {
        UniformBlock::pack(self.uniforms, self.camera, self.mesh_scale)
    }
}

/// Signals sampled by the host right before a tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickInput {
    /// Seconds since the visualizer started.
    pub elapsed_sec: f32,
    /// Current track position, when a track exists.
    pub playback_sec: Option<f64>,
    /// Latest analyser amplitude, `None` while no analyser is active.
    pub amplitude: Option<f32>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerMoved { client_x: f32, client_y: f32 },
    Resized(Viewport),
    ParamChanged(ParamName, f32),
    Audio(AudioEvent),
}

pub struct FrameDriver<R: Renderer, S: CaptionSink> {
    config: VisualizerConfig,
    params: ParameterStore,
    uniforms: UniformSet,
    bridge: UniformBridge,
    bloom: BloomSettings,
    drift: CameraDrift,
    camera: Camera,
    pointer: PointerOffset,
    layout: Layout,
    track: CaptionTrack,
    cursor: LyricCursor,
    audio: AudioSourceState,
    renderer: R,
    captions: S,
    frames: u64,
}

impl<R: Renderer, S: CaptionSink> FrameDriver<R, S> {
    pub fn new(
        config: VisualizerConfig,
        track: CaptionTrack,
        viewport: Viewport,
        mut renderer: R,
        mut captions: S,
    ) -> Self {
        let params = ParameterStore::new(config.params);
        let uniforms = UniformSet::from_params(params.values());
        let bloom = BloomSettings::from_params(params.values());
        let layout = Layout::new(&config.layout, viewport);
        let camera = Camera::new(config.camera_start, viewport.aspect());
        let (w, h) = viewport.pixel_size();
        renderer.resize(w, h);
        captions.set_text(&config.idle_caption);
        log::info!(
            "[frame] viewport={}x{} compact={} captions={}",
            w,
            h,
            layout.is_compact,
            track.len()
        );
        Self {
            bridge: UniformBridge::new(config.frequency_policy),
            drift: config.drift,
            config,
            params,
            uniforms,
            bloom,
            camera,
            pointer: PointerOffset::default(),
            layout,
            track,
            cursor: LyricCursor::new(),
            audio: AudioSourceState::Unloaded,
            renderer,
            captions,
            frames: 0,
        }
    }

    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMoved { client_x, client_y } => {
                let vp = self.layout.viewport;
                self.pointer = PointerOffset::from_client(
                    client_x,
                    client_y,
                    vp.width,
                    vp.height,
                    self.config.pointer_divisor,
                );
            }
            InputEvent::Resized(viewport) => self.resize(viewport),
            InputEvent::ParamChanged(name, value) => {
                self.set_param(name, value);
            }
            InputEvent::Audio(ev) => self.on_audio(ev),
        }
    }

    /// Store a parameter and push it to its binding before returning.
    pub fn set_param(&mut self, name: ParamName, value: f32) -> ParamChange {
        let change = self.params.set(name, value);
        match change.binding() {
            ParamBinding::Uniform(channel) => self.uniforms.set_color(channel, change.value),
            ParamBinding::Bloom(field) => self.bloom.set(field, change.value),
        }
        change
    }

    fn resize(&mut self, viewport: Viewport) {
        let was_compact = self.layout.is_compact;
        let (w, h) = self
            .layout
            .apply_resize(&self.config.layout, viewport, &mut self.camera);
        self.renderer.resize(w, h);
        if was_compact != self.layout.is_compact {
            log::info!(
                "[frame] compact={} mesh_scale={:.2}",
                self.layout.is_compact,
                self.layout.mesh_scale
            );
        }
    }

    fn on_audio(&mut self, event: AudioEvent) {
        let (next, action) = self.audio.on_event(event);
        if next != self.audio {
            log::info!("[audio] {:?} -> {:?}", self.audio, next);
        }
        self.audio = next;
        match action {
            CursorAction::None => {}
            CursorAction::Reset => {
                self.cursor.reset();
                self.captions.set_text(&self.config.idle_caption);
            }
            CursorAction::Seek(t) => {
                if self
                    .cursor
                    .seek(&self.track, t, self.config.seek_policy)
                    .is_some()
                {
                    let text = self
                        .cursor
                        .displayed_text(&self.track, &self.config.idle_caption);
                    self.captions.set_text(text);
                }
            }
        }
    }

    /// Run one frame: drift, look-at, uniforms, captions, render.
    pub fn tick(&mut self, input: TickInput) -> Result<(), R::Error> {
        self.drift.step(&mut self.camera, self.pointer);
        self.camera.look_at(Vec3::ZERO);

        self.bridge
            .update(&mut self.uniforms, input.elapsed_sec, input.amplitude);

        if self.audio.is_playing() {
            if let Some(t) = input.playback_sec {
                let crossed = self.cursor.advance(&self.track, t);
                if let Some(caption) = crossed.last().and_then(|&i| self.track.get(i)) {
                    self.captions.set_text(&caption.text);
                }
            }
        }

        self.frames += 1;
        let view = FrameView {
            camera: &self.camera,
            uniforms: &self.uniforms,
            bloom: &self.bloom,
            mesh_scale: self.layout.mesh_scale,
        };
        self.renderer.render(&view)
    }

    pub fn params(&self) -> &ParameterStore {
        &self.params
    }

    /// Register the external observer for `name`, replacing any earlier one.
    /// Values only change through [`Self::set_param`], so bindings stay in sync.
    pub fn observe(&mut self, name: ParamName, handler: impl FnMut(f32) + 'static) {
        self.params.on_change(name, handler);
    }

    pub fn uniforms(&self) -> &UniformSet {
        &self.uniforms
    }

    pub fn bloom(&self) -> &BloomSettings {
        &self.bloom
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn pointer(&self) -> PointerOffset {
        self.pointer
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn cursor(&self) -> &LyricCursor {
        &self.cursor
    }

    pub fn track(&self) -> &CaptionTrack {
        &self.track
    }

    pub fn audio_state(&self) -> AudioSourceState {
        self.audio
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn captions(&self) -> &S {
        &self.captions
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
