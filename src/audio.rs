//! Track playback through an `<audio>` element, analysed by WebAudio.
//!
//! The element exists from startup so media events flow into the queue, but
//! the `AudioContext` graph is only built on the first user gesture.

use crate::events::{listen, EventQueue};
use torus_core::{
    average_frequency, AudioEvent, ContextState, GestureAction, InputEvent, ResumeGate,
    ANALYSER_FFT_SIZE, ANALYSER_MAX_DB, ANALYSER_MIN_DB,
};
use web_sys as web;

struct AudioGraph {
    ctx: web::AudioContext,
    analyser: web::AnalyserNode,
    _source: web::MediaElementAudioSourceNode,
}

pub struct TrackAudio {
    element: web::HtmlAudioElement,
    graph: Option<AudioGraph>,
    gate: ResumeGate,
    bins: Vec<u8>,
}

fn context_state(state: web::AudioContextState) -> ContextState {
    match state {
        web::AudioContextState::Running => ContextState::Running,
        web::AudioContextState::Closed => ContextState::Closed,
        _ => ContextState::Suspended,
    }
}

fn build_graph(element: &web::HtmlAudioElement) -> anyhow::Result<AudioGraph> {
    let ctx = web::AudioContext::new().map_err(|e| anyhow::anyhow!("AudioContext: {:?}", e))?;
    let source = ctx
        .create_media_element_source(element)
        .map_err(|e| anyhow::anyhow!("media source: {:?}", e))?;
    let analyser = ctx
        .create_analyser()
        .map_err(|e| anyhow::anyhow!("AnalyserNode: {:?}", e))?;
    analyser.set_fft_size(ANALYSER_FFT_SIZE as u32);
    analyser.set_min_decibels(ANALYSER_MIN_DB as f64);
    analyser.set_max_decibels(ANALYSER_MAX_DB as f64);
    source
        .connect_with_audio_node(&analyser)
        .map_err(|e| anyhow::anyhow!("connect source: {:?}", e))?;
    analyser
        .connect_with_audio_node(&ctx.destination())
        .map_err(|e| anyhow::anyhow!("connect analyser: {:?}", e))?;
    Ok(AudioGraph {
        ctx,
        analyser,
        _source: source,
    })
}

impl TrackAudio {
    pub fn new(src: &str, queue: &EventQueue) -> anyhow::Result<Self> {
        let element = web::HtmlAudioElement::new_with_src(src)
            .map_err(|e| anyhow::anyhow!("<audio>: {:?}", e))?;
        element.set_preload("auto");
        wire_media_events(&element, queue);
        Ok(Self {
            element,
            graph: None,
            gate: ResumeGate::default(),
            bins: Vec::new(),
        })
    }

    pub fn on_gesture(&mut self) {
        let state = self.graph.as_ref().map(|g| context_state(g.ctx.state()));
        match self.gate.on_gesture(state) {
            GestureAction::Start => {
                if let Err(e) = self.start() {
                    log::error!("[audio] start failed: {:?}", e);
                }
            }
            GestureAction::Resume => {
                if let Some(g) = &self.graph {
                    log::info!("[audio] resuming suspended context");
                    _ = g.ctx.resume();
                }
            }
            GestureAction::Nothing => {}
        }
    }

    fn start(&mut self) -> anyhow::Result<()> {
        if self.graph.is_none() {
            self.graph = Some(build_graph(&self.element)?);
            log::info!("[audio] graph ready (fft={})", ANALYSER_FFT_SIZE);
        }
        if let Some(g) = &self.graph {
            if g.ctx.state() == web::AudioContextState::Suspended {
                _ = g.ctx.resume();
            }
        }
        self.element
            .play()
            .map_err(|e| anyhow::anyhow!("play: {:?}", e))?;
        Ok(())
    }

    /// Average analyser bin, `None` until the graph exists.
    pub fn amplitude(&mut self) -> Option<f32> {
        let g = self.graph.as_ref()?;
        let n = g.analyser.frequency_bin_count() as usize;
        if self.bins.len() != n {
            self.bins.resize(n, 0);
        }
        g.analyser.get_byte_frequency_data(&mut self.bins);
        Some(average_frequency(&self.bins))
    }

    pub fn playback_sec(&self) -> Option<f64> {
        self.graph.as_ref().map(|_| self.element.current_time())
    }
}

fn wire_media_events(element: &web::HtmlAudioElement, queue: &EventQueue) {
    let simple = [
        ("canplay", AudioEvent::Loaded),
        ("play", AudioEvent::Play),
        ("pause", AudioEvent::Pause),
        ("ended", AudioEvent::Ended),
    ];
    for (name, event) in simple {
        let queue = queue.clone();
        listen(element, name, move |_: web::Event| {
            queue.push(InputEvent::Audio(event));
        });
    }
    let queue = queue.clone();
    let el = element.clone();
    listen(element, "seeked", move |_: web::Event| {
        queue.push(InputEvent::Audio(AudioEvent::Seeked(el.current_time())));
    });
}
