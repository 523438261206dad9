//! Audio source state machine, context resume gate and analyser helpers.

use crate::constants::{ANALYSER_MAX_DB, ANALYSER_MIN_DB};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AudioSourceState {
    #[default]
    Unloaded,
    /// Decoded and ready, not playing.
    Loaded,
    Playing,
    Ended,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AudioEvent {
    Loaded,
    Play,
    Pause,
    Ended,
    Seeked(f64),
}

/// What the lyric cursor must do in response to a transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CursorAction {
    None,
    Seek(f64),
    Reset,
}

impl AudioSourceState {
    /// Apply `event`, returning the next state and the cursor follow-up.
    /// Events that make no sense in the current state leave it unchanged.
    pub fn on_event(self, event: AudioEvent) -> (AudioSourceState, CursorAction) {
        use AudioSourceState::*;
        match (self, event) {
            (Unloaded, AudioEvent::Loaded) => (Loaded, CursorAction::None),
            (_, AudioEvent::Play) => (Playing, CursorAction::None),
            (Playing, AudioEvent::Pause) => (Loaded, CursorAction::None),
            (_, AudioEvent::Ended) => (Ended, CursorAction::Reset),
            (Unloaded, AudioEvent::Seeked(_)) => (Unloaded, CursorAction::None),
            (state, AudioEvent::Seeked(t)) => (state, CursorAction::Seek(t)),
            (state, ev) => {
                log::debug!("[audio] ignoring {:?} while {:?}", ev, state);
                (state, CursorAction::None)
            }
        }
    }

    pub fn is_playing(self) -> bool {
        self == AudioSourceState::Playing
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContextState {
    Suspended,
    Running,
    Closed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureAction {
    /// Build the audio graph, load the track and ask the context to resume.
    Start,
    /// The context exists but is still suspended; ask again.
    Resume,
    Nothing,
}

/// Tracks whether audio has been unlocked by a user gesture.
///
/// Browsers keep an audio context suspended until a qualifying interaction.
/// The first gesture starts audio; every later gesture retries the resume
/// until the context reports running.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResumeGate {
    started: bool,
}

impl ResumeGate {
    pub fn on_gesture(&mut self, context: Option<ContextState>) -> GestureAction {
        if !self.started {
            self.started = true;
            return GestureAction::Start;
        }
        match context {
            Some(ContextState::Suspended) => GestureAction::Resume,
            None => GestureAction::Start,
            Some(_) => GestureAction::Nothing,
        }
    }

    pub fn started(&self) -> bool {
        self.started
    }
}

/// Mean of byte frequency bins, as reported by an analyser's average
/// frequency. Empty input averages to zero.
#[inline]
pub fn average_frequency(bins: &[u8]) -> f32 {
    if bins.is_empty() {
        return 0.0;
    }
    let sum: u32 = bins.iter().map(|&b| b as u32).sum();
    sum as f32 / bins.len() as f32
}

/// Map linear FFT magnitudes onto analyser bytes: decibels scaled from the
/// `[min_db, max_db]` window to `0..=255`, clamped at both ends.
pub fn bytes_from_magnitudes(magnitudes: &[f32], out: &mut Vec<u8>) {
    out.clear();
    let span = ANALYSER_MAX_DB - ANALYSER_MIN_DB;
    out.extend(magnitudes.iter().map(|&m| {
        let db = 20.0 * m.max(1e-12).log10();
        let norm = ((db - ANALYSER_MIN_DB) / span).clamp(0.0, 1.0);
        (norm * 255.0).floor() as u8
    }));
}
