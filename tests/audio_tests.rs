// Host-side tests for the audio source state machine, the resume gate and
// the analyser helpers.

use torus_core::*;

#[test]
fn playback_lifecycle() {
    let s = AudioSourceState::default();
    assert_eq!(s, AudioSourceState::Unloaded);
    let (s, a) = s.on_event(AudioEvent::Loaded);
    assert_eq!((s, a), (AudioSourceState::Loaded, CursorAction::None));
    let (s, _) = s.on_event(AudioEvent::Play);
    assert!(s.is_playing());
    let (s, _) = s.on_event(AudioEvent::Pause);
    assert_eq!(s, AudioSourceState::Loaded);
    let (s, _) = s.on_event(AudioEvent::Play);
    let (s, a) = s.on_event(AudioEvent::Ended);
    assert_eq!((s, a), (AudioSourceState::Ended, CursorAction::Reset));
    let (s, _) = s.on_event(AudioEvent::Play);
    assert!(s.is_playing());
}

#[test]
fn seek_requests_cursor_seek_once_loaded() {
    let (s, a) = AudioSourceState::Unloaded.on_event(AudioEvent::Seeked(3.0));
    assert_eq!((s, a), (AudioSourceState::Unloaded, CursorAction::None));
    for state in [
        AudioSourceState::Loaded,
        AudioSourceState::Playing,
        AudioSourceState::Ended,
    ] {
        assert_eq!(
            state.on_event(AudioEvent::Seeked(3.0)),
            (state, CursorAction::Seek(3.0))
        );
    }
}

#[test]
fn out_of_place_events_are_ignored() {
    assert_eq!(
        AudioSourceState::Loaded.on_event(AudioEvent::Pause),
        (AudioSourceState::Loaded, CursorAction::None)
    );
    assert_eq!(
        AudioSourceState::Playing.on_event(AudioEvent::Loaded),
        (AudioSourceState::Playing, CursorAction::None)
    );
}

#[test]
fn first_gesture_starts_audio() {
    let mut gate = ResumeGate::default();
    assert!(!gate.started());
    assert_eq!(gate.on_gesture(None), GestureAction::Start);
    assert!(gate.started());
}

#[test]
fn later_gestures_retry_until_running() {
    let mut gate = ResumeGate::default();
    gate.on_gesture(None);
    assert_eq!(
        gate.on_gesture(Some(ContextState::Suspended)),
        GestureAction::Resume
    );
    assert_eq!(
        gate.on_gesture(Some(ContextState::Suspended)),
        GestureAction::Resume
    );
    assert_eq!(
        gate.on_gesture(Some(ContextState::Running)),
        GestureAction::Nothing
    );
    assert_eq!(
        gate.on_gesture(Some(ContextState::Closed)),
        GestureAction::Nothing
    );
    // start failed earlier: no context yet, try again
    assert_eq!(gate.on_gesture(None), GestureAction::Start);
}

#[test]
fn average_frequency_is_mean_of_bins() {
    assert_eq!(average_frequency(&[]), 0.0);
    assert_eq!(average_frequency(&[0, 255]), 127.5);
    assert_eq!(average_frequency(&[10; 16]), 10.0);
}

#[test]
fn magnitudes_map_onto_decibel_window() {
    let mut out = Vec::new();
    // 1e-5 = -100 dB, 1e-1.5 ~ -30 dB, 1.0 = 0 dB
    bytes_from_magnitudes(&[0.0, 1e-5, 1.0], &mut out);
    assert_eq!(out[0], 0);
    assert_eq!(out[1], 0);
    assert_eq!(out[2], 255);

    // -65 dB sits half way
    let mid = 10f32.powf(-65.0 / 20.0);
    bytes_from_magnitudes(&[mid], &mut out);
    assert_eq!(out.len(), 1);
    assert!((126..=128).contains(&out[0]), "got {}", out[0]);
}
