//! Wall-clock stand-in for track playback. Produces the same media events a
//! browser `<audio>` element would.

use smallvec::{smallvec, SmallVec};
use std::time::Instant;
use torus_core::AudioEvent;

/// Events from one transport action, in the order a browser fires them.
pub type TransportEvents = SmallVec<[AudioEvent; 2]>;

pub const SEEK_STEP_SEC: f64 = 5.0;
/// Silence kept after the last caption before the track ends.
pub const TRACK_TAIL_SEC: f64 = 5.0;

#[derive(Debug)]
pub struct Transport {
    duration: f64,
    offset: f64,
    started_at: Option<Instant>,
}

impl Transport {
    pub fn new(duration: f64) -> Self {
        Self {
            duration: duration.max(0.0),
            offset: 0.0,
            started_at: None,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn position(&self, now: Instant) -> f64 {
        let running = self
            .started_at
            .map(|t| now.saturating_duration_since(t).as_secs_f64())
            .unwrap_or(0.0);
        (self.offset + running).min(self.duration)
    }

    /// Play or pause. Playing from the very end restarts the track, which is
    /// reported as a seek to 0 before the play.
    pub fn toggle(&mut self, now: Instant) -> TransportEvents {
        if self.is_playing() {
            self.offset = self.position(now);
            self.started_at = None;
            return smallvec![AudioEvent::Pause];
        }
        let mut events = TransportEvents::new();
        if self.offset >= self.duration {
            events.push(self.seek_to(0.0, now));
        }
        self.started_at = Some(now);
        events.push(AudioEvent::Play);
        events
    }

    pub fn seek_by(&mut self, delta: f64, now: Instant) -> AudioEvent {
        let target = (self.position(now) + delta).clamp(0.0, self.duration);
        self.seek_to(target, now)
    }

    pub fn seek_to(&mut self, target: f64, now: Instant) -> AudioEvent {
        self.offset = target.clamp(0.0, self.duration);
        if self.is_playing() {
            self.started_at = Some(now);
        }
        AudioEvent::Seeked(self.offset)
    }

    /// `Ended` once, when a playing transport reaches the end.
    pub fn poll_end(&mut self, now: Instant) -> Option<AudioEvent> {
        if self.is_playing() && self.position(now) >= self.duration {
            self.started_at = None;
            self.offset = 0.0;
            return Some(AudioEvent::Ended);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use torus_core::{
        CaptionTrack, FrameDriver, FrameView, InputEvent, Renderer, TickInput, Viewport,
        VisualizerConfig, DEMO_CAPTIONS_LRC, IDLE_CAPTION,
    };

    struct NoRender;

    impl Renderer for NoRender {
        type Error = ();
        fn resize(&mut self, _: u32, _: u32) {}
        fn render(&mut self, _: &FrameView<'_>) -> Result<(), ()> {
            Ok(())
        }
    }

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    #[test]
    fn play_pause_keeps_position() {
        let t0 = Instant::now();
        let mut tr = Transport::new(60.0);
        assert_eq!(tr.toggle(t0).as_slice(), &[AudioEvent::Play]);
        assert_eq!(tr.toggle(t0 + secs(3.0)).as_slice(), &[AudioEvent::Pause]);
        let p = tr.position(t0 + secs(100.0));
        assert!((p - 3.0).abs() < 1e-6);
    }

    #[test]
    fn seek_clamps_to_track() {
        let t0 = Instant::now();
        let mut tr = Transport::new(10.0);
        assert_eq!(tr.seek_by(-SEEK_STEP_SEC, t0), AudioEvent::Seeked(0.0));
        assert_eq!(tr.seek_by(25.0, t0), AudioEvent::Seeked(10.0));
    }

    #[test]
    fn seek_while_playing_continues_from_target() {
        let t0 = Instant::now();
        let mut tr = Transport::new(60.0);
        tr.toggle(t0);
        tr.seek_to(20.0, t0 + secs(2.0));
        let p = tr.position(t0 + secs(3.0));
        assert!((p - 21.0).abs() < 1e-6);
    }

    #[test]
    fn end_fires_once_and_rewinds() {
        let t0 = Instant::now();
        let mut tr = Transport::new(4.0);
        tr.toggle(t0);
        assert_eq!(tr.poll_end(t0 + secs(1.0)), None);
        assert_eq!(tr.poll_end(t0 + secs(4.5)), Some(AudioEvent::Ended));
        assert_eq!(tr.poll_end(t0 + secs(5.0)), None);
        assert!(!tr.is_playing());
        assert_eq!(tr.position(t0 + secs(6.0)), 0.0);
    }

    #[test]
    fn play_from_end_seeks_to_start_first() {
        let t0 = Instant::now();
        let mut tr = Transport::new(10.0);
        tr.seek_to(10.0, t0);
        let events = tr.toggle(t0);
        assert_eq!(
            events.as_slice(),
            &[AudioEvent::Seeked(0.0), AudioEvent::Play]
        );
        assert!((tr.position(t0 + secs(2.0)) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn replay_after_paused_seek_to_end_shows_captions() {
        let track = CaptionTrack::parse_lrc(DEMO_CAPTIONS_LRC).unwrap();
        let mut tr = Transport::new(track.last_time() + TRACK_TAIL_SEC);
        let mut driver = FrameDriver::new(
            VisualizerConfig::default(),
            track,
            Viewport::new(800.0, 600.0),
            NoRender,
            String::new(),
        );
        driver.handle(InputEvent::Audio(AudioEvent::Loaded));

        let t0 = Instant::now();
        for _ in 0..20 {
            driver.handle(InputEvent::Audio(tr.seek_by(SEEK_STEP_SEC, t0)));
        }
        assert_eq!(driver.cursor().current_index(), driver.track().len());

        for ev in tr.toggle(t0) {
            driver.handle(InputEvent::Audio(ev));
        }
        let later = t0 + secs(30.0);
        driver
            .tick(TickInput {
                elapsed_sec: 30.0,
                playback_sec: Some(tr.position(later)),
                amplitude: None,
            })
            .unwrap();
        assert_ne!(driver.captions(), IDLE_CAPTION);
        assert_eq!(driver.captions(), "Round and round");
    }
}
