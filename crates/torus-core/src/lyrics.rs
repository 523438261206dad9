//! Timed captions and the cursor that walks them during playback.
//!
//! The cursor keeps the index of the next caption to show. During playback it
//! only moves forward; a seek repositions it to the first caption that starts
//! after the new position, and the end of playback rewinds it to zero. The
//! track order is taken as given and never re-sorted.

use crate::error::CaptionError;
use smallvec::SmallVec;

#[derive(Clone, Debug, PartialEq)]
pub struct Caption {
    /// Start time in seconds from the beginning of the track.
    pub time: f64,
    pub text: String,
}

impl Caption {
    pub fn new(time: f64, text: impl Into<String>) -> Self {
        Self {
            time,
            text: text.into(),
        }
    }
}

/// Immutable caption list, in load order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CaptionTrack {
    captions: Vec<Caption>,
}

impl CaptionTrack {
    pub fn new(captions: Vec<Caption>) -> Self {
        let track = Self { captions };
        let inversions = track.inversions();
        if inversions > 0 {
            log::warn!(
                "[lyrics] {} caption(s) start before their predecessor; order kept as given",
                inversions
            );
        }
        track
    }

    /// Parse LRC text: `[mm:ss.xx] line`, several stamps per line allowed.
    /// Tag lines such as `[ar:Artist]` and blank lines are skipped. A leading
    /// byte order mark is ignored.
    pub fn parse_lrc(src: &str) -> Result<Self, CaptionError> {
        let src = src.strip_prefix('\u{feff}').unwrap_or(src);
        let mut captions = Vec::new();
        for (n, raw) in src.lines().enumerate() {
            let line_no = n + 1;
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let mut rest = line;
            let mut stamps: SmallVec<[f64; 2]> = SmallVec::new();
            while let Some(after) = rest.strip_prefix('[') {
                let close = after
                    .find(']')
                    .ok_or(CaptionError::Unterminated { line: line_no })?;
                let inner = &after[..close];
                rest = after[close + 1..].trim_start();
                if is_tag(inner) {
                    continue;
                }
                let secs = parse_stamp(inner).ok_or_else(|| CaptionError::BadTimestamp {
                    line: line_no,
                    stamp: inner.to_string(),
                })?;
                stamps.push(secs);
            }
            if stamps.is_empty() {
                if rest.len() == line.len() {
                    return Err(CaptionError::MissingTimestamp { line: line_no });
                }
                continue;
            }
            let text = rest.trim();
            for t in stamps {
                captions.push(Caption::new(t, text));
            }
        }
        Ok(Self::new(captions))
    }

    /// Copy of the track stably sorted by start time.
    pub fn into_sorted(mut self) -> Self {
        self.captions.sort_by(|a, b| a.time.total_cmp(&b.time));
        self
    }

    pub fn len(&self) -> usize {
        self.captions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.captions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Caption> {
        self.captions.get(index)
    }

    pub fn captions(&self) -> &[Caption] {
        &self.captions
    }

    /// Number of positions where a caption starts strictly before the one
    /// preceding it. Equal timestamps are not counted.
    pub fn inversions(&self) -> usize {
        self.captions
            .windows(2)
            .filter(|w| w[1].time < w[0].time)
            .count()
    }

    /// Time of the last caption, or 0 for an empty track.
    pub fn last_time(&self) -> f64 {
        self.captions.iter().map(|c| c.time).fold(0.0, f64::max)
    }
}

// Tags look like `ar:Artist`; timestamps start with a digit.
fn is_tag(inner: &str) -> bool {
    inner
        .split_once(':')
        .map(|(key, _)| !key.is_empty() && key.chars().all(|c| c.is_ascii_alphabetic()))
        .unwrap_or(false)
}

fn parse_stamp(inner: &str) -> Option<f64> {
    let (min, sec) = inner.split_once(':')?;
    let min: u32 = min.trim().parse().ok()?;
    let sec: f64 = sec.trim().parse().ok()?;
    if !(0.0..60.0).contains(&sec) {
        return None;
    }
    Some(min as f64 * 60.0 + sec)
}

/// Text surface for the active caption.
pub trait CaptionSink {
    fn set_text(&mut self, text: &str);
}

impl CaptionSink for String {
    fn set_text(&mut self, text: &str) {
        self.clear();
        self.push_str(text);
    }
}

/// How a seek affects the caption already on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SeekPolicy {
    /// Leave the text until playback crosses the next caption.
    #[default]
    Hold,
    /// Show the caption just before the new position right away.
    Repaint,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Displayed {
    #[default]
    Idle,
    Caption(usize),
}

/// Indices crossed by one advance, oldest first.
pub type Crossed = SmallVec<[usize; 4]>;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LyricCursor {
    index: usize,
    displayed: Displayed,
}

impl LyricCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn displayed(&self) -> Displayed {
        self.displayed
    }

    pub fn displayed_text<'a>(&self, track: &'a CaptionTrack, idle: &'a str) -> &'a str {
        match self.displayed {
            Displayed::Idle => idle,
            Displayed::Caption(i) => track.get(i).map(|c| c.text.as_str()).unwrap_or(idle),
        }
    }

    /// Consume every caption whose start time is at or before `t`. The last
    /// one crossed becomes the displayed caption.
    pub fn advance(&mut self, track: &CaptionTrack, t: f64) -> Crossed {
        let mut crossed = Crossed::new();
        while let Some(caption) = track.get(self.index) {
            if t < caption.time {
                break;
            }
            crossed.push(self.index);
            self.index += 1;
        }
        if let Some(&last) = crossed.last() {
            self.displayed = Displayed::Caption(last);
        }
        crossed
    }

    /// Reposition after a seek to `t`: the index of the first caption starting
    /// after `t`, or the track length if none does. Returns the new displayed
    /// state when the policy repaints.
    pub fn seek(&mut self, track: &CaptionTrack, t: f64, policy: SeekPolicy) -> Option<Displayed> {
        self.index = track
            .captions()
            .iter()
            .position(|c| c.time > t)
            .unwrap_or(track.len());
        match policy {
            SeekPolicy::Hold => None,
            SeekPolicy::Repaint => {
                self.displayed = match self.index {
                    0 => Displayed::Idle,
                    i => Displayed::Caption(i - 1),
                };
                Some(self.displayed)
            }
        }
    }

    pub fn reset(&mut self) {
        self.index = 0;
        self.displayed = Displayed::Idle;
    }
}
