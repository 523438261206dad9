//! Time sources and the frame loop abstraction.
//!
//! The display-refresh callback is modelled as a [`FrameLoop`] that calls a
//! tick closure until it asks to stop. Tests drive the same closure with a
//! [`SteppedLoop`] and a [`ManualClock`].

use instant::Instant;
use std::cell::Cell;

pub trait Clock {
    /// Seconds since the clock started.
    fn elapsed_sec(&self) -> f32;
}

pub struct InstantClock {
    start: Instant,
}

impl InstantClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for InstantClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for InstantClock {
    fn elapsed_sec(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f32>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, sec: f32) {
        self.now.set(sec);
    }

    pub fn advance(&self, dt: f32) {
        self.now.set(self.now.get() + dt);
    }
}

impl Clock for ManualClock {
    fn elapsed_sec(&self) -> f32 {
        self.now.get()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

pub trait FrameLoop {
    /// Call `tick` once per frame until it returns [`LoopControl::Exit`] or
    /// the host tears the loop down.
    fn run<F>(self, tick: F)
    where
        F: FnMut() -> LoopControl + 'static;
}

/// Runs at most `max_ticks` ticks back to back.
#[derive(Clone, Copy, Debug)]
pub struct SteppedLoop {
    pub max_ticks: usize,
}

impl FrameLoop for SteppedLoop {
    fn run<F>(self, mut tick: F)
    where
        F: FnMut() -> LoopControl + 'static,
    {
        for _ in 0..self.max_ticks {
            if tick() == LoopControl::Exit {
                break;
            }
        }
    }
}
