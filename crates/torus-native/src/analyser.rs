//! Microphone spectrum analysis shaped like a WebAudio `AnalyserNode`:
//! Blackman-windowed FFT, per-bin smoothing over time, decibel bytes.

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;
use torus_core::{average_frequency, bytes_from_magnitudes};

/// Matches the analyser node's default `smoothingTimeConstant`.
pub const SMOOTHING: f32 = 0.8;

pub struct SpectrumAnalyser {
    fft: Arc<dyn Fft<f32>>,
    size: usize,
    window: Vec<f32>,
    pending: Vec<f32>,
    scratch: Vec<Complex<f32>>,
    smoothed: Vec<f32>,
    bytes: Vec<u8>,
}

fn blackman(i: usize, n: usize) -> f32 {
    let a0 = 0.42;
    let a1 = 0.5;
    let a2 = 0.08;
    let x = std::f32::consts::TAU * i as f32 / n as f32;
    a0 - a1 * x.cos() + a2 * (2.0 * x).cos()
}

impl SpectrumAnalyser {
    pub fn new(fft_size: usize) -> Self {
        let size = fft_size.max(2);
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        Self {
            fft,
            size,
            window: (0..size).map(|i| blackman(i, size)).collect(),
            pending: Vec::with_capacity(size),
            scratch: vec![Complex::new(0.0, 0.0); size],
            smoothed: vec![0.0; size / 2],
            bytes: Vec::with_capacity(size / 2),
        }
    }

    pub fn bin_count(&self) -> usize {
        self.size / 2
    }

    /// Feed mono samples. Returns the average byte bin of the last full
    /// window analysed, or `None` if no window completed.
    pub fn push_samples(&mut self, samples: &[f32]) -> Option<f32> {
        let mut latest = None;
        for &s in samples {
            self.pending.push(s);
            if self.pending.len() == self.size {
                latest = Some(self.analyse());
                self.pending.clear();
            }
        }
        latest
    }

    fn analyse(&mut self) -> f32 {
        for (slot, (&s, &w)) in self
            .scratch
            .iter_mut()
            .zip(self.pending.iter().zip(&self.window))
        {
            *slot = Complex::new(s * w, 0.0);
        }
        self.fft.process(&mut self.scratch);
        let norm = 1.0 / self.size as f32;
        for (acc, c) in self.smoothed.iter_mut().zip(&self.scratch) {
            *acc = SMOOTHING * *acc + (1.0 - SMOOTHING) * c.norm() * norm;
        }
        bytes_from_magnitudes(&self.smoothed, &mut self.bytes);
        average_frequency(&self.bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silence_averages_to_zero() {
        let mut a = SpectrumAnalyser::new(32);
        assert_eq!(a.bin_count(), 16);
        assert_eq!(a.push_samples(&[0.0; 32]), Some(0.0));
    }

    #[test]
    fn partial_window_yields_nothing() {
        let mut a = SpectrumAnalyser::new(32);
        assert_eq!(a.push_samples(&[0.5; 31]), None);
        assert!(a.push_samples(&[0.5]).is_some());
    }

    #[test]
    fn loud_tone_rises_above_silence() {
        let mut a = SpectrumAnalyser::new(32);
        let tone: Vec<f32> = (0..32)
            .map(|i| (std::f32::consts::TAU * 4.0 * i as f32 / 32.0).sin())
            .collect();
        let mut last = 0.0;
        for _ in 0..20 {
            if let Some(v) = a.push_samples(&tone) {
                last = v;
            }
        }
        assert!(last > 0.0, "expected energy, got {last}");
    }
}
