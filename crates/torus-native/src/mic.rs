//! Default input device capture via `cpal`. The callback thread publishes the
//! latest amplitude; the render loop only reads it.

use crate::analyser::SpectrumAnalyser;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SizedSample};
use std::sync::{Arc, Mutex};
use torus_core::ANALYSER_FFT_SIZE;

pub type SharedAmplitude = Arc<Mutex<Option<f32>>>;

pub fn start_capture(latest: SharedAmplitude) -> anyhow::Result<cpal::Stream> {
    let host = cpal::default_host();
    let device = host
        .default_input_device()
        .ok_or_else(|| anyhow::anyhow!("no input device"))?;
    let config = device.default_input_config()?;
    log::info!(
        "[mic] {} @ {} Hz, {} ch, {:?}",
        device.name().unwrap_or_else(|_| "input".into()),
        config.sample_rate().0,
        config.channels(),
        config.sample_format()
    );
    let channels = config.channels() as usize;
    let stream = match config.sample_format() {
        cpal::SampleFormat::F32 => build_stream::<f32>(&device, &config.into(), channels, latest)?,
        cpal::SampleFormat::I16 => build_stream::<i16>(&device, &config.into(), channels, latest)?,
        cpal::SampleFormat::U16 => build_stream::<u16>(&device, &config.into(), channels, latest)?,
        other => anyhow::bail!("unsupported sample format {:?}", other),
    };
    stream.play()?;
    Ok(stream)
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    channels: usize,
    latest: SharedAmplitude,
) -> Result<cpal::Stream, cpal::BuildStreamError>
where
    T: SizedSample,
    f32: FromSample<T>,
{
    let mut analyser = SpectrumAnalyser::new(ANALYSER_FFT_SIZE);
    let mut mono: Vec<f32> = Vec::new();
    device.build_input_stream(
        config,
        move |data: &[T], _: &cpal::InputCallbackInfo| {
            mono.clear();
            mono.extend(data.chunks(channels.max(1)).map(|frame| {
                frame.iter().map(|&s| f32::from_sample(s)).sum::<f32>() / frame.len() as f32
            }));
            if let Some(amp) = analyser.push_samples(&mono) {
                if let Ok(mut slot) = latest.lock() {
                    *slot = Some(amp);
                }
            }
        },
        |err| log::error!("[mic] stream error: {err}"),
        None,
    )
}
