//! Shader uniform set and the bridge that keeps it current.

use crate::camera::Camera;
use crate::constants::FREQUENCY_DISPLACEMENT_DIVISOR;
use crate::params::{ColorChannel, Params};
use glam::Mat4;

/// What the frequency uniform does while no analyser sample is available.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FrequencyPolicy {
    /// Keep the last sample.
    #[default]
    HoldLast,
    /// Drop to silence.
    ResetToZero,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UniformSet {
    pub time: f32,
    pub frequency: f32,
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl UniformSet {
    pub fn from_params(p: &Params) -> Self {
        Self {
            time: 0.0,
            frequency: 0.0,
            red: p.red,
            green: p.green,
            blue: p.blue,
        }
    }

    pub fn set_color(&mut self, channel: ColorChannel, value: f32) {
        match channel {
            ColorChannel::Red => self.red = value,
            ColorChannel::Green => self.green = value,
            ColorChannel::Blue => self.blue = value,
        }
    }

    pub fn color(&self) -> [f32; 3] {
        [self.red, self.green, self.blue]
    }
}

impl Default for UniformSet {
    fn default() -> Self {
        Self::from_params(&Params::default())
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct UniformBridge {
    pub policy: FrequencyPolicy,
}

impl UniformBridge {
    pub fn new(policy: FrequencyPolicy) -> Self {
        Self { policy }
    }

    /// Write the per-frame signals. Colours are left alone; they only move on
    /// parameter change.
    pub fn update(&self, uniforms: &mut UniformSet, elapsed_sec: f32, amplitude: Option<f32>) {
        uniforms.time = elapsed_sec;
        match (amplitude, self.policy) {
            (Some(a), _) => uniforms.frequency = a,
            (None, FrequencyPolicy::HoldLast) => {}
            (None, FrequencyPolicy::ResetToZero) => uniforms.frequency = 0.0,
        }
    }
}

/// GPU layout of the scene uniforms. Matches `Uniforms` in `torus.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct UniformBlock {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub time: f32,
    pub frequency: f32,
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub displacement_divisor: f32,
    pub _pad: [f32; 2],
}

impl UniformBlock {
    pub fn pack(uniforms: &UniformSet, camera: &Camera, mesh_scale: f32) -> Self {
        let view_proj = camera.projection_matrix() * camera.view_matrix();
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            model: Mat4::from_scale(glam::Vec3::splat(mesh_scale)).to_cols_array_2d(),
            time: uniforms.time,
            frequency: uniforms.frequency,
            red: uniforms.red,
            green: uniforms.green,
            blue: uniforms.blue,
            displacement_divisor: FREQUENCY_DISPLACEMENT_DIVISOR,
            _pad: [0.0; 2],
        }
    }
}
