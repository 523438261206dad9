use crate::camera::CameraDrift;
use crate::constants::*;
use crate::layout::LayoutPolicy;
use crate::lyrics::SeekPolicy;
use crate::params::Params;
use crate::uniforms::FrequencyPolicy;
use glam::Vec3;

/// Everything tunable about the visualizer, with defaults from `constants`.
#[derive(Clone, Debug)]
pub struct VisualizerConfig {
    pub params: Params,
    pub layout: LayoutPolicy,
    pub drift: CameraDrift,
    pub pointer_divisor: f32,
    pub camera_start: Vec3,
    pub frequency_policy: FrequencyPolicy,
    pub seek_policy: SeekPolicy,
    pub idle_caption: String,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            params: Params::default(),
            layout: LayoutPolicy::default(),
            drift: CameraDrift::default(),
            pointer_divisor: POINTER_DIVISOR,
            camera_start: Vec3::from(CAMERA_START),
            frequency_policy: FrequencyPolicy::default(),
            seek_policy: SeekPolicy::default(),
            idle_caption: IDLE_CAPTION.to_string(),
        }
    }
}
