//! wgpu renderer for the torus visualizer: a wireframe torus drawn into an
//! HDR target, followed by a bright pass, a separable blur and a composite
//! onto the swapchain.

mod gpu;

pub use gpu::GpuRenderer;

pub static TORUS_WGSL: &str = include_str!("../shaders/torus.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");
