mod helpers;
mod post;
mod scene;
mod targets;

use post::{PostBindGroups, PostResources};
use scene::ScenePass;
use targets::RenderTargets;
use torus_core::{FrameView, Renderer, WireframeMesh};

/// Surface, device and the full scene + bloom chain.
pub struct GpuRenderer<'w> {
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    scene: ScenePass,
    post: PostResources,
    targets: RenderTargets,
    bind_groups: PostBindGroups,
    sample_count: u32,
}

impl<'w> GpuRenderer<'w> {
    pub async fn new(
        target: impl Into<wgpu::SurfaceTarget<'w>>,
        width: u32,
        height: u32,
        mesh: &WireframeMesh,
    ) -> anyhow::Result<Self> {
        let width = width.max(1);
        let height = height.max(1);
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(target)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!("request_device error: {:?}", e))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("[render] surface {:?} {}x{}", format, width, height);

        let sample_count = targets::scene_sample_count(&adapter);
        log::info!("[render] scene MSAA {}x", sample_count);
        let scene = ScenePass::new(&device, mesh, sample_count);
        let post = PostResources::new(&device, format);
        let targets = RenderTargets::new(&device, width, height, sample_count);
        let bind_groups = post.bind_groups(&device, &targets);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            scene,
            post,
            targets,
            bind_groups,
            sample_count,
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Re-apply the current configuration after the surface was lost.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    fn draw(&mut self, view: &FrameView<'_>) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let swap_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.scene.write_uniforms(&self.queue, &view.uniform_block());
        self.post
            .write_uniforms(&self.queue, self.targets.bloom_size, view.bloom);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        let (scene_view, resolve) = self.targets.scene_attachment();
        self.scene.draw(&mut encoder, scene_view, resolve);
        post::blit(
            &mut encoder,
            "bright_pass",
            &self.targets.bloom_a_view,
            &self.post.bright_pipeline,
            &self.bind_groups.hdr,
            None,
        );
        post::blit(
            &mut encoder,
            "blur_h",
            &self.targets.bloom_b_view,
            &self.post.blur_pipeline,
            &self.bind_groups.blur_h,
            None,
        );
        post::blit(
            &mut encoder,
            "blur_v",
            &self.targets.bloom_a_view,
            &self.post.blur_pipeline,
            &self.bind_groups.blur_v,
            None,
        );
        post::blit(
            &mut encoder,
            "composite",
            &swap_view,
            &self.post.composite_pipeline,
            &self.bind_groups.hdr,
            Some(&self.bind_groups.bloom_only),
        );

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

impl Renderer for GpuRenderer<'_> {
    type Error = wgpu::SurfaceError;

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if (width, height) == self.size() {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.targets = RenderTargets::new(&self.device, width, height, self.sample_count);
        self.bind_groups = self.post.bind_groups(&self.device, &self.targets);
        log::debug!("[render] resized to {}x{}", width, height);
    }

    fn render(&mut self, view: &FrameView<'_>) -> Result<(), Self::Error> {
        self.draw(view)
    }
}
