use super::helpers;

pub(crate) const HDR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;

pub(crate) fn scene_sample_count(adapter: &wgpu::Adapter) -> u32 {
    sample_count_for(adapter.get_texture_format_features(HDR_FORMAT).flags)
}

/// Highest of 4x/2x MSAA the format flags allow, else 1.
fn sample_count_for(flags: wgpu::TextureFormatFeatureFlags) -> u32 {
    if flags.contains(wgpu::TextureFormatFeatureFlags::MULTISAMPLE_X4) {
        4
    } else if flags.contains(wgpu::TextureFormatFeatureFlags::MULTISAMPLE_X2) {
        2
    } else {
        1
    }
}

/// Offscreen color targets for the post-processing chain.
///
/// - `hdr_*` hold the scene color at full resolution.
/// - `msaa_*` is the multisampled scene attachment resolved into `hdr_*`,
///   absent when the adapter cannot multisample the HDR format.
/// - `bloom_*` are half-res ping-pong buffers for bright-pass and blur.
pub(crate) struct RenderTargets {
    pub(crate) hdr_view: wgpu::TextureView,
    pub(crate) bloom_a_view: wgpu::TextureView,
    pub(crate) bloom_b_view: wgpu::TextureView,
    pub(crate) bloom_size: [u32; 2],
    msaa: Option<(wgpu::Texture, wgpu::TextureView)>,
    _hdr_tex: wgpu::Texture,
    _bloom_a: wgpu::Texture,
    _bloom_b: wgpu::Texture,
}

impl RenderTargets {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32, sample_count: u32) -> Self {
        let (hdr_tex, hdr_view) =
            helpers::create_color_texture(device, "hdr_tex", width, height, HDR_FORMAT);
        let msaa = (sample_count > 1).then(|| {
            helpers::create_msaa_texture(device, "hdr_msaa", width, height, HDR_FORMAT, sample_count)
        });
        let bw = (width.max(1) / 2).max(1);
        let bh = (height.max(1) / 2).max(1);
        let (bloom_a, bloom_a_view) =
            helpers::create_color_texture(device, "bloom_a", bw, bh, HDR_FORMAT);
        let (bloom_b, bloom_b_view) =
            helpers::create_color_texture(device, "bloom_b", bw, bh, HDR_FORMAT);
        Self {
            hdr_view,
            bloom_a_view,
            bloom_b_view,
            bloom_size: [bw, bh],
            msaa,
            _hdr_tex: hdr_tex,
            _bloom_a: bloom_a,
            _bloom_b: bloom_b,
        }
    }

    /// Scene pass attachment and its resolve target.
    pub(crate) fn scene_attachment(&self) -> (&wgpu::TextureView, Option<&wgpu::TextureView>) {
        match &self.msaa {
            Some((_, msaa_view)) => (msaa_view, Some(&self.hdr_view)),
            None => (&self.hdr_view, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::TextureFormatFeatureFlags as F;

    #[test]
    fn prefers_four_samples() {
        assert_eq!(sample_count_for(F::MULTISAMPLE_X2 | F::MULTISAMPLE_X4), 4);
        assert_eq!(sample_count_for(F::MULTISAMPLE_X2), 2);
    }

    #[test]
    fn single_sample_without_msaa_support() {
        assert_eq!(sample_count_for(F::FILTERABLE), 1);
        assert_eq!(sample_count_for(F::empty()), 1);
    }
}
