use crate::render::RenderTarget;

/// A texture view the wgpu device renders batches into.
///
/// Either wraps a view owned by the host (a swapchain frame, say) or owns an
/// offscreen texture.
pub struct WgpuTarget {
    view: wgpu::TextureView,
    texture: Option<wgpu::Texture>,
    format: wgpu::TextureFormat,
    width: u32,
    height: u32,
}

impl WgpuTarget {
    /// Wraps an existing view of a `width`×`height` texture of `format`.
    pub fn from_view(view: wgpu::TextureView, format: wgpu::TextureFormat, width: u32, height: u32) -> Self {
        Self { view, texture: None, format, width, height }
    }

    /// Creates an offscreen color target that can also be sampled or copied from.
    pub fn offscreen(device: &wgpu::Device, width: u32, height: u32, format: wgpu::TextureFormat) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("tessel offscreen target"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { view, texture: Some(texture), format, width, height }
    }

    #[inline]
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    /// The owned texture, for offscreen targets.
    #[inline]
    pub fn texture(&self) -> Option<&wgpu::Texture> {
        self.texture.as_ref()
    }

    #[inline]
    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }
}

impl RenderTarget for WgpuTarget {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
