/// Depth buffer matching the surface size.
///
/// Sample count is fixed at 1 to match the single-sampled surface.
pub struct DepthTarget {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
}

impl DepthTarget {
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    /// Depth value the buffer is cleared to before each draw (far plane).
    pub const CLEAR: f32 = 1.0;

    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let (texture, view) = Self::make(device, width, height);
        Self { texture, view }
    }

    /// Recreates the texture if the size changed. Zero sizes are ignored.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        let current = self.texture.size();
        if current.width == width && current.height == height {
            return;
        }

        let (texture, view) = Self::make(device, width, height);
        self.texture = texture;
        self.view = view;
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    fn make(device: &wgpu::Device, width: u32, height: u32) -> (wgpu::Texture, wgpu::TextureView) {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("cubecast depth texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        (texture, view)
    }
}
