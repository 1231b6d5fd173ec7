/// Represents a single acquired frame.
///
/// Short-lived: the surface texture is held until `Gpu::submit`, and holding it
/// blocks acquisition of the next one.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
