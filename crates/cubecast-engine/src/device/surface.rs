use winit::dpi::PhysicalSize;

use super::SurfaceErrorAction;

/// Picks a surface format from the adapter-reported list.
///
/// With `prefer_srgb` an sRGB 8-bit format wins; without it, the first format
/// that is not sRGB wins. Either way the first reported format is the fallback.
pub(crate) fn choose_surface_format(
    formats: &[wgpu::TextureFormat],
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    let first = *formats.first()?;

    let preferred = if prefer_srgb {
        [
            wgpu::TextureFormat::Bgra8UnormSrgb,
            wgpu::TextureFormat::Rgba8UnormSrgb,
        ]
        .into_iter()
        .find(|f| formats.contains(f))
    } else {
        formats.iter().copied().find(|f| !f.is_srgb())
    };

    Some(preferred.unwrap_or(first))
}

pub(crate) fn choose_alpha_mode(
    modes: &[wgpu::CompositeAlphaMode],
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| modes.contains(m))
        .or_else(|| modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// Whether wgpu accepts a surface of this size. wgpu rejects 0x0 surfaces.
pub(crate) fn is_drawable(size: PhysicalSize<u32>) -> bool {
    size.width > 0 && size.height > 0
}

/// Applies a new drawable size to the surface configuration.
///
/// For a 0x0 size only `size` is updated and configuration is deferred until
/// a non-zero size arrives. Returns whether the surface was reconfigured.
pub(crate) fn apply_resize(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &mut wgpu::SurfaceConfiguration,
    size: &mut PhysicalSize<u32>,
    new_size: PhysicalSize<u32>,
) -> bool {
    *size = new_size;
    if !is_drawable(new_size) {
        return false;
    }

    config.width = new_size.width;
    config.height = new_size.height;
    surface.configure(device, config);
    true
}

/// Decides how the runtime reacts to a failed frame acquisition.
///
/// A lost or outdated surface can only be reconfigured at a drawable size;
/// while minimized the frame is skipped and the next resize redraws.
pub(crate) fn classify_surface_error(
    err: &wgpu::SurfaceError,
    size: PhysicalSize<u32>,
) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
            if is_drawable(size) {
                SurfaceErrorAction::Reconfigured
            } else {
                SurfaceErrorAction::SkipFrame
            }
        }
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

pub(crate) fn map_surface_error(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    err: wgpu::SurfaceError,
) -> SurfaceErrorAction {
    let action = classify_surface_error(&err, size);
    if action == SurfaceErrorAction::Reconfigured {
        surface.configure(device, config);
    }
    action
}
