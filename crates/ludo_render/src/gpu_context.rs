//! wgpu surface, device and queue for a single window.

use std::sync::Arc;
use winit::window::Window;

/// Surface choices made by the host. The game presents with vsync by
/// default; the launcher is idle most of the time and prefers low power.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpuOptions {
    pub vsync: bool,
    pub low_power: bool,
}

impl Default for GpuOptions {
    fn default() -> Self {
        Self {
            vsync: true,
            low_power: false,
        }
    }
}

impl GpuOptions {
    pub fn tool() -> Self {
        Self {
            vsync: true,
            low_power: true,
        }
    }

    fn power_preference(&self) -> wgpu::PowerPreference {
        if self.low_power {
            wgpu::PowerPreference::LowPower
        } else {
            wgpu::PowerPreference::HighPerformance
        }
    }
}

pub struct GpuContext {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub surface_format: wgpu::TextureFormat,
    pub size: (u32, u32),
}

impl GpuContext {
    pub fn new(window: Arc<Window>, options: GpuOptions) -> Result<Self, String> {
        let size = window.inner_size();
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });
        let surface = instance
            .create_surface(window)
            .map_err(|e| format!("Failed to create surface: {e}"))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: options.power_preference(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| "No GPU adapter can present to this window".to_string())?;
        let info = adapter.get_info();
        log::info!("GPU adapter: {} ({:?})", info.name, info.backend);

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("Ludorium Device"),
                ..Default::default()
            },
            None,
        ))
        .map_err(|e| format!("Failed to create device: {e}"))?;

        let caps = surface.get_capabilities(&adapter);
        let surface_format = pick_format(&caps.formats)?;
        let present_mode = pick_present_mode(&caps.present_modes, options.vsync);
        log::debug!("Surface: {surface_format:?}, {present_mode:?}");

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            surface_format,
            size: (size.width, size.height),
        })
    }

    /// Zero-sized (minimised) windows keep the previous configuration.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.size = (width, height);
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    /// `None` means skip this frame; a lost or outdated surface is
    /// reconfigured for the next one.
    pub fn begin_frame(&self) -> Option<(wgpu::SurfaceTexture, wgpu::TextureView)> {
        match self.surface.get_current_texture() {
            Ok(output) => {
                let view = output
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());
                Some((output, view))
            }
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                None
            }
            Err(wgpu::SurfaceError::Timeout) => None,
            Err(e) => {
                log::error!("Surface error: {e}");
                None
            }
        }
    }
}

/// sRGB when offered, so palette colours come out as authored.
fn pick_format(formats: &[wgpu::TextureFormat]) -> Result<wgpu::TextureFormat, String> {
    formats
        .iter()
        .find(|f| f.is_srgb())
        .or_else(|| formats.first())
        .copied()
        .ok_or_else(|| "Surface reports no supported formats".to_string())
}

fn pick_present_mode(modes: &[wgpu::PresentMode], vsync: bool) -> wgpu::PresentMode {
    let wanted: &[wgpu::PresentMode] = if vsync {
        &[wgpu::PresentMode::Fifo]
    } else {
        &[wgpu::PresentMode::Mailbox, wgpu::PresentMode::Immediate]
    };
    wanted
        .iter()
        .find(|mode| modes.contains(mode))
        .copied()
        .unwrap_or(wgpu::PresentMode::Fifo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::{PresentMode, TextureFormat};

    #[test]
    fn format_prefers_srgb() {
        let formats = [TextureFormat::Bgra8Unorm, TextureFormat::Bgra8UnormSrgb];
        assert_eq!(pick_format(&formats), Ok(TextureFormat::Bgra8UnormSrgb));
        assert_eq!(
            pick_format(&[TextureFormat::Rgba8Unorm]),
            Ok(TextureFormat::Rgba8Unorm)
        );
        assert!(pick_format(&[]).is_err());
    }

    #[test]
    fn vsync_off_uses_fastest_supported_mode() {
        let modes = [PresentMode::Fifo, PresentMode::Immediate];
        assert_eq!(pick_present_mode(&modes, false), PresentMode::Immediate);
        assert_eq!(pick_present_mode(&modes, true), PresentMode::Fifo);
        assert_eq!(pick_present_mode(&[PresentMode::Fifo], false), PresentMode::Fifo);
    }

    #[test]
    fn tool_options_prefer_low_power() {
        assert_eq!(
            GpuOptions::tool().power_preference(),
            wgpu::PowerPreference::LowPower
        );
        assert_eq!(
            GpuOptions::default().power_preference(),
            wgpu::PowerPreference::HighPerformance
        );
    }
}
