//! Texture decode and upload helpers

use image::GenericImageView;
use std::path::Path;
use terraglobe_core::{Error, Result};

/// A GPU texture with its view and sampler
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl Texture {
    /// Decode an image file and upload it as an RGBA8 texture
    pub fn from_path(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: &Path,
        label: &str,
    ) -> Result<Self> {
        let img = image::open(path).map_err(|e| Error::Image(e.to_string()))?;
        Self::from_image(device, queue, &img, label)
    }

    /// Upload a decoded image as an RGBA8 texture
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        img: &image::DynamicImage,
        label: &str,
    ) -> Result<Self> {
        let (width, height) = img.dimensions();
        let rgba = img.to_rgba8();
        Self::from_rgba(device, queue, &rgba, width, height, label)
    }

    /// Upload raw RGBA8 pixels
    pub fn from_rgba(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        pixels: &[u8],
        width: u32,
        height: u32,
        label: &str,
    ) -> Result<Self> {
        let expected = (width as usize) * (height as usize) * 4;
        if pixels.len() != expected {
            return Err(Error::InvalidData(format!(
                "texture '{}': expected {} bytes for {}x{} RGBA, got {}",
                label,
                expected,
                width,
                height,
                pixels.len()
            )));
        }

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        // Longitude wraps around the seam; latitude clamps at the poles.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Ok(Self {
            texture,
            view,
            sampler,
        })
    }

    /// A 1x1 solid color texture used when no image asset is supplied
    pub fn solid_color(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        rgba: [u8; 4],
        label: &str,
    ) -> Result<Self> {
        Self::from_rgba(device, queue, &rgba, 1, 1, label)
    }
}

/// Decoded image assets for the globe surfaces.
///
/// Both maps are optional so the viewer can run without any files on disk;
/// the renderer falls back to solid colors and skips the cloud pass.
pub struct GlobeAssets {
    pub day_map: Option<image::DynamicImage>,
    pub cloud_map: Option<image::DynamicImage>,
}

impl GlobeAssets {
    /// Decode the given image files, skipping the ones not supplied
    pub fn load(day_map: Option<&Path>, cloud_map: Option<&Path>) -> Result<Self> {
        let day_map = day_map
            .map(|p| image::open(p).map_err(|e| Error::Image(format!("{}: {}", p.display(), e))))
            .transpose()?;
        let cloud_map = cloud_map
            .map(|p| image::open(p).map_err(|e| Error::Image(format!("{}: {}", p.display(), e))))
            .transpose()?;

        Ok(Self { day_map, cloud_map })
    }

    /// No assets; the renderer uses its solid-color fallback
    pub fn none() -> Self {
        Self {
            day_map: None,
            cloud_map: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assets_load_with_nothing_supplied() {
        let assets = GlobeAssets::load(None, None).unwrap();
        assert!(assets.day_map.is_none());
        assert!(assets.cloud_map.is_none());
    }

    #[test]
    fn test_assets_load_reports_missing_file() {
        let missing = Path::new("/definitely/not/here.jpg");
        assert!(GlobeAssets::load(Some(missing), None).is_err());
    }
}
