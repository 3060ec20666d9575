//! UV sphere mesh generation with equirectangular texture coordinates

use bytemuck::{Pod, Zeroable};
use terraglobe_core::{lat_lon_to_point, GeoCoordinate};

/// Vertex data for the textured globe surface
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct GlobeVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl GlobeVertex {
    /// Vertex buffer layout descriptor
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GlobeVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // Position
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                // Normal
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                // UV
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// A sphere mesh ready for upload
#[derive(Debug, Clone)]
pub struct SphereMesh {
    pub vertices: Vec<GlobeVertex>,
    pub indices: Vec<u32>,
}

impl SphereMesh {
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

/// Generate a UV sphere of the given radius.
///
/// `segments` is the longitudinal resolution and `rings` the latitudinal
/// resolution. Vertices are placed with the same projection used for the
/// location pins, so the equirectangular texture coordinates line up with
/// projected pin positions: `u` runs with longitude across the texture
/// seam convention, `v` from the north pole (0) to the south pole (1).
/// The seam column is duplicated so the texture wraps without bleeding.
pub fn uv_sphere(radius: f32, segments: u32, rings: u32) -> SphereMesh {
    let mut vertices = Vec::with_capacity(((rings + 1) * (segments + 1)) as usize);
    let mut indices = Vec::with_capacity((rings * segments * 6) as usize);

    for ring in 0..=rings {
        let v = ring as f32 / rings as f32;
        let latitude = 90.0 - 180.0 * v;

        for seg in 0..=segments {
            let u = seg as f32 / segments as f32;
            let longitude = 360.0 * u - 180.0;

            let position = lat_lon_to_point(GeoCoordinate::new(latitude, longitude), radius);
            let normal = position.coords / radius;

            vertices.push(GlobeVertex {
                position: [position.x, position.y, position.z],
                normal: [normal.x, normal.y, normal.z],
                uv: [u, v],
            });
        }
    }

    for ring in 0..rings {
        for seg in 0..segments {
            let current = ring * (segments + 1) + seg;
            let next = current + segments + 1;

            indices.push(current);
            indices.push(next);
            indices.push(current + 1);

            indices.push(current + 1);
            indices.push(next);
            indices.push(next + 1);
        }
    }

    SphereMesh { vertices, indices }
}
