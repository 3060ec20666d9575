//! Starfield background generation

use bytemuck::{Pod, Zeroable};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Vertex data for a single star
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct StarVertex {
    pub position: [f32; 3],
    pub brightness: f32,
}

impl StarVertex {
    /// Vertex buffer layout descriptor
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<StarVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // Position
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                // Brightness
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32,
                },
            ],
        }
    }
}

/// Starfield generation parameters
#[derive(Debug, Clone, PartialEq)]
pub struct StarfieldConfig {
    pub count: usize,
    /// Inner radius of the spherical shell holding the stars
    pub inner_radius: f32,
    /// Radial thickness of the shell
    pub depth: f32,
    pub seed: u64,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            count: 5000,
            inner_radius: 100.0,
            depth: 50.0,
            seed: 0x5741_5253,
        }
    }
}

/// Generate star vertices uniformly distributed over a spherical shell.
///
/// Directions are sampled uniformly on the unit sphere (uniform height plus
/// uniform azimuth), radii uniformly within the shell. The same seed always
/// yields the same field.
pub fn generate_starfield(config: &StarfieldConfig) -> Vec<StarVertex> {
    let mut rng = StdRng::seed_from_u64(config.seed);

    (0..config.count)
        .map(|_| {
            let y: f32 = rng.gen_range(-1.0..=1.0);
            let azimuth: f32 = rng.gen_range(0.0..std::f32::consts::TAU);
            let planar = (1.0 - y * y).sqrt();
            let radius = config.inner_radius + config.depth * rng.gen::<f32>();
            let brightness = 0.5 + 0.5 * rng.gen::<f32>();

            StarVertex {
                position: [
                    radius * planar * azimuth.cos(),
                    radius * y,
                    radius * planar * azimuth.sin(),
                ],
                brightness,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starfield_has_exact_count() {
        let config = StarfieldConfig {
            count: 1234,
            ..StarfieldConfig::default()
        };
        assert_eq!(generate_starfield(&config).len(), 1234);
    }

    #[test]
    fn test_stars_stay_inside_the_shell() {
        let config = StarfieldConfig::default();
        for star in generate_starfield(&config) {
            let r = nalgebra::Vector3::from(star.position).norm();
            assert!(r >= config.inner_radius - 1e-3);
            assert!(r <= config.inner_radius + config.depth + 1e-3);
        }
    }

    #[test]
    fn test_brightness_is_bounded() {
        for star in generate_starfield(&StarfieldConfig::default()) {
            assert!((0.5..=1.0).contains(&star.brightness));
        }
    }

    #[test]
    fn test_same_seed_same_field() {
        let config = StarfieldConfig::default();
        let a = generate_starfield(&config);
        let b = generate_starfield(&config);
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.position, y.position);
            assert_eq!(x.brightness, y.brightness);
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = generate_starfield(&StarfieldConfig::default());
        let b = generate_starfield(&StarfieldConfig {
            seed: 99,
            ..StarfieldConfig::default()
        });
        assert!(a.iter().zip(&b).any(|(x, y)| x.position != y.position));
    }
}
