//! GPU rendering for terraglobe
//!
//! This crate draws the globe scene with wgpu:
//! - Textured globe sphere with a directional + ambient light
//! - Semi-transparent cloud layer rotating slightly faster
//! - Starfield background rendered as a point list
//! - Pin markers and billboard label quads rebuilt every frame
//!
//! Window creation and input stay in `terraglobe-viewer`; this crate only
//! needs a window handle to target a surface.

pub mod device;
pub mod sphere;
pub mod texture;
pub mod stars;
pub mod marker;
pub mod renderer;

pub use device::*;
pub use sphere::*;
pub use texture::*;
pub use stars::*;
pub use marker::*;
pub use renderer::*;
