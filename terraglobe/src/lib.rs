//! # terraglobe
//!
//! An interactive 3D Earth globe viewer for Rust.
//!
//! This is the umbrella crate that provides convenient access to the
//! terraglobe crates. Use this to get everything in one place, or depend
//! on the individual crates for more granular control:
//!
//! - **Core**: geo projection, pins, rotation and billboard math
//! - **Render**: wgpu rendering of the globe, clouds, stars and markers
//! - **Viewer**: windowed viewer with orbit controls and pin picking
//!
//! ## Quick start
//!
//! ```rust
//! use terraglobe::prelude::*;
//!
//! // Project a coordinate onto the pin sphere
//! let nyc = GeoCoordinate::new(40.7128, -74.0060);
//! let position = lat_lon_to_point(nyc, 1.02);
//! assert!((position.coords.norm() - 1.02).abs() < 1e-6);
//!
//! // Build the default scene and toggle a pin
//! let mut scene = GlobeScene::default();
//! scene.toggle_pin(0).unwrap();
//! ```
//!
//! ## Feature flags
//!
//! - `render`: GPU rendering (pulls in wgpu)
//! - `viewer`: interactive windowed viewer (implies `render`)
//! - `all`: everything

// Re-export core functionality
pub use terraglobe_core::*;

// Re-export sub-crates
#[cfg(feature = "render")]
pub use terraglobe_render as render;

#[cfg(feature = "viewer")]
pub use terraglobe_viewer as viewer;

/// Convenient imports for common use cases
pub mod prelude {
    pub use terraglobe_core::*;

    #[cfg(feature = "render")]
    pub use terraglobe_render::*;

    #[cfg(feature = "viewer")]
    pub use terraglobe_viewer::*;
}
