//! Interactive globe viewer
//!
//! Opens a window, drives the per-frame scene update, and wires pointer
//! input to the orbit camera and pin picking:
//! - Left-drag orbits, scroll zooms (clamped, damped)
//! - Clicking a pin toggles its label
//! - `r` resets the camera

pub mod camera;
pub mod picking;
pub mod overlay;
pub mod viewer;

pub use camera::*;
pub use picking::*;
pub use viewer::*;

use terraglobe_core::Result;

/// Open an interactive viewer over the default globe scene
pub fn show_globe() -> Result<()> {
    GlobeViewer::new(ViewerConfig::default())?.run()
}
