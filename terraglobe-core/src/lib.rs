//! Core data structures and math for terraglobe
//!
//! This crate provides the globe's data model: geographic coordinates and
//! their projection onto a sphere, clickable pins with toggleable labels,
//! per-frame rotation state, and billboard orientation. It carries no GPU
//! or windowing dependencies; rendering lives in `terraglobe-render`.

pub mod geo;
pub mod pin;
pub mod rotation;
pub mod billboard;
pub mod scene;
pub mod error;

pub use geo::*;
pub use pin::*;
pub use rotation::*;
pub use scene::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Matrix4, Point3, Rotation3, UnitQuaternion, Vector3};

/// Common result type for terraglobe operations
pub type Result<T> = std::result::Result<T, Error>;
