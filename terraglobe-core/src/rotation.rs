//! Per-frame rotation state for the globe bodies

use crate::geo::Point3f;
use nalgebra::{Matrix4, Rotation3, Vector3};

/// Angular state of a body spinning about the world Y axis.
///
/// The angle is an explicit function of total elapsed time rather than an
/// accumulation of per-frame deltas, so [`Spin::advance`] is idempotent for
/// a given timestamp and the body never drifts under variable frame rates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spin {
    /// Current rotation angle in radians
    pub angle: f32,
    /// Angular speed in radians per second
    pub speed: f32,
}

impl Spin {
    pub fn new(speed: f32) -> Self {
        Self { angle: 0.0, speed }
    }

    /// Advance the rotation to the given total elapsed time in seconds
    pub fn advance(&mut self, elapsed_secs: f32) {
        self.angle = elapsed_secs * self.speed;
    }

    /// Rotation about the Y axis for the current angle
    pub fn rotation(&self) -> Rotation3<f32> {
        Rotation3::from_axis_angle(&Vector3::y_axis(), self.angle)
    }

    /// Homogeneous model matrix for the current angle
    pub fn model_matrix(&self) -> Matrix4<f32> {
        self.rotation().to_homogeneous()
    }

    /// Apply the current rotation to a body-local point
    pub fn transform_point(&self, point: &Point3f) -> Point3f {
        self.rotation().transform_point(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_advance_tracks_elapsed_time() {
        let mut spin = Spin::new(0.1);
        spin.advance(10.0);
        assert_relative_eq!(spin.angle, 1.0, epsilon = 1e-6);
        spin.advance(12.5);
        assert_relative_eq!(spin.angle, 1.25, epsilon = 1e-6);
    }

    #[test]
    fn test_advance_is_idempotent_for_a_timestamp() {
        let mut spin = Spin::new(0.12);
        spin.advance(42.0);
        let first = spin.angle;
        spin.advance(42.0);
        assert_eq!(spin.angle, first);
    }

    #[test]
    fn test_rotation_preserves_height_and_radius() {
        let mut spin = Spin::new(0.1);
        spin.advance(7.0);
        let p = Point3f::new(0.6, 0.5, -0.2);
        let rotated = spin.transform_point(&p);
        assert_relative_eq!(rotated.y, p.y, epsilon = 1e-6);
        assert_relative_eq!(rotated.coords.norm(), p.coords.norm(), epsilon = 1e-6);
    }

    #[test]
    fn test_quarter_turn_carries_x_axis_to_negative_z() {
        // Right-handed rotation about +Y sends +X toward -Z.
        let spin = Spin {
            angle: std::f32::consts::FRAC_PI_2,
            speed: 0.0,
        };
        let rotated = spin.transform_point(&Point3f::new(1.0, 0.0, 0.0));
        assert_relative_eq!(rotated.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(rotated.z, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_model_matrix_matches_rotation() {
        let spin = Spin {
            angle: 0.37,
            speed: 0.0,
        };
        let m = spin.model_matrix();
        let p = Point3f::new(0.2, -0.4, 0.9);
        let via_matrix = m.transform_point(&p);
        let via_rotation = spin.transform_point(&p);
        assert_relative_eq!(via_matrix.coords, via_rotation.coords, epsilon = 1e-6);
    }
}
