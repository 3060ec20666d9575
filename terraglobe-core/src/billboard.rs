//! Billboard orientation: keep a surface facing the viewer

use crate::geo::Point3f;
use nalgebra::{UnitQuaternion, Vector3};

/// Compute the orientation that turns a surface's local +Z axis toward the
/// viewer.
///
/// The result is a pure function of the current anchor and viewer positions;
/// callers recompute it every frame and never store it across frames. A
/// viewer at the anchor itself has no defined facing direction and yields
/// the identity orientation.
pub fn face_viewer(anchor: Point3f, viewer: Point3f) -> UnitQuaternion<f32> {
    let dir = viewer - anchor;
    if dir.norm_squared() <= f32::EPSILON {
        return UnitQuaternion::identity();
    }

    // When the viewer sits straight above or below the anchor, the world Y
    // axis is collinear with the facing direction and cannot serve as the up
    // reference.
    let up = if dir.cross(&Vector3::y()).norm_squared() <= f32::EPSILON {
        Vector3::z()
    } else {
        Vector3::y()
    };

    UnitQuaternion::face_towards(&dir, &up)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_local_z_points_at_viewer() {
        let anchor = Point3f::new(0.0, 1.12, 0.0);
        let viewer = Point3f::new(2.0, 1.0, 2.5);
        let orientation = face_viewer(anchor, viewer);

        let facing = orientation * Vector3::z();
        let expected = (viewer - anchor).normalize();
        assert_relative_eq!(facing, expected, epsilon = 1e-5);
    }

    #[test]
    fn test_orientation_tracks_a_moving_viewer() {
        let anchor = Point3f::new(0.5, 0.5, 0.7);
        for step in 0..8 {
            let angle = step as f32 * std::f32::consts::FRAC_PI_4;
            let viewer = Point3f::new(3.0 * angle.cos(), 0.0, 3.0 * angle.sin());
            let facing = face_viewer(anchor, viewer) * Vector3::z();
            let expected = (viewer - anchor).normalize();
            assert_relative_eq!(facing, expected, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_viewer_at_anchor_yields_identity() {
        let anchor = Point3f::new(1.0, 0.0, 0.0);
        assert_eq!(face_viewer(anchor, anchor), UnitQuaternion::identity());
    }

    #[test]
    fn test_viewer_straight_above_is_well_defined() {
        let anchor = Point3f::new(0.0, 1.02, 0.0);
        let viewer = Point3f::new(0.0, 5.0, 0.0);
        let facing = face_viewer(anchor, viewer) * Vector3::z();
        assert_relative_eq!(facing, Vector3::y(), epsilon = 1e-5);
    }
}
