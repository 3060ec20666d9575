//! Orbit camera for the globe viewer

use nalgebra::{Matrix4, Perspective3, Point3, Vector3};
use terraglobe_core::Point3f;

/// Keep the pitch just short of the poles so the view never flips
const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.017;

/// An orbit camera circling the origin.
///
/// Input writes to target values; [`OrbitCamera::step`] eases the live
/// yaw/pitch/distance toward them once per frame, giving the damped feel of
/// the original controls. Zoom distance is clamped to
/// `[min_distance, max_distance]`.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    target_yaw: f32,
    target_pitch: f32,
    target_distance: f32,
    /// Vertical field of view in radians
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Fraction of the remaining distance covered per frame step
    pub damping: f32,
}

impl OrbitCamera {
    /// Camera at (0, 0, distance) looking at the origin
    pub fn new(distance: f32) -> Self {
        Self {
            yaw: std::f32::consts::FRAC_PI_2,
            pitch: 0.0,
            distance,
            target_yaw: std::f32::consts::FRAC_PI_2,
            target_pitch: 0.0,
            target_distance: distance,
            fov: 75f32.to_radians(),
            aspect_ratio: 1.5,
            near: 0.1,
            far: 300.0,
            min_distance: 2.0,
            max_distance: 6.0,
            damping: 0.05,
        }
    }

    /// Rotate around the target by the given angular deltas in radians
    pub fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.target_yaw -= delta_yaw;
        self.target_pitch = (self.target_pitch + delta_pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Zoom by a scroll amount; positive values move closer
    pub fn zoom(&mut self, scroll: f32) {
        let factor = (-scroll).exp();
        self.target_distance =
            (self.target_distance * factor).clamp(self.min_distance, self.max_distance);
    }

    /// Ease the live state toward the input targets; called once per frame
    pub fn step(&mut self) {
        self.yaw += (self.target_yaw - self.yaw) * self.damping;
        self.pitch += (self.target_pitch - self.pitch) * self.damping;
        self.distance += (self.target_distance - self.distance) * self.damping;
    }

    /// Snap back to the initial viewpoint
    pub fn reset(&mut self) {
        let fresh = Self::new(3.0);
        self.yaw = fresh.yaw;
        self.pitch = fresh.pitch;
        self.distance = fresh.distance;
        self.target_yaw = fresh.target_yaw;
        self.target_pitch = fresh.target_pitch;
        self.target_distance = fresh.target_distance;
    }

    /// Current eye position in world space
    pub fn eye(&self) -> Point3f {
        Point3f::new(
            self.distance * self.yaw.cos() * self.pitch.cos(),
            self.distance * self.pitch.sin(),
            self.distance * self.yaw.sin() * self.pitch.cos(),
        )
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.eye(), &Point3::origin(), &Vector3::y())
    }

    /// Get the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Perspective3::new(self.aspect_ratio, self.fov, self.near, self.far).into_inner()
    }

    /// Project a world point to pixel coordinates, if it is in front of
    /// the camera
    pub fn world_to_screen(&self, point: Point3f, size: (u32, u32)) -> Option<(f32, f32)> {
        let clip = self.projection_matrix() * self.view_matrix() * point.to_homogeneous();
        if clip.w <= 0.0 {
            return None;
        }
        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        Some((
            (ndc_x + 1.0) * 0.5 * size.0 as f32,
            (1.0 - ndc_y) * 0.5 * size.1 as f32,
        ))
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(3.0)
    }
}
