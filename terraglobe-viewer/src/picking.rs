//! Pointer-ray picking against the globe's pins

use crate::camera::OrbitCamera;
use nalgebra::Vector3;
use terraglobe_core::{GlobeScene, Point3f, Vector3f};
use terraglobe_render::MARKER_RADIUS;

/// Clickable radius around a pin marker, inflated for usability
pub const PICK_RADIUS: f32 = 2.0 * MARKER_RADIUS;

/// A world-space ray with unit direction
#[derive(Debug, Clone, Copy)]
pub struct PickRay {
    pub origin: Point3f,
    pub direction: Vector3f,
}

/// Build the world-space ray through a cursor position in pixels.
///
/// The camera always looks at the origin, so the ray basis comes straight
/// from the eye position and the vertical field of view.
pub fn screen_ray(camera: &OrbitCamera, cursor: (f32, f32), size: (u32, u32)) -> PickRay {
    let ndc_x = 2.0 * cursor.0 / size.0.max(1) as f32 - 1.0;
    let ndc_y = 1.0 - 2.0 * cursor.1 / size.1.max(1) as f32;

    let eye = camera.eye();
    let forward = (-eye.coords).normalize();
    let right = forward.cross(&Vector3::y()).normalize();
    let up = right.cross(&forward);

    let half_height = (camera.fov / 2.0).tan();
    let half_width = half_height * camera.aspect_ratio;

    let direction =
        (forward + right * (ndc_x * half_width) + up * (ndc_y * half_height)).normalize();

    PickRay {
        origin: eye,
        direction,
    }
}

/// Nearest intersection distance of a ray with a sphere, if any
pub fn ray_sphere_intersection(ray: &PickRay, center: Point3f, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(&ray.direction);
    let c = oc.norm_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    let near = -b - sqrt_d;
    if near >= 0.0 {
        return Some(near);
    }
    let far = -b + sqrt_d;
    (far >= 0.0).then_some(far)
}

/// Find the pin whose marker the ray hits first.
///
/// Markers hidden behind the globe body are not clickable; among the rest
/// the nearest hit wins.
pub fn pick_pin(scene: &GlobeScene, ray: &PickRay) -> Option<usize> {
    let globe_hit = ray_sphere_intersection(ray, Point3f::origin(), scene.config().globe_radius);

    let mut best: Option<(usize, f32)> = None;
    for (index, pin) in scene.pins().iter().enumerate() {
        let center = scene.pin_world_position(pin);
        let Some(t) = ray_sphere_intersection(ray, center, PICK_RADIUS) else {
            continue;
        };
        if let Some(t_globe) = globe_hit {
            if t_globe < t {
                continue;
            }
        }
        if best.map_or(true, |(_, best_t)| t < best_t) {
            best = Some((index, t));
        }
    }

    best.map(|(index, _)| index)
}
