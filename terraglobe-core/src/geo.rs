//! Geographic coordinates and their projection onto a sphere

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// A geographic coordinate in degrees
///
/// Latitude is nominally in [-90, 90] and longitude in [-180, 180].
/// Out-of-range values are not rejected; the projection below is total
/// over all real inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub latitude: f32,
    pub longitude: f32,
}

impl GeoCoordinate {
    /// Create a new coordinate from latitude and longitude in degrees
    pub fn new(latitude: f32, longitude: f32) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Project a geographic coordinate onto the sphere of the given radius.
///
/// The north pole maps to `(0, r, 0)` and the south pole to `(0, -r, 0)`.
/// Longitude is offset by 180 degrees before conversion so that the prime
/// meridian of an equirectangular Earth texture lines up with the mesh seam;
/// this is a texture convention, not a geodesy formula, and changing it
/// shifts every surface feature by half a revolution.
pub fn lat_lon_to_point(coordinate: GeoCoordinate, radius: f32) -> Point3f {
    let phi = (90.0 - coordinate.latitude).to_radians();
    let theta = (coordinate.longitude + 180.0).to_radians();

    Point3f::new(
        -radius * phi.sin() * theta.cos(),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_north_pole_maps_to_positive_y() {
        for radius in [0.5, 1.0, 1.02, 100.0] {
            for longitude in [-180.0, -74.0, 0.0, 139.7] {
                let p = lat_lon_to_point(GeoCoordinate::new(90.0, longitude), radius);
                assert_relative_eq!(p.x, 0.0, epsilon = 1e-5 * radius);
                assert_relative_eq!(p.y, radius, epsilon = 1e-5 * radius);
                assert_relative_eq!(p.z, 0.0, epsilon = 1e-5 * radius);
            }
        }
    }

    #[test]
    fn test_south_pole_maps_to_negative_y() {
        for radius in [0.5, 1.0, 1.02, 100.0] {
            for longitude in [-118.2, 0.0, 51.5] {
                let p = lat_lon_to_point(GeoCoordinate::new(-90.0, longitude), radius);
                assert_relative_eq!(p.x, 0.0, epsilon = 1e-5 * radius);
                assert_relative_eq!(p.y, -radius, epsilon = 1e-5 * radius);
                assert_relative_eq!(p.z, 0.0, epsilon = 1e-5 * radius);
            }
        }
    }

    #[test]
    fn test_projected_points_lie_on_sphere() {
        let radius = 1.0;
        let mut latitude = -90.0;
        while latitude <= 90.0 {
            let mut longitude = -180.0;
            while longitude <= 180.0 {
                let p = lat_lon_to_point(GeoCoordinate::new(latitude, longitude), radius);
                assert_relative_eq!(p.coords.norm(), radius, epsilon = 1e-6);
                longitude += 15.0;
            }
            latitude += 15.0;
        }
    }

    #[test]
    fn test_new_york_city_on_pin_sphere() {
        let p = lat_lon_to_point(GeoCoordinate::new(40.7128, -74.0060), 1.02);
        assert_relative_eq!(p.coords.norm(), 1.02, epsilon = 1e-6);
    }

    #[test]
    fn test_equator_prime_meridian_faces_negative_x() {
        // theta = 180 degrees, so cos(theta) = -1 and the point lands on -X.
        let p = lat_lon_to_point(GeoCoordinate::new(0.0, 0.0), 1.0);
        assert_relative_eq!(p.x, -1.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_projection_is_deterministic() {
        let coordinate = GeoCoordinate::new(35.6895, 139.6917);
        let a = lat_lon_to_point(coordinate, 1.02);
        let b = lat_lon_to_point(coordinate, 1.02);
        assert_eq!(a, b);
    }

    #[test]
    fn test_out_of_range_inputs_still_project() {
        let p = lat_lon_to_point(GeoCoordinate::new(135.0, 400.0), 1.0);
        assert!(p.x.is_finite() && p.y.is_finite() && p.z.is_finite());
        assert_relative_eq!(p.coords.norm(), 1.0, epsilon = 1e-6);
    }
}
