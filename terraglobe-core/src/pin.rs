//! Location pins and their click-driven label visibility

use crate::geo::{lat_lon_to_point, GeoCoordinate, Point3f, Vector3f};
use serde::{Deserialize, Serialize};

/// Vertical offset of the label surface above the pin position
pub const LABEL_OFFSET: f32 = 0.1;

/// A named location to pin on the globe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub coordinate: GeoCoordinate,
    pub label: String,
}

impl Location {
    /// Create a location from latitude/longitude in degrees and a label
    pub fn new(latitude: f32, longitude: f32, label: impl Into<String>) -> Self {
        Self {
            coordinate: GeoCoordinate::new(latitude, longitude),
            label: label.into(),
        }
    }
}

/// A clickable marker anchored to the globe surface.
///
/// The position is projected once at construction and never mutated; the
/// only mutable state is the label visibility, and the only way to change
/// it is [`Pin::toggle`]. A pin starts hidden.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    coordinate: GeoCoordinate,
    position: Point3f,
    label: String,
    visible: bool,
}

impl Pin {
    /// Project a location onto the sphere of the given radius
    pub fn new(location: &Location, radius: f32) -> Self {
        Self {
            coordinate: location.coordinate,
            position: lat_lon_to_point(location.coordinate, radius),
            label: location.label.clone(),
            visible: false,
        }
    }

    /// The geographic coordinate this pin was projected from
    pub fn coordinate(&self) -> GeoCoordinate {
        self.coordinate
    }

    /// Rest position on the sphere, before any globe rotation
    pub fn position(&self) -> Point3f {
        self.position
    }

    /// Rest position of the label surface, offset above the pin
    pub fn label_anchor(&self) -> Point3f {
        self.position + Vector3f::new(0.0, LABEL_OFFSET, 0.0)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Flip the label between hidden and shown, returning the new state
    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tokyo() -> Location {
        Location::new(35.6895, 139.6917, "Tokyo")
    }

    #[test]
    fn test_pin_starts_hidden() {
        let pin = Pin::new(&tokyo(), 1.02);
        assert!(!pin.is_visible());
    }

    #[test]
    fn test_toggle_cycles_hidden_shown_hidden() {
        let mut pin = Pin::new(&tokyo(), 1.02);
        assert!(pin.toggle());
        assert!(pin.is_visible());
        assert!(!pin.toggle());
        assert!(!pin.is_visible());
    }

    #[test]
    fn test_toggle_parity_over_many_clicks() {
        let mut pin = Pin::new(&tokyo(), 1.02);
        for click in 1..=10 {
            pin.toggle();
            assert_eq!(pin.is_visible(), click % 2 == 1);
        }
    }

    #[test]
    fn test_pin_position_lies_on_sphere() {
        let pin = Pin::new(&tokyo(), 1.02);
        assert_relative_eq!(pin.position().coords.norm(), 1.02, epsilon = 1e-6);
    }

    #[test]
    fn test_label_anchor_sits_above_pin() {
        let pin = Pin::new(&tokyo(), 1.02);
        let anchor = pin.label_anchor();
        assert_relative_eq!(anchor.y - pin.position().y, LABEL_OFFSET, epsilon = 1e-6);
        assert_relative_eq!(anchor.x, pin.position().x, epsilon = 1e-6);
        assert_relative_eq!(anchor.z, pin.position().z, epsilon = 1e-6);
    }
}
