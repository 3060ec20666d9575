//! The globe scene: rotating bodies and their pins

use crate::error::{Error, Result};
use crate::geo::Point3f;
use crate::pin::{Location, Pin};
use crate::rotation::Spin;
use serde::{Deserialize, Serialize};

/// Scene configuration
///
/// The cloud layer sits slightly outside the globe surface and the pins
/// slightly outside the clouds, so markers are never swallowed by either
/// sphere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    pub globe_radius: f32,
    pub cloud_radius: f32,
    pub pin_radius: f32,
    /// Globe angular speed in radians per second
    pub globe_speed: f32,
    /// Cloud layer angular speed in radians per second
    pub cloud_speed: f32,
    pub locations: Vec<Location>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            globe_radius: 1.0,
            cloud_radius: 1.01,
            pin_radius: 1.02,
            globe_speed: 0.1,
            cloud_speed: 0.12,
            locations: builtin_locations(),
        }
    }
}

/// The built-in set of pinned locations
pub fn builtin_locations() -> Vec<Location> {
    vec![
        Location::new(40.7128, -74.0060, "New York City"),
        Location::new(34.0522, -118.2437, "Los Angeles"),
        Location::new(51.5074, -0.1278, "London"),
        Location::new(35.6895, 139.6917, "Tokyo"),
    ]
}

/// A rotating globe with a cloud layer and clickable pins.
///
/// All per-frame mutation flows through [`GlobeScene::update`] and
/// [`GlobeScene::toggle_pin`]; nothing here depends on a render loop.
#[derive(Debug, Clone)]
pub struct GlobeScene {
    config: SceneConfig,
    pub globe_spin: Spin,
    pub cloud_spin: Spin,
    pins: Vec<Pin>,
}

impl GlobeScene {
    pub fn new(config: SceneConfig) -> Self {
        let pins = config
            .locations
            .iter()
            .map(|location| Pin::new(location, config.pin_radius))
            .collect();

        Self {
            globe_spin: Spin::new(config.globe_speed),
            cloud_spin: Spin::new(config.cloud_speed),
            pins,
            config,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Advance both rotating bodies to the given total elapsed time
    pub fn update(&mut self, elapsed_secs: f32) {
        self.globe_spin.advance(elapsed_secs);
        self.cloud_spin.advance(elapsed_secs);
    }

    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    /// Toggle the label of the pin at `index`, returning its new visibility
    pub fn toggle_pin(&mut self, index: usize) -> Result<bool> {
        let pin = self
            .pins
            .get_mut(index)
            .ok_or_else(|| Error::InvalidData(format!("no pin at index {}", index)))?;
        Ok(pin.toggle())
    }

    /// A pin's rest position carried by the globe's current rotation.
    ///
    /// Pins are children of the globe body, so markers ride the surface as
    /// it spins.
    pub fn pin_world_position(&self, pin: &Pin) -> Point3f {
        self.globe_spin.transform_point(&pin.position())
    }

    /// The label anchor carried by the globe's current rotation
    pub fn label_world_anchor(&self, pin: &Pin) -> Point3f {
        self.globe_spin.transform_point(&pin.label_anchor())
    }
}

impl Default for GlobeScene {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_scene_has_builtin_pins() {
        let scene = GlobeScene::default();
        assert_eq!(scene.pins().len(), 4);
        let labels: Vec<&str> = scene.pins().iter().map(|p| p.label()).collect();
        assert_eq!(labels, ["New York City", "Los Angeles", "London", "Tokyo"]);
    }

    #[test]
    fn test_every_pin_lies_on_the_pin_sphere() {
        let scene = GlobeScene::default();
        for pin in scene.pins() {
            assert_relative_eq!(pin.position().coords.norm(), 1.02, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_update_advances_both_spins() {
        let mut scene = GlobeScene::default();
        scene.update(10.0);
        assert_relative_eq!(scene.globe_spin.angle, 1.0, epsilon = 1e-6);
        assert_relative_eq!(scene.cloud_spin.angle, 1.2, epsilon = 1e-6);
    }

    #[test]
    fn test_clouds_outpace_the_globe() {
        let scene = GlobeScene::default();
        assert!(scene.cloud_spin.speed > scene.globe_spin.speed);
    }

    #[test]
    fn test_world_positions_stay_on_the_pin_sphere() {
        let mut scene = GlobeScene::default();
        scene.update(123.4);
        for pin in scene.pins() {
            let world = scene.pin_world_position(pin);
            assert_relative_eq!(world.coords.norm(), 1.02, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_toggle_pin_by_index() {
        let mut scene = GlobeScene::default();
        assert!(scene.toggle_pin(2).unwrap());
        assert!(scene.pins()[2].is_visible());
        assert!(!scene.pins()[0].is_visible());
        assert!(!scene.toggle_pin(2).unwrap());
    }

    #[test]
    fn test_toggle_out_of_range_is_an_error() {
        let mut scene = GlobeScene::default();
        assert!(scene.toggle_pin(99).is_err());
    }
}
