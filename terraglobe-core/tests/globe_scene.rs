//! End-to-end checks of the scene data model: projection, rotation,
//! pin toggling and billboard orientation working together.

use approx::assert_relative_eq;
use nalgebra::Vector3;
use terraglobe_core::{billboard, GeoCoordinate, GlobeScene, lat_lon_to_point, Point3f, SceneConfig};

#[test]
fn scene_round_trip_click_and_frame_update() {
    let mut scene = GlobeScene::new(SceneConfig::default());

    // A click shows the label, a second click hides it again.
    assert!(scene.toggle_pin(0).unwrap());
    assert!(scene.pins()[0].is_visible());
    assert!(!scene.toggle_pin(0).unwrap());
    assert!(!scene.pins()[0].is_visible());

    // Frame updates move the pins with the globe without lifting them off
    // the pin sphere.
    let rest = scene.pins()[1].position();
    scene.update(30.0);
    let world = scene.pin_world_position(&scene.pins()[1]);
    assert_relative_eq!(world.coords.norm(), rest.coords.norm(), epsilon = 1e-5);
    assert_relative_eq!(world.y, rest.y, epsilon = 1e-5);
    assert!((world.x - rest.x).abs() > 1e-3 || (world.z - rest.z).abs() > 1e-3);
}

#[test]
fn label_billboard_faces_the_viewer_as_the_globe_turns() {
    let mut scene = GlobeScene::new(SceneConfig::default());
    let viewer = Point3f::new(0.0, 0.0, 3.0);

    for frame in 0..5 {
        scene.update(frame as f32 * 2.0);
        let pin = &scene.pins()[3];
        let anchor = scene.label_world_anchor(pin);
        let facing = billboard::face_viewer(anchor, viewer) * Vector3::z();
        let expected = (viewer - anchor).normalize();
        assert_relative_eq!(facing, expected, epsilon = 1e-4);
    }
}

#[test]
fn custom_location_list_projects_onto_the_configured_radius() {
    let config = SceneConfig {
        pin_radius: 2.5,
        locations: vec![
            terraglobe_core::Location::new(48.8566, 2.3522, "Paris"),
            terraglobe_core::Location::new(-33.8688, 151.2093, "Sydney"),
        ],
        ..SceneConfig::default()
    };
    let scene = GlobeScene::new(config);

    assert_eq!(scene.pins().len(), 2);
    for pin in scene.pins() {
        assert_relative_eq!(pin.position().coords.norm(), 2.5, epsilon = 1e-5);
        let direct = lat_lon_to_point(pin.coordinate(), 2.5);
        assert_eq!(pin.position(), direct);
    }
}

#[test]
fn projection_matches_the_documented_convention() {
    // lat 0, lon 0 lands on -X because longitude is offset by 180 degrees
    // before conversion.
    let p = lat_lon_to_point(GeoCoordinate::new(0.0, 0.0), 1.0);
    assert_relative_eq!(p.x, -1.0, epsilon = 1e-6);
    assert_relative_eq!(p.y, 0.0, epsilon = 1e-6);
    assert_relative_eq!(p.z, 0.0, epsilon = 1e-6);
}
