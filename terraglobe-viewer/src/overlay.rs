//! Label text overlay drawn with egui

use crate::camera::OrbitCamera;
use egui::{Align2, Area, Color32, Context, Frame, Id, Margin, RichText, Rounding};
use terraglobe_core::GlobeScene;

/// Draw the label of every shown pin at its projected screen position.
///
/// Labels ride the billboard quads: the anchor is the pin's label anchor
/// carried by the globe's current rotation, so text follows the pins as
/// the globe spins and the camera orbits.
pub fn draw_labels(
    ctx: &Context,
    scene: &GlobeScene,
    camera: &OrbitCamera,
    size_px: (u32, u32),
    pixels_per_point: f32,
) {
    let scale = pixels_per_point.max(0.1);

    for (index, pin) in scene.pins().iter().enumerate() {
        if !pin.is_visible() {
            continue;
        }

        let anchor = scene.label_world_anchor(pin);
        let Some((x, y)) = camera.world_to_screen(anchor, size_px) else {
            continue;
        };

        Area::new(Id::new(("pin_label", index)))
            .fixed_pos(egui::pos2(x / scale, y / scale))
            .pivot(Align2::CENTER_CENTER)
            .show(ctx, |ui| {
                Frame::none()
                    .fill(Color32::from_rgba_unmultiplied(255, 255, 255, 217))
                    .rounding(Rounding::same(4.0))
                    .inner_margin(Margin::same(5.0))
                    .show(ui, |ui| {
                        ui.label(
                            RichText::new(pin.label())
                                .color(Color32::from_rgb(51, 51, 51))
                                .strong()
                                .size(12.0),
                        );
                    });
            });
    }
}
