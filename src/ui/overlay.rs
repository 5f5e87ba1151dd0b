use crate::scene::camera::OrbitCamera;
use crate::scene::light::Light;
use egui::{Context, Slider, SliderClamping};
use nalgebra::Point3;

pub const POSITION_RANGE: f32 = 10.0;

/// Formats a point the way the overlay prints the camera position.
pub fn format_position(p: &Point3<f32>) -> String {
    format!("Camera Position: ({:.2}, {:.2}, {:.2})", p.x, p.y, p.z)
}

/// "Light Parameters" window. Returns true when anything changed.
pub fn draw_light_overlay(ctx: &Context, light: &mut Light, camera: &mut OrbitCamera, fps: f32) -> bool {
    let mut changed = false;

    egui::Window::new("Light Parameters")
        .default_pos([10.0, 10.0])
        .default_size([300.0, 200.0])
        .resizable(false)
        .show(ctx, |ui| {
            // The keyboard may move the light past the slider range; only
            // slider edits are limited to it.
            let range = -POSITION_RANGE..=POSITION_RANGE;
            for (label, value) in ["X", "Y", "Z"].into_iter().zip(light.position.coords.iter_mut()) {
                let slider = Slider::new(value, range.clone())
                    .clamping(SliderClamping::Edits)
                    .text(format!("Light Position {label}"));
                changed |= ui.add(slider).changed();
            }

            changed |= ui
                .add(Slider::new(&mut light.intensity, 0.0..=1.0).text("Light Intensity"))
                .changed();

            ui.horizontal(|ui| {
                let mut rgb = [light.base_color.x, light.base_color.y, light.base_color.z];
                if ui.color_edit_button_rgb(&mut rgb).changed() {
                    light.base_color = rgb.into();
                    changed = true;
                }
                ui.label("Light Color");
            });

            ui.separator();
            ui.label(format_position(&camera.eye_position()));
            ui.label(format!("FPS: {fps:.1}"));

            if ui.button("Reset camera").clicked() {
                camera.reset();
                changed = true;
            }
        });

    changed
}
