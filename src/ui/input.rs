use crate::scene::camera::{OrbitCamera, ZoomDirection};
use crate::scene::light::{Axis, ColorPreset, Light};
use egui::{Context, Key, PointerButton, Response};
use log::debug;

/// A single keyboard edit of the light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightCommand {
    Intensity(f32),
    Move(Axis, f32),
    Color(ColorPreset),
}

impl LightCommand {
    /// `step` is both the intensity and the position increment.
    pub fn from_key(key: Key, step: f32) -> Option<Self> {
        let cmd = match key {
            Key::I => Self::Intensity(step),
            Key::K => Self::Intensity(-step),
            Key::A => Self::Move(Axis::X, -step),
            Key::D => Self::Move(Axis::X, step),
            Key::Q => Self::Move(Axis::Y, step),
            Key::E => Self::Move(Axis::Y, -step),
            Key::W => Self::Move(Axis::Z, step),
            Key::S => Self::Move(Axis::Z, -step),
            Key::R => Self::Color(ColorPreset::Red),
            Key::G => Self::Color(ColorPreset::Green),
            Key::B => Self::Color(ColorPreset::Blue),
            _ => return None,
        };
        Some(cmd)
    }

    pub fn apply(self, light: &mut Light) {
        match self {
            Self::Intensity(delta) => light.adjust_intensity(delta),
            Self::Move(axis, delta) => light.translate(axis, delta),
            Self::Color(preset) => light.set_color(preset),
        }
    }
}

const LIGHT_KEYS: [Key; 11] = [
    Key::I,
    Key::K,
    Key::A,
    Key::D,
    Key::Q,
    Key::E,
    Key::W,
    Key::S,
    Key::R,
    Key::G,
    Key::B,
];

/// Routes egui pointer and keyboard input to the camera and the light.
pub struct InputController {
    pub light_step: f32,
}

impl InputController {
    pub fn new(light_step: f32) -> Self {
        Self { light_step }
    }

    /// Primary-button drag orbits, the wheel zooms one step per frame.
    /// Returns true when the camera moved.
    pub fn handle_viewport(&self, ctx: &Context, response: &Response, camera: &mut OrbitCamera) -> bool {
        let mut changed = false;

        if response.dragged_by(PointerButton::Primary) {
            let delta = response.drag_delta();
            if delta.x != 0.0 || delta.y != 0.0 {
                camera.apply_drag(delta.x, delta.y);
                changed = true;
            }
        }

        if response.hovered() {
            let scroll = ctx.input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                let direction = if scroll > 0.0 {
                    ZoomDirection::In
                } else {
                    ZoomDirection::Out
                };
                camera.apply_zoom(direction);
                changed = true;
            }
        }

        if changed {
            debug!(
                "Camera: angles ({:.1}, {:.1}), distance {:.2}",
                camera.angle_x, camera.angle_y, camera.distance
            );
        }
        changed
    }

    /// Applies light hotkeys. Skipped while a text field has focus so typing
    /// into the overlay does not move the light.
    pub fn handle_keys(&self, ctx: &Context, light: &mut Light) -> bool {
        if ctx.wants_keyboard_input() {
            return false;
        }

        let pressed: Vec<Key> = ctx.input(|i| {
            LIGHT_KEYS
                .iter()
                .copied()
                .filter(|k| i.key_pressed(*k))
                .collect()
        });

        for key in &pressed {
            if let Some(cmd) = LightCommand::from_key(*key, self.light_step) {
                cmd.apply(light);
                debug!("Light {:?} -> {:?}", cmd, light.position);
            }
        }
        !pressed.is_empty()
    }

    pub fn quit_requested(&self, ctx: &Context) -> bool {
        ctx.input(|i| i.key_pressed(Key::Escape))
    }
}
