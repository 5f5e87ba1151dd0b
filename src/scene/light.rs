use nalgebra::{Point3, Vector3};

/// Axis selector for nudging the light position from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Fixed colors the keyboard can switch the light to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorPreset {
    Red,
    Green,
    Blue,
}

impl ColorPreset {
    pub fn rgb(self) -> Vector3<f32> {
        match self {
            ColorPreset::Red => Vector3::new(1.0, 0.0, 0.0),
            ColorPreset::Green => Vector3::new(0.0, 1.0, 0.0),
            ColorPreset::Blue => Vector3::new(0.0, 0.0, 1.0),
        }
    }
}

/// The scene's single point light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Point3<f32>,
    /// Color before intensity scaling.
    pub base_color: Vector3<f32>,
    /// Kept in [0, 1].
    pub intensity: f32,
    pub specular: Vector3<f32>,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: Point3::new(1.0, 1.0, 1.0),
            base_color: Vector3::new(0.8, 0.8, 0.8),
            intensity: 1.0,
            specular: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Light {
    pub fn new(position: Point3<f32>, base_color: Vector3<f32>, intensity: f32) -> Self {
        Self {
            position,
            base_color,
            intensity: intensity.clamp(0.0, 1.0),
            ..Default::default()
        }
    }

    /// Diffuse color reaching a surface.
    pub fn radiance(&self) -> Vector3<f32> {
        self.base_color * self.intensity
    }

    /// Specular color reaching a surface.
    pub fn specular_radiance(&self) -> Vector3<f32> {
        self.specular * self.intensity
    }

    pub fn adjust_intensity(&mut self, delta: f32) {
        self.intensity = (self.intensity + delta).clamp(0.0, 1.0);
    }

    pub fn translate(&mut self, axis: Axis, delta: f32) {
        match axis {
            Axis::X => self.position.x += delta,
            Axis::Y => self.position.y += delta,
            Axis::Z => self.position.z += delta,
        }
    }

    pub fn set_color(&mut self, preset: ColorPreset) {
        self.base_color = preset.rgb();
    }

    /// Unit vector from `surface_point` toward the light.
    pub fn direction_from(&self, surface_point: &Point3<f32>) -> Vector3<f32> {
        (self.position - surface_point).normalize()
    }
}
