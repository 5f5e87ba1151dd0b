use crate::core::math::transform::TransformFactory;
use nalgebra::{Matrix4, Point3, Vector3};

pub const DEFAULT_ANGLE_X: f32 = 45.0;
pub const DEFAULT_ANGLE_Y: f32 = 45.0;
pub const DEFAULT_DISTANCE: f32 = 5.0;
pub const DEFAULT_MIN_DISTANCE: f32 = 1.0;
pub const DEFAULT_DRAG_SENSITIVITY: f32 = 0.1;
pub const DEFAULT_ZOOM_STEP: f32 = 0.1;

/// Below this |forward x up| the world up is treated as parallel to the view.
const PARALLEL_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// Camera orbiting the world origin.
///
/// Angles are in degrees and accumulate without wrapping; only the distance
/// is bounded (from below).
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    pub angle_x: f32,
    pub angle_y: f32,
    pub distance: f32,
    pub min_distance: f32,
    /// Degrees per pixel of pointer motion.
    pub drag_sensitivity: f32,
    /// Distance change per wheel notch.
    pub zoom_step: f32,

    /// Angles and requested distance; the distance is clamped on use.
    home: (f32, f32, f32),
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(DEFAULT_ANGLE_X, DEFAULT_ANGLE_Y, DEFAULT_DISTANCE)
    }
}

impl OrbitCamera {
    pub fn new(angle_x: f32, angle_y: f32, distance: f32) -> Self {
        Self {
            angle_x,
            angle_y,
            distance: distance.max(DEFAULT_MIN_DISTANCE),
            min_distance: DEFAULT_MIN_DISTANCE,
            drag_sensitivity: DEFAULT_DRAG_SENSITIVITY,
            zoom_step: DEFAULT_ZOOM_STEP,
            home: (angle_x, angle_y, distance),
        }
    }

    pub fn with_limits(mut self, min_distance: f32, drag_sensitivity: f32, zoom_step: f32) -> Self {
        self.min_distance = min_distance;
        self.drag_sensitivity = drag_sensitivity;
        self.zoom_step = zoom_step;
        self.distance = self.home.2.max(min_distance);
        self
    }

    /// Pointer drag in pixels. No clamping: sin/cos take care of periodicity.
    pub fn apply_drag(&mut self, delta_x: f32, delta_y: f32) {
        self.angle_x += delta_x * self.drag_sensitivity;
        self.angle_y += delta_y * self.drag_sensitivity;
    }

    pub fn apply_zoom(&mut self, direction: ZoomDirection) {
        match direction {
            ZoomDirection::In => self.distance -= self.zoom_step,
            ZoomDirection::Out => self.distance += self.zoom_step,
        }
        self.distance = self.distance.max(self.min_distance);
    }

    /// Restores the angles and distance the camera was created with.
    pub fn reset(&mut self) {
        let (angle_x, angle_y, distance) = self.home;
        self.angle_x = angle_x;
        self.angle_y = angle_y;
        self.distance = distance.max(self.min_distance);
    }

    pub fn eye_position(&self) -> Point3<f32> {
        let (sin_x, cos_x) = self.angle_x.to_radians().sin_cos();
        let (sin_y, cos_y) = self.angle_y.to_radians().sin_cos();
        Point3::new(
            self.distance * sin_x * cos_y,
            self.distance * sin_y,
            self.distance * cos_x * cos_y,
        )
    }

    /// Look-at from the eye toward the origin with +Y up.
    ///
    /// Straight above or below the origin the world up is parallel to the
    /// view direction; there the orbit's own tangent (the direction the eye
    /// moves when `angle_y` grows) serves as up instead.
    pub fn view_matrix(&self) -> Matrix4<f32> {
        let eye = self.eye_position();
        let forward = -eye.coords.normalize();
        let world_up = Vector3::y();

        let up = if forward.cross(&world_up).norm() < PARALLEL_EPSILON {
            let (sin_x, cos_x) = self.angle_x.to_radians().sin_cos();
            let (sin_y, cos_y) = self.angle_y.to_radians().sin_cos();
            Vector3::new(-sin_x * sin_y, cos_y, -cos_x * sin_y)
        } else {
            world_up
        };

        TransformFactory::view(&eye, &Point3::origin(), &up)
    }
}

/// Perspective projection parameters; the aspect ratio comes from the target
/// framebuffer at draw time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_y_degrees: 45.0,
            near: 1.0,
            far: 100.0,
        }
    }
}

impl Projection {
    pub fn matrix(&self, aspect_ratio: f32) -> Matrix4<f32> {
        TransformFactory::perspective(
            aspect_ratio,
            self.fov_y_degrees.to_radians(),
            self.near,
            self.far,
        )
    }
}
