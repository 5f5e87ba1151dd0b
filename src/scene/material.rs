use crate::scene::texture::Texture;
use nalgebra::Vector3;
use std::sync::Arc;

/// Parameters for the Phong lighting model.
#[derive(Debug, Clone)]
pub struct PhongMaterial {
    pub diffuse_color: Vector3<f32>,
    pub specular_color: Vector3<f32>,
    pub ambient_color: Vector3<f32>,
    pub shininess: f32,
    /// Opacity used for blending; 1.0 is opaque.
    pub alpha: f32,
    /// Replaces `diffuse_color` when present.
    pub diffuse_texture: Option<Arc<Texture>>,
}

impl Default for PhongMaterial {
    fn default() -> Self {
        Self {
            diffuse_color: Vector3::new(1.0, 1.0, 1.0),
            specular_color: Vector3::new(0.5, 0.5, 0.5),
            ambient_color: Vector3::new(0.3, 0.3, 0.3),
            shininess: 32.0,
            alpha: 1.0,
            diffuse_texture: None,
        }
    }
}

impl PhongMaterial {
    pub fn is_opaque(&self) -> bool {
        self.alpha >= 1.0
    }
}
