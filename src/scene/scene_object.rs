use crate::scene::material::PhongMaterial;
use crate::scene::mesh::Mesh;
use nalgebra::Matrix4;

/// A mesh placed in the world with its own material.
pub struct SceneObject {
    pub name: &'static str,
    pub mesh: Mesh,
    pub material: PhongMaterial,
    pub transform: Matrix4<f32>,
}

impl SceneObject {
    pub fn new(name: &'static str, mesh: Mesh, material: PhongMaterial, transform: Matrix4<f32>) -> Self {
        Self {
            name,
            mesh,
            material,
            transform,
        }
    }
}
