use crate::core::geometry::Vertex;
use crate::core::math::transform::TransformFactory;
use crate::core::pipeline::Shader;
use crate::scene::light::Light;
use crate::scene::material::PhongMaterial;
use nalgebra::{Matrix3, Matrix4, Point3, Vector2, Vector3, Vector4};
use std::ops::{Add, Mul};

/// Data interpolated across the triangle surface.
#[derive(Clone, Copy, Debug)]
pub struct PhongVarying {
    /// World-space normal (not re-normalised until the fragment stage).
    pub normal: Vector3<f32>,
    pub world_pos: Point3<f32>,
    pub uv: Vector2<f32>,
}

// Point3 has no Point3 + Point3, so go through the coordinates.
impl Add for PhongVarying {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            normal: self.normal + other.normal,
            world_pos: Point3::from(self.world_pos.coords + other.world_pos.coords),
            uv: self.uv + other.uv,
        }
    }
}

impl Mul<f32> for PhongVarying {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self {
            normal: self.normal * scalar,
            world_pos: Point3::from(self.world_pos.coords * scalar),
            uv: self.uv * scalar,
        }
    }
}

/// Per-fragment Phong lighting from a single point light.
pub struct PhongShader<'a> {
    pub model_matrix: Matrix4<f32>,
    mvp: Matrix4<f32>,
    normal_matrix: Matrix3<f32>,
    pub camera_pos: Point3<f32>,
    pub light: &'a Light,
    pub material: &'a PhongMaterial,
}

impl<'a> PhongShader<'a> {
    pub fn new(
        model: Matrix4<f32>,
        view: &Matrix4<f32>,
        projection: &Matrix4<f32>,
        camera_pos: Point3<f32>,
        light: &'a Light,
        material: &'a PhongMaterial,
    ) -> Self {
        Self {
            model_matrix: model,
            mvp: projection * view * model,
            normal_matrix: TransformFactory::normal_matrix(&model),
            camera_pos,
            light,
            material,
        }
    }

    fn base_color(&self, uv: &Vector2<f32>) -> Vector3<f32> {
        match &self.material.diffuse_texture {
            Some(texture) => texture.sample(uv.x, uv.y),
            None => self.material.diffuse_color,
        }
    }
}

impl Shader for PhongShader<'_> {
    type Varying = PhongVarying;

    fn vertex(&self, vertex: &Vertex) -> (Vector4<f32>, Self::Varying) {
        let position = vertex.position.to_homogeneous();
        let world = self.model_matrix * position;

        let varying = PhongVarying {
            normal: self.normal_matrix * vertex.normal,
            world_pos: Point3::new(world.x, world.y, world.z),
            uv: vertex.texcoord,
        };

        (self.mvp * position, varying)
    }

    fn fragment(&self, varying: Self::Varying) -> Vector4<f32> {
        let mat = self.material;
        let base = self.base_color(&varying.uv);
        let radiance = self.light.radiance();

        let normal = varying.normal.normalize();
        let light_dir = self.light.direction_from(&varying.world_pos);
        let view_dir = (self.camera_pos - varying.world_pos).normalize();

        let ambient = mat.ambient_color.component_mul(&base);

        let diff = normal.dot(&light_dir).max(0.0);
        let diffuse = base.component_mul(&radiance) * diff;

        let reflect_dir = normal * (2.0 * normal.dot(&light_dir)) - light_dir;
        let spec = view_dir.dot(&reflect_dir).max(0.0).powf(mat.shininess);
        let specular = mat.specular_color.component_mul(&self.light.specular_radiance()) * spec;

        let rgb = (ambient + diffuse + specular).map(|c| c.min(1.0));
        Vector4::new(rgb.x, rgb.y, rgb.z, mat.alpha)
    }
}
