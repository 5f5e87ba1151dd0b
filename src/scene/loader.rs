use crate::core::math::transform::TransformFactory;
use crate::error::SceneError;
use crate::io::config::Config;
use crate::scene::camera::{OrbitCamera, Projection};
use crate::scene::context::RenderContext;
use crate::scene::light::Light;
use crate::scene::material::PhongMaterial;
use crate::scene::primitives::{create_cube, create_plane, generate_cone, generate_sphere};
use crate::scene::scene_object::SceneObject;
use crate::scene::stats::FrameStats;
use crate::scene::texture::Texture;
use log::info;
use nalgebra::{Point3, Vector3};
use std::sync::Arc;
use std::time::{Duration, Instant};

const CHECKER_SIZE: u32 = 64;
const PLANE_HALF_EXTENT: f32 = 5.0;
const PLANE_UV_REPEAT: f32 = 5.0;
const TRANSLUCENT_ALPHA: f32 = 0.7;

pub fn build_camera(config: &Config) -> (OrbitCamera, Projection) {
    let c = &config.camera;
    let camera = OrbitCamera::new(c.angle_x, c.angle_y, c.distance).with_limits(
        c.min_distance,
        c.drag_sensitivity,
        c.zoom_step,
    );
    let projection = Projection {
        fov_y_degrees: c.fov,
        near: c.near,
        far: c.far,
    };
    (camera, projection)
}

pub fn build_light(config: &Config) -> Light {
    let l = &config.light;
    Light::new(Point3::from(l.position), Vector3::from(l.color), l.intensity)
}

/// The four solids of the scene, opaque ones first.
pub fn build_scene_objects(config: &Config) -> Result<Vec<SceneObject>, SceneError> {
    let cube_texture = Arc::new(Texture::checkerboard(
        CHECKER_SIZE,
        CHECKER_SIZE,
        [255, 255, 255],
        [0, 0, 0],
    )?);
    let plane_texture = Arc::new(Texture::checkerboard(
        CHECKER_SIZE,
        CHECKER_SIZE,
        [192, 192, 192],
        [255, 255, 255],
    )?);

    let cube = SceneObject::new(
        "cube",
        create_cube(),
        PhongMaterial {
            specular_color: Vector3::repeat(0.5),
            shininess: 32.0,
            diffuse_texture: Some(cube_texture),
            ..Default::default()
        },
        TransformFactory::translation(&Vector3::new(-2.0, 2.0, 0.0)),
    );

    let plane = SceneObject::new(
        "plane",
        create_plane(PLANE_HALF_EXTENT, PLANE_UV_REPEAT)?,
        PhongMaterial {
            specular_color: Vector3::repeat(1.0),
            shininess: 128.0,
            diffuse_texture: Some(plane_texture),
            ..Default::default()
        },
        TransformFactory::translation(&Vector3::zeros()),
    );

    let cone = SceneObject::new(
        "cone",
        generate_cone(config.cone.radius, config.cone.height, config.cone.sectors)?,
        PhongMaterial {
            diffuse_color: Vector3::new(1.0, 0.8, 0.0),
            specular_color: Vector3::repeat(1.0),
            shininess: 164.0,
            ..Default::default()
        },
        TransformFactory::translation(&Vector3::new(0.0, 2.0, 0.0)),
    );

    let sphere = SceneObject::new(
        "sphere",
        generate_sphere(config.sphere.radius, config.sphere.sectors, config.sphere.stacks)?,
        PhongMaterial {
            diffuse_color: Vector3::new(0.0, 1.0, 0.0),
            specular_color: Vector3::repeat(0.8),
            shininess: 64.0,
            alpha: TRANSLUCENT_ALPHA,
            ..Default::default()
        },
        TransformFactory::translation(&Vector3::new(2.0, 2.0, 0.0)),
    );

    Ok(vec![cube, plane, cone, sphere])
}

/// Builds camera, light, meshes and counters from a validated config.
pub fn init_scene_resources(config: &Config) -> Result<RenderContext, SceneError> {
    let (camera, projection) = build_camera(config);
    let light = build_light(config);
    let scene_objects = build_scene_objects(config)?;
    let window = Duration::try_from_secs_f32(config.stats.fps_window_secs).map_err(|e| {
        SceneError::invalid(
            "stats.fps_window_secs",
            format!("{e}: {}", config.stats.fps_window_secs),
        )
    })?;
    let stats = FrameStats::new(window, Instant::now());

    let triangles: usize = scene_objects.iter().map(|o| o.mesh.triangle_count()).sum();
    info!(
        "Scene initialized with {} objects ({} triangles).",
        scene_objects.len(),
        triangles
    );

    Ok(RenderContext {
        camera,
        projection,
        light,
        scene_objects,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scene_has_four_objects_with_one_translucent() {
        let context = init_scene_resources(&Config::default()).unwrap();
        let names: Vec<_> = context.scene_objects.iter().map(|o| o.name).collect();
        assert_eq!(names, ["cube", "plane", "cone", "sphere"]);

        let translucent: Vec<_> = context
            .scene_objects
            .iter()
            .filter(|o| !o.material.is_opaque())
            .map(|o| o.name)
            .collect();
        assert_eq!(translucent, ["sphere"]);
    }

    #[test]
    fn config_drives_camera_and_tessellation() {
        let mut config = Config::default();
        config.camera.distance = 8.0;
        config.camera.zoom_step = 0.5;
        config.sphere.sectors = 8;
        config.sphere.stacks = 4;

        let context = init_scene_resources(&config).unwrap();
        assert_eq!(context.camera.distance, 8.0);
        assert_eq!(context.camera.zoom_step, 0.5);
        let sphere = &context.scene_objects[3];
        assert_eq!(sphere.mesh.vertex_count(), 5 * 9);
    }

    #[test]
    fn oversized_fps_window_is_an_error_not_a_panic() {
        let mut config = Config::default();
        config.stats.fps_window_secs = 1e30;
        assert!(config.validate().is_ok());
        assert!(matches!(
            init_scene_resources(&config),
            Err(SceneError::InvalidParameter {
                name: "stats.fps_window_secs",
                ..
            })
        ));

        config.stats.fps_window_secs = f32::INFINITY;
        assert!(init_scene_resources(&config).is_err());
    }

    #[test]
    fn invalid_tessellation_propagates() {
        let mut config = Config::default();
        config.cone.sectors = 2;
        assert!(matches!(
            init_scene_resources(&config),
            Err(SceneError::InvalidParameter { .. })
        ));
    }
}
