use crate::scene::camera::{OrbitCamera, Projection};
use crate::scene::light::Light;
use crate::scene::scene_object::SceneObject;
use crate::scene::stats::FrameStats;

/// Everything the scene pass reads, plus the state input handlers mutate.
pub struct RenderContext {
    pub camera: OrbitCamera,
    pub projection: Projection,
    pub light: Light,
    pub scene_objects: Vec<SceneObject>,
    pub stats: FrameStats,
}
