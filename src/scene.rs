pub mod camera;
pub mod context;
pub mod light;
pub mod loader;
pub mod material;
pub mod mesh;
pub mod primitives;
pub mod scene_object;
pub mod stats;
pub mod texture;
