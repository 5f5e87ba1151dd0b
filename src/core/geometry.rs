use nalgebra::{Point3, Vector2, Vector3};

/// Number of `f32` components a vertex occupies in an interleaved buffer.
pub const FLOATS_PER_VERTEX: usize = 8;

/// Represents a single vertex in 3D space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position in local object space.
    pub position: Point3<f32>,
    /// Normal vector for lighting calculations.
    pub normal: Vector3<f32>,
    /// Texture coordinates (UV).
    pub texcoord: Vector2<f32>,
}

impl Vertex {
    pub fn new(position: Point3<f32>, normal: Vector3<f32>, texcoord: Vector2<f32>) -> Self {
        Self {
            position,
            normal,
            texcoord,
        }
    }

    /// Flattens the vertex as position -> normal -> texcoord.
    pub fn to_array(&self) -> [f32; FLOATS_PER_VERTEX] {
        [
            self.position.x,
            self.position.y,
            self.position.z,
            self.normal.x,
            self.normal.y,
            self.normal.z,
            self.texcoord.x,
            self.texcoord.y,
        ]
    }
}
