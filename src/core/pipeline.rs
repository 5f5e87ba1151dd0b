use crate::core::geometry::Vertex;
use nalgebra::Vector4;
use std::ops::{Add, Mul};

/// Per-vertex shader outputs that can be blended across a triangle.
///
/// Rows of a triangle are shaded on several threads, hence `Send + Sync`.
pub trait Interpolatable:
    Copy + Add<Output = Self> + Mul<f32, Output = Self> + Send + Sync
{
}

impl<T> Interpolatable for T where T: Copy + Add<Output = T> + Mul<f32, Output = T> + Send + Sync {}

/// Programmable stages of the pipeline.
pub trait Shader: Send + Sync {
    type Varying: Interpolatable;

    /// Returns the clip-space position and the varyings for one vertex.
    fn vertex(&self, vertex: &Vertex) -> (Vector4<f32>, Self::Varying);

    /// Returns straight (non-premultiplied) RGBA for one fragment.
    fn fragment(&self, varying: Self::Varying) -> Vector4<f32>;
}
