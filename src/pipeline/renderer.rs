use crate::core::framebuffer::FrameBuffer;
use crate::core::pipeline::Shader;
use crate::core::rasterizer::{CullMode, Rasterizer};
use crate::scene::mesh::Mesh;
use nalgebra::Vector3;
use rayon::prelude::*;

/// Drives vertex processing and primitive assembly on top of the rasterizer.
pub struct Renderer {
    pub rasterizer: Rasterizer,
    pub framebuffer: FrameBuffer,
}

impl Renderer {
    /// `sample_count`: 1 for no AA, 2 for 2x2 SSAA, etc.
    pub fn new(width: usize, height: usize, sample_count: usize) -> Self {
        Self {
            rasterizer: Rasterizer::new(),
            framebuffer: FrameBuffer::new(width, height, sample_count),
        }
    }

    pub fn set_cull_back_faces(&mut self, enabled: bool) {
        self.rasterizer
            .set_cull_mode(if enabled { CullMode::Back } else { CullMode::None });
    }

    /// Reallocates the framebuffer when the target size changes.
    /// Reallocates the framebuffer if the size differs. Returns true when it did.
    pub fn resize(&mut self, width: usize, height: usize) -> bool {
        if self.framebuffer.width == width && self.framebuffer.height == height {
            return false;
        }
        let samples = self.framebuffer.sample_count;
        self.framebuffer = FrameBuffer::new(width, height, samples);
        true
    }

    pub fn clear(&mut self, color: Vector3<f32>) {
        self.framebuffer.clear(color);
    }

    pub fn draw_mesh<S: Shader>(&mut self, mesh: &Mesh, shader: &S) {
        // Each vertex is shaded once, however many triangles share it.
        let processed: Vec<_> = mesh.vertices.par_iter().map(|v| shader.vertex(v)).collect();

        for tri in mesh.indices.chunks_exact(3) {
            let (p0, v0) = processed[tri[0] as usize];
            let (p1, v1) = processed[tri[1] as usize];
            let (p2, v2) = processed[tri[2] as usize];

            self.rasterizer
                .draw_triangle(&mut self.framebuffer, shader, &[p0, p1, p2], &[v0, v1, v2]);
        }
    }
}
