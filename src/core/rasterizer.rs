use crate::core::framebuffer::FrameBuffer;
use crate::core::math::interpolation::{edge_function, perspective_correct};
use crate::core::math::transform::{apply_perspective_division, ndc_to_screen};
use crate::core::pipeline::Shader;
use nalgebra::{Point2, Vector3, Vector4};
use rayon::prelude::*;

/// Vertices with `w` below this after clipping are dropped.
const MIN_W: f32 = 1e-6;

#[derive(PartialEq, Copy, Clone, Debug)]
pub enum CullMode {
    /// Drop triangles wound clockwise on screen (counter-clockwise is front).
    Back,
    Front,
    None,
}

/// Scan-converts clip-space triangles into a [`FrameBuffer`].
///
/// Fragments are depth tested (less), then blended with
/// `src * alpha + dst * (1 - alpha)`; the depth is written for every
/// fragment that passes, translucent or not.
pub struct Rasterizer {
    pub cull_mode: CullMode,
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer {
    pub fn new() -> Self {
        Self {
            cull_mode: CullMode::Back,
        }
    }

    pub fn set_cull_mode(&mut self, mode: CullMode) {
        self.cull_mode = mode;
    }

    /// Clips against the near plane, then fans the remaining polygon.
    ///
    /// Only the near plane needs real clipping: it keeps `w` positive for the
    /// perspective divide. Everything else is handled by clamping the
    /// bounding box and the depth range per fragment.
    pub fn draw_triangle<S: Shader>(
        &self,
        framebuffer: &mut FrameBuffer,
        shader: &S,
        clip_coords: &[Vector4<f32>; 3],
        varyings: &[S::Varying; 3],
    ) {
        // Signed distance to the near plane: z >= -w is inside.
        let dist = |p: &Vector4<f32>| p.z + p.w;

        if clip_coords.iter().all(|p| dist(p) >= 0.0) {
            self.draw_clipped(framebuffer, shader, clip_coords, varyings);
            return;
        }

        let mut polygon: Vec<(Vector4<f32>, S::Varying)> = Vec::with_capacity(4);
        for i in 0..3 {
            let j = (i + 1) % 3;
            let (a, b) = (&clip_coords[i], &clip_coords[j]);
            let (da, db) = (dist(a), dist(b));

            if da >= 0.0 {
                polygon.push((*a, varyings[i]));
            }
            if (da >= 0.0) != (db >= 0.0) {
                let t = da / (da - db);
                polygon.push((a + (b - a) * t, varyings[i] * (1.0 - t) + varyings[j] * t));
            }
        }

        for k in 1..polygon.len().saturating_sub(1) {
            let (p0, v0) = polygon[0];
            let (p1, v1) = polygon[k];
            let (p2, v2) = polygon[k + 1];
            self.draw_clipped(framebuffer, shader, &[p0, p1, p2], &[v0, v1, v2]);
        }
    }

    fn draw_clipped<S: Shader>(
        &self,
        framebuffer: &mut FrameBuffer,
        shader: &S,
        clip_coords: &[Vector4<f32>; 3],
        varyings: &[S::Varying; 3],
    ) {
        if clip_coords.iter().any(|p| p.w < MIN_W) {
            return;
        }

        let width = framebuffer.buffer_width as f32;
        let height = framebuffer.buffer_height as f32;

        let mut screen = [Point2::origin(); 3];
        let mut z_ndc = Vector3::zeros();
        let mut inv_w = Vector3::zeros();
        for i in 0..3 {
            let ndc = apply_perspective_division(&clip_coords[i]);
            screen[i] = ndc_to_screen(ndc.x, ndc.y, width, height);
            z_ndc[i] = ndc.z;
            inv_w[i] = 1.0 / clip_coords[i].w;
        }

        // Screen space has y down, so front faces come out negative here.
        let area = edge_function(screen[0], screen[1], screen[2]);
        if area.abs() < 1e-8 {
            return;
        }
        match self.cull_mode {
            CullMode::Back if area > 0.0 => return,
            CullMode::Front if area < 0.0 => return,
            _ => {}
        }
        let inv_area = 1.0 / area;

        let min_x = screen.iter().map(|p| p.x).fold(f32::INFINITY, f32::min).floor().max(0.0);
        let min_y = screen.iter().map(|p| p.y).fold(f32::INFINITY, f32::min).floor().max(0.0);
        let max_x = screen.iter().map(|p| p.x).fold(f32::NEG_INFINITY, f32::max).ceil().min(width - 1.0);
        let max_y = screen.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max).ceil().min(height - 1.0);
        if min_x > max_x || min_y > max_y {
            return;
        }
        let (x_start, x_end) = (min_x as usize, max_x as usize);
        let (y_start, y_end) = (min_y as usize, max_y as usize);

        let row_len = framebuffer.buffer_width;
        let rows = framebuffer
            .color
            .par_chunks_mut(row_len)
            .zip(framebuffer.depth.par_chunks_mut(row_len));

        rows.enumerate()
            .skip(y_start)
            .take(y_end - y_start + 1)
            .for_each(|(y, (color_row, depth_row))| {
                for x in x_start..=x_end {
                    let p = Point2::new(x as f32 + 0.5, y as f32 + 0.5);
                    let bary = Vector3::new(
                        edge_function(screen[1], screen[2], p),
                        edge_function(screen[2], screen[0], p),
                        edge_function(screen[0], screen[1], p),
                    ) * inv_area;
                    if bary.x < 0.0 || bary.y < 0.0 || bary.z < 0.0 {
                        continue;
                    }

                    // NDC depth is affine in screen space.
                    let z = bary.dot(&z_ndc);
                    if z > 1.0 {
                        continue;
                    }
                    let depth = z * 0.5 + 0.5;
                    if depth >= depth_row[x] {
                        continue;
                    }

                    let Some(w) = perspective_correct(bary, inv_w) else {
                        continue;
                    };
                    let varying = varyings[0] * w.x + varyings[1] * w.y + varyings[2] * w.z;
                    let rgba = shader.fragment(varying);
                    let alpha = rgba.w.clamp(0.0, 1.0);

                    color_row[x] = rgba.xyz() * alpha + color_row[x] * (1.0 - alpha);
                    depth_row[x] = depth;
                }
            });
    }
}
