use nalgebra::Vector3;

/// Color and depth storage, optionally supersampled.
///
/// Every output pixel owns `sample_count x sample_count` samples laid out in
/// a buffer of `buffer_width x buffer_height`. Rows are contiguous so the
/// rasterizer can hand disjoint rows to different threads.
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    pub sample_count: usize,
    pub buffer_width: usize,
    pub buffer_height: usize,
    pub color: Vec<Vector3<f32>>,
    pub depth: Vec<f32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize, sample_count: usize) -> Self {
        let sample_count = sample_count.max(1);
        let buffer_width = width * sample_count;
        let buffer_height = height * sample_count;
        let size = buffer_width * buffer_height;

        Self {
            width,
            height,
            sample_count,
            buffer_width,
            buffer_height,
            color: vec![Vector3::zeros(); size],
            depth: vec![f32::INFINITY; size],
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    pub fn clear(&mut self, color: Vector3<f32>) {
        self.color.fill(color);
        self.depth.fill(f32::INFINITY);
    }

    /// Box-filtered output pixel.
    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Vector3<f32>> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let n = self.sample_count;
        let mut sum = Vector3::zeros();
        for sy in y * n..(y + 1) * n {
            let row = sy * self.buffer_width;
            for sx in x * n..(x + 1) * n {
                sum += self.color[row + sx];
            }
        }
        Some(sum / (n * n) as f32)
    }

    /// Resolves into tightly packed RGBA8 rows, top row first.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.width * self.height * 4);
        for y in 0..self.height {
            for x in 0..self.width {
                let c = self.get_pixel(x, y).unwrap_or_else(Vector3::zeros);
                out.extend_from_slice(&[
                    quantize(c.x),
                    quantize(c.y),
                    quantize(c.z),
                    255,
                ]);
            }
        }
        out
    }
}

#[inline]
fn quantize(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}
