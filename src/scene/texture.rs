use crate::error::SceneError;
use image::{Rgb, RgbImage};
use log::debug;
use nalgebra::Vector3;

/// Represents a 2D texture map.
#[derive(Debug, Clone)]
pub struct Texture {
    pub image: RgbImage,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    pub fn from_image(image: RgbImage) -> Result<Self, SceneError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(SceneError::invalid("texture", "image has no texels"));
        }
        Ok(Self {
            image,
            width,
            height,
        })
    }

    /// Checkerboard of 8x8-texel squares. Texel (row, col) gets `color_a`
    /// when exactly one of `row & 8`, `col & 8` is zero.
    pub fn checkerboard(
        width: u32,
        height: u32,
        color_a: [u8; 3],
        color_b: [u8; 3],
    ) -> Result<Self, SceneError> {
        let image = RgbImage::from_fn(width, height, |col, row| {
            if ((row & 8) == 0) ^ ((col & 8) == 0) {
                Rgb(color_a)
            } else {
                Rgb(color_b)
            }
        });
        debug!("Generated {}x{} checkerboard texture", width, height);
        Self::from_image(image)
    }

    /// Bilinear sample with repeat wrapping. Row 0 of the image is `v = 0`.
    pub fn sample(&self, u: f32, v: f32) -> Vector3<f32> {
        let x = u.rem_euclid(1.0) * self.width as f32 - 0.5;
        let y = v.rem_euclid(1.0) * self.height as f32 - 0.5;

        let x0 = x.floor();
        let y0 = y.floor();
        let fx = x - x0;
        let fy = y - y0;
        let (x0, y0) = (x0 as i64, y0 as i64);

        let top = self.texel(x0, y0) * (1.0 - fx) + self.texel(x0 + 1, y0) * fx;
        let bottom = self.texel(x0, y0 + 1) * (1.0 - fx) + self.texel(x0 + 1, y0 + 1) * fx;
        top * (1.0 - fy) + bottom * fy
    }

    fn texel(&self, x: i64, y: i64) -> Vector3<f32> {
        let x = x.rem_euclid(self.width as i64) as u32;
        let y = y.rem_euclid(self.height as i64) as u32;
        let Rgb([r, g, b]) = *self.image.get_pixel(x, y);
        Vector3::new(r as f32, g as f32, b as f32) / 255.0
    }
}
