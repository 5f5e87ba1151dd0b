use crate::core::framebuffer::FrameBuffer;
use crate::error::SceneError;
use image::RgbaImage;
use log::info;
use std::path::Path;

/// Resolves the framebuffer and writes it as an image; the format follows
/// the file extension.
pub fn save_framebuffer<P: AsRef<Path>>(framebuffer: &FrameBuffer, path: P) -> Result<(), SceneError> {
    let path = path.as_ref();
    let img = RgbaImage::from_raw(
        framebuffer.width as u32,
        framebuffer.height as u32,
        framebuffer.to_rgba8(),
    )
    .ok_or_else(|| SceneError::invalid("framebuffer", "pixel data does not match its size"))?;

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    img.save(path)?;
    info!("Saved {}x{} image to '{}'", img.width(), img.height(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn writes_png_with_framebuffer_size() {
        let mut fb = FrameBuffer::new(5, 3, 2);
        fb.clear(Vector3::new(1.0, 0.0, 0.0));

        let path = std::env::temp_dir().join(format!("orbit_scene_save_{}.png", std::process::id()));
        save_framebuffer(&fb, &path).unwrap();

        let loaded = image::open(&path).unwrap().to_rgba8();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded.dimensions(), (5, 3));
        assert_eq!(loaded.get_pixel(4, 2).0, [255, 0, 0, 255]);
    }

    #[test]
    fn unknown_extension_is_an_image_error() {
        let fb = FrameBuffer::new(2, 2, 1);
        let path = std::env::temp_dir().join("orbit_scene_save.unknownext");
        assert!(matches!(save_framebuffer(&fb, &path), Err(SceneError::Image(_))));
    }
}
