use nalgebra::{Matrix3, Matrix4, Point2, Point3, Vector3, Vector4};

//=================================
// Transform Matrix Factory
//=================================

/// Builds the handful of right-handed matrices the scene needs.
/// Written out by hand so the conventions (camera looks down -Z, NDC depth in
/// [-1, 1]) are visible in one place.
pub struct TransformFactory;

#[rustfmt::skip]
impl TransformFactory {
    pub fn translation(offset: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new(
            1.0, 0.0, 0.0, offset.x,
            0.0, 1.0, 0.0, offset.y,
            0.0, 0.0, 1.0, offset.z,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Look-at view matrix from an orthonormal camera basis.
    ///
    /// `up` must not be parallel to `target - eye`; callers that can reach
    /// that configuration pick a different up vector first.
    pub fn view(eye: &Point3<f32>, target: &Point3<f32>, up: &Vector3<f32>) -> Matrix4<f32> {
        let back = (eye - target).normalize();
        let right = up.cross(&back).normalize();
        let cam_up = back.cross(&right);
        let e = eye.coords;

        Matrix4::new(
            right.x,  right.y,  right.z,  -right.dot(&e),
            cam_up.x, cam_up.y, cam_up.z, -cam_up.dot(&e),
            back.x,   back.y,   back.z,   -back.dot(&e),
            0.0,      0.0,      0.0,      1.0,
        )
    }

    /// OpenGL-style perspective projection. Maps `-near` to NDC -1 and `-far` to +1.
    pub fn perspective(aspect_ratio: f32, fov_y_rad: f32, near: f32, far: f32) -> Matrix4<f32> {
        let f = 1.0 / (fov_y_rad * 0.5).tan();
        let depth = 1.0 / (near - far);

        Matrix4::new(
            f / aspect_ratio, 0.0, 0.0,                 0.0,
            0.0,              f,   0.0,                 0.0,
            0.0,              0.0, (far + near) * depth, 2.0 * far * near * depth,
            0.0,              0.0, -1.0,                0.0,
        )
    }

    /// Inverse-transpose of the upper 3x3 block, for transforming normals.
    pub fn normal_matrix(model: &Matrix4<f32>) -> Matrix3<f32> {
        let linear = model.fixed_view::<3, 3>(0, 0).into_owned();
        linear
            .try_inverse()
            .map(|inv| inv.transpose())
            .unwrap_or_else(Matrix3::identity)
    }
}

/// Clip space -> NDC. Callers guarantee `w > 0` (near-plane clipping).
#[inline]
pub fn apply_perspective_division(clip: &Vector4<f32>) -> Point3<f32> {
    let inv_w = 1.0 / clip.w;
    Point3::new(clip.x * inv_w, clip.y * inv_w, clip.z * inv_w)
}

/// NDC -> screen coordinates. Screen Y grows downwards.
#[inline]
pub fn ndc_to_screen(ndc_x: f32, ndc_y: f32, width: f32, height: f32) -> Point2<f32> {
    Point2::new(
        (ndc_x + 1.0) * 0.5 * width,
        (1.0 - ndc_y) * 0.5 * height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn view_moves_eye_to_origin_and_looks_down_negative_z() {
        let eye = Point3::new(3.0, 2.0, 4.0);
        let view = TransformFactory::view(&eye, &Point3::origin(), &Vector3::y());
        let eye_view = view.transform_point(&eye);
        assert!(eye_view.coords.norm() < EPS);

        let target_view = view.transform_point(&Point3::origin());
        let dist = eye.coords.norm();
        assert!(target_view.x.abs() < EPS);
        assert!(target_view.y.abs() < EPS);
        assert!((target_view.z + dist).abs() < 1e-4);
    }

    #[test]
    fn perspective_maps_near_and_far_planes() {
        let proj = TransformFactory::perspective(1.5, 45f32.to_radians(), 1.0, 100.0);
        let near = proj * Vector4::new(0.0, 0.0, -1.0, 1.0);
        let far = proj * Vector4::new(0.0, 0.0, -100.0, 1.0);
        assert!((near.z / near.w + 1.0).abs() < EPS);
        assert!((far.z / far.w - 1.0).abs() < 1e-4);
    }

    #[test]
    fn normal_matrix_undoes_uniform_scale() {
        let model = TransformFactory::translation(&Vector3::new(1.0, 2.0, 3.0))
            * Matrix4::new_scaling(2.0);
        let n = TransformFactory::normal_matrix(&model) * Vector3::y();
        assert!((n - Vector3::new(0.0, 0.5, 0.0)).norm() < EPS);
    }

    #[test]
    fn screen_y_is_flipped() {
        let top_left = ndc_to_screen(-1.0, 1.0, 800.0, 600.0);
        assert_eq!(top_left, Point2::new(0.0, 0.0));
        let bottom_right = ndc_to_screen(1.0, -1.0, 800.0, 600.0);
        assert_eq!(bottom_right, Point2::new(800.0, 600.0));
    }
}
