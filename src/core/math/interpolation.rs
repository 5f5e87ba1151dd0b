use nalgebra::{Point2, Vector3};

/// Signed doubled area of (a, b, p). Positive when p is to the left of a->b
/// in a y-up frame (right of it on screen, where y points down).
#[inline(always)]
pub fn edge_function(a: Point2<f32>, b: Point2<f32>, p: Point2<f32>) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

/// Re-weights screen-space barycentrics by 1/w so attributes interpolate
/// linearly in view space. `inv_w` holds 1/w per vertex.
#[inline]
pub fn perspective_correct(bary: Vector3<f32>, inv_w: Vector3<f32>) -> Option<Vector3<f32>> {
    let weighted = bary.component_mul(&inv_w);
    let sum = weighted.x + weighted.y + weighted.z;
    if sum.abs() < 1e-12 {
        return None;
    }
    Some(weighted / sum)
}
