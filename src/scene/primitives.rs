//! Procedural solids used by the scene.
//!
//! All generators emit counter-clockwise triangles when viewed from outside
//! (right-handed coordinates), so back-face culling can stay enabled.

use crate::core::geometry::Vertex;
use crate::error::SceneError;
use crate::scene::mesh::Mesh;
use log::debug;
use nalgebra::{Point3, Vector2, Vector3};
use std::f32::consts::{FRAC_PI_2, PI, TAU};

fn ensure_positive(name: &'static str, value: f32) -> Result<(), SceneError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SceneError::invalid(
            name,
            format!("must be a finite value greater than 0, got {value}"),
        ))
    }
}

fn ensure_at_least(name: &'static str, value: u32, min: u32) -> Result<(), SceneError> {
    if value >= min {
        Ok(())
    } else {
        Err(SceneError::invalid(
            name,
            format!("must be at least {min}, got {value}"),
        ))
    }
}

fn ensure_indexable(name: &'static str, vertex_count: u64) -> Result<(), SceneError> {
    if vertex_count <= u32::MAX as u64 {
        Ok(())
    } else {
        Err(SceneError::invalid(
            name,
            format!("tessellation needs {vertex_count} vertices, more than a u32 index can address"),
        ))
    }
}

/// Generates a latitude/longitude sphere centred at the origin.
///
/// Stacks run from the north pole (`+radius` on Z) to the south pole; sectors
/// sweep `0..=2π`, so the first and last column share positions but keep
/// distinct vertices for the texture seam. Triangles touching a pole are
/// emitted only once per quad, which gives `2 * sectors * (stacks - 1)`
/// triangles in total.
pub fn generate_sphere(radius: f32, sector_count: u32, stack_count: u32) -> Result<Mesh, SceneError> {
    ensure_positive("radius", radius)?;
    ensure_at_least("sector_count", sector_count, 3)?;
    ensure_at_least("stack_count", stack_count, 2)?;
    ensure_indexable(
        "sector_count",
        (stack_count as u64 + 1) * (sector_count as u64 + 1),
    )?;

    let length_inv = 1.0 / radius;
    let sector_step = TAU / sector_count as f32;
    let stack_step = PI / stack_count as f32;

    let mut vertices =
        Vec::with_capacity((stack_count as usize + 1) * (sector_count as usize + 1));

    for i in 0..=stack_count {
        let stack_angle = FRAC_PI_2 - i as f32 * stack_step;
        let ring_radius = radius * stack_angle.cos();
        let z = radius * stack_angle.sin();

        for j in 0..=sector_count {
            let sector_angle = j as f32 * sector_step;
            let position = Point3::new(
                ring_radius * sector_angle.cos(),
                ring_radius * sector_angle.sin(),
                z,
            );
            let normal = position.coords * length_inv;
            let texcoord = Vector2::new(
                j as f32 / sector_count as f32,
                i as f32 / stack_count as f32,
            );
            vertices.push(Vertex::new(position, normal, texcoord));
        }
    }

    let mut indices = Vec::with_capacity(6 * sector_count as usize * (stack_count as usize - 1));
    for i in 0..stack_count {
        let mut k1 = i * (sector_count + 1);
        let mut k2 = k1 + sector_count + 1;

        for _ in 0..sector_count {
            // The whole first ring collapses onto the north pole.
            if i != 0 {
                indices.extend_from_slice(&[k1, k2, k1 + 1]);
            }
            // Same for the last ring and the south pole.
            if i != stack_count - 1 {
                indices.extend_from_slice(&[k1 + 1, k2, k2 + 1]);
            }
            k1 += 1;
            k2 += 1;
        }
    }

    let mesh = Mesh::new(vertices, indices);
    debug!(
        "Generated sphere r={} ({}x{}): {} vertices, {} triangles",
        radius,
        sector_count,
        stack_count,
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

/// Generates a right circular cone standing on the `y = 0` plane with its apex
/// at `(0, height, 0)`.
///
/// The base cap and the lateral surface use separate copies of the rim
/// vertices so the flat base normal never bleeds into the side shading.
/// Vertex layout: base ring, base center, side ring, apex.
///
/// The apex normal is a fixed `(0, 1, 0)`; the lateral normal is undefined
/// there, so the tip shades flat.
pub fn generate_cone(radius: f32, height: f32, sector_count: u32) -> Result<Mesh, SceneError> {
    ensure_positive("radius", radius)?;
    ensure_positive("height", height)?;
    ensure_at_least("sector_count", sector_count, 3)?;
    ensure_indexable("sector_count", 2 * sector_count as u64 + 2)?;

    let n = sector_count;
    let sector_step = TAU / n as f32;
    let slant_inv = 1.0 / (radius * radius + height * height).sqrt();
    let down = Vector3::new(0.0, -1.0, 0.0);

    let rim = |i: u32| {
        let angle = i as f32 * sector_step;
        Point3::new(radius * angle.cos(), 0.0, radius * angle.sin())
    };

    let mut vertices = Vec::with_capacity(2 * n as usize + 2);

    // Base ring, texcoords projected from the disk into the unit square.
    for i in 0..n {
        let p = rim(i);
        let texcoord = Vector2::new((p.x / radius + 1.0) * 0.5, (p.z / radius + 1.0) * 0.5);
        vertices.push(Vertex::new(p, down, texcoord));
    }

    // Base center (fan pivot).
    vertices.push(Vertex::new(Point3::origin(), down, Vector2::new(0.5, 0.5)));

    // Side ring. The y term is constant: it only depends on the half-angle.
    for i in 0..n {
        let p = rim(i);
        let normal = Vector3::new(p.x * slant_inv, radius * slant_inv, p.z * slant_inv).normalize();
        vertices.push(Vertex::new(p, normal, Vector2::new(i as f32 / n as f32, 0.0)));
    }

    // Apex.
    vertices.push(Vertex::new(
        Point3::new(0.0, height, 0.0),
        Vector3::y(),
        Vector2::new(0.5, 1.0),
    ));

    let center = n;
    let side_start = n + 1;
    let apex = side_start + n;

    let mut indices = Vec::with_capacity(6 * n as usize);
    for i in 0..n {
        indices.extend_from_slice(&[i, (i + 1) % n, center]);
    }
    for i in 0..n {
        indices.extend_from_slice(&[side_start + i, apex, side_start + (i + 1) % n]);
    }

    let mesh = Mesh::new(vertices, indices);
    debug!(
        "Generated cone r={} h={} ({} sectors): {} vertices, {} triangles",
        radius,
        height,
        sector_count,
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

/// Unit cube centred at the origin, one quad (two triangles) per face with
/// flat normals and 0..1 UVs. Vertices are not shared between faces.
pub fn create_cube() -> Mesh {
    // (normal, u axis, v axis) with u x v == normal.
    let faces: [(Vector3<f32>, Vector3<f32>, Vector3<f32>); 6] = [
        (-Vector3::z(), -Vector3::x(), Vector3::y()),
        (Vector3::z(), Vector3::x(), Vector3::y()),
        (-Vector3::x(), Vector3::z(), Vector3::y()),
        (Vector3::x(), -Vector3::z(), Vector3::y()),
        (-Vector3::y(), Vector3::x(), Vector3::z()),
        (Vector3::y(), Vector3::x(), -Vector3::z()),
    ];

    let mut vertices = Vec::with_capacity(36);
    for (normal, u, v) in faces {
        let center = normal * 0.5;
        let corner = |s: f32, t: f32| {
            Vertex::new(
                Point3::from(center + u * (s - 0.5) + v * (t - 0.5)),
                normal,
                Vector2::new(s, t),
            )
        };
        let quad = [
            corner(0.0, 0.0),
            corner(1.0, 0.0),
            corner(1.0, 1.0),
            corner(0.0, 1.0),
        ];
        vertices.extend_from_slice(&[quad[0], quad[1], quad[2], quad[2], quad[3], quad[0]]);
    }

    Mesh::from_triangle_list(vertices)
}

/// Square ground plane on `y = 0` facing up. UVs span `0..uv_repeat` so a
/// repeating texture tiles across it.
pub fn create_plane(half_extent: f32, uv_repeat: f32) -> Result<Mesh, SceneError> {
    ensure_positive("half_extent", half_extent)?;
    ensure_positive("uv_repeat", uv_repeat)?;

    let h = half_extent;
    let corner = |x: f32, z: f32| {
        let u = (x + h) / (2.0 * h) * uv_repeat;
        let v = (h - z) / (2.0 * h) * uv_repeat;
        Vertex::new(Point3::new(x, 0.0, z), Vector3::y(), Vector2::new(u, v))
    };

    let vertices = vec![corner(-h, -h), corner(h, h), corner(h, -h), corner(-h, h)];
    let indices = vec![0, 1, 2, 1, 0, 3];
    Ok(Mesh::new(vertices, indices))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn assert_indices_valid(mesh: &Mesh) {
        assert_eq!(mesh.indices.len() % 3, 0);
        let count = mesh.vertex_count() as u32;
        for &idx in &mesh.indices {
            assert!(idx < count, "index {idx} out of range ({count} vertices)");
        }
    }

    /// Face normal from the winding must agree with the averaged vertex normals.
    fn assert_outward_winding(mesh: &Mesh) {
        for (t, [a, b, c]) in mesh.triangles().enumerate() {
            let face = (b.position - a.position).cross(&(c.position - a.position));
            let smooth = a.normal + b.normal + c.normal;
            assert!(
                face.dot(&smooth) > 0.0,
                "triangle {t} is wound inward (face {face:?}, normals {smooth:?})"
            );
        }
    }

    fn assert_no_nan(mesh: &Mesh) {
        assert!(mesh.vertex_buffer().iter().all(|c| c.is_finite()));
    }

    #[test]
    fn sphere_counts_follow_tessellation() {
        for &(sectors, stacks) in &[(3, 2), (4, 3), (36, 18), (64, 5)] {
            let mesh = generate_sphere(0.5, sectors, stacks).unwrap();
            assert_eq!(
                mesh.vertex_count(),
                ((stacks + 1) * (sectors + 1)) as usize
            );
            assert_eq!(mesh.triangle_count(), (2 * sectors * (stacks - 1)) as usize);
            assert_indices_valid(&mesh);
        }
    }

    #[test]
    fn sphere_normals_are_unit_length() {
        for &radius in &[0.01, 0.5, 1.0, 37.5] {
            let mesh = generate_sphere(radius, 36, 18).unwrap();
            for v in &mesh.vertices {
                assert!(
                    (v.normal.norm() - 1.0).abs() < EPS,
                    "normal {:?} for r={radius}",
                    v.normal
                );
                assert!((v.position.coords.norm() - radius).abs() < radius * EPS);
            }
        }
    }

    #[test]
    fn sphere_rows_start_at_north_pole_and_end_at_south_pole() {
        let mesh = generate_sphere(2.0, 8, 4).unwrap();
        let first = &mesh.vertices[0];
        let last = mesh.vertices.last().unwrap();
        assert!((first.position.z - 2.0).abs() < EPS);
        assert!((last.position.z + 2.0).abs() < EPS);
        assert_eq!(first.texcoord, Vector2::new(0.0, 0.0));
        assert_eq!(last.texcoord, Vector2::new(1.0, 1.0));
    }

    #[test]
    fn sphere_seam_columns_coincide() {
        let sectors = 12;
        let mesh = generate_sphere(1.0, sectors, 6).unwrap();
        let row = (sectors + 1) as usize;
        for i in 0..=6usize {
            let first = &mesh.vertices[i * row];
            let last = &mesh.vertices[i * row + sectors as usize];
            assert!((first.position - last.position).norm() < EPS);
            assert_eq!(first.texcoord.x, 0.0);
            assert_eq!(last.texcoord.x, 1.0);
        }
    }

    #[test]
    fn sphere_has_no_degenerate_pole_triangles() {
        let mesh = generate_sphere(1.0, 10, 5).unwrap();
        for [a, b, c] in mesh.triangles() {
            let area = (b.position - a.position)
                .cross(&(c.position - a.position))
                .norm();
            assert!(area > 1e-6);
        }
    }

    #[test]
    fn sphere_is_wound_outward() {
        let mesh = generate_sphere(0.5, 36, 18).unwrap();
        assert_outward_winding(&mesh);
        assert_no_nan(&mesh);
    }

    #[test]
    fn sphere_rejects_invalid_parameters() {
        for (radius, sectors, stacks, name) in [
            (0.0, 36, 18, "radius"),
            (-1.0, 36, 18, "radius"),
            (f32::NAN, 36, 18, "radius"),
            (1.0, 2, 18, "sector_count"),
            (1.0, 36, 1, "stack_count"),
        ] {
            match generate_sphere(radius, sectors, stacks) {
                Err(SceneError::InvalidParameter { name: got, .. }) => assert_eq!(got, name),
                other => panic!("expected InvalidParameter({name}), got {other:?}"),
            }
        }
    }

    #[test]
    fn default_cone_has_expected_counts() {
        let mesh = generate_cone(0.5, 1.0, 36).unwrap();
        assert_eq!(mesh.vertex_count(), 74);
        assert_eq!(mesh.triangle_count(), 72);
        assert_indices_valid(&mesh);
    }

    #[test]
    fn cone_base_normals_point_down() {
        let n = 36;
        let mesh = generate_cone(0.5, 1.0, n).unwrap();
        for v in &mesh.vertices[..=n as usize] {
            assert_eq!(v.normal, Vector3::new(0.0, -1.0, 0.0));
            assert_eq!(v.position.y, 0.0);
        }
        let center = &mesh.vertices[n as usize];
        assert_eq!(center.position, Point3::origin());
        assert_eq!(center.texcoord, Vector2::new(0.5, 0.5));
    }

    #[test]
    fn cone_side_normals_are_unit_and_tilted_up() {
        let n = 36usize;
        let mesh = generate_cone(0.5, 1.0, n as u32).unwrap();
        let side = &mesh.vertices[n + 1..2 * n + 1];
        for (i, v) in side.iter().enumerate() {
            assert!((v.normal.norm() - 1.0).abs() < EPS);
            assert!(v.normal.y > 0.0);
            // Same rim position as the base copy.
            assert_eq!(v.position, mesh.vertices[i].position);
            assert_eq!(v.texcoord, Vector2::new(i as f32 / n as f32, 0.0));
        }
    }

    #[test]
    fn cone_side_normals_keep_constant_tilt() {
        // x and z sweep a circle of the same radius as the y term, so after
        // normalisation the tilt is 45 degrees whatever the height.
        for &height in &[0.25, 1.0, 4.0] {
            let mesh = generate_cone(0.5, height, 8).unwrap();
            for v in &mesh.vertices[9..17] {
                assert!((v.normal.y - std::f32::consts::FRAC_1_SQRT_2).abs() < EPS);
            }
        }
    }

    #[test]
    fn cone_apex_uses_up_normal() {
        let mesh = generate_cone(0.5, 2.0, 12).unwrap();
        let apex = mesh.vertices.last().unwrap();
        assert_eq!(apex.position, Point3::new(0.0, 2.0, 0.0));
        assert_eq!(apex.normal, Vector3::y());
        assert_eq!(apex.texcoord, Vector2::new(0.5, 1.0));
    }

    #[test]
    fn cone_base_texcoords_stay_in_unit_square() {
        let mesh = generate_cone(3.0, 1.0, 24).unwrap();
        for v in &mesh.vertices[..24] {
            assert!((-EPS..=1.0 + EPS).contains(&v.texcoord.x));
            assert!((-EPS..=1.0 + EPS).contains(&v.texcoord.y));
        }
        assert!((mesh.vertices[0].texcoord - Vector2::new(1.0, 0.5)).norm() < EPS);
    }

    #[test]
    fn cone_is_wound_outward() {
        let mesh = generate_cone(0.5, 1.0, 36).unwrap();
        assert_outward_winding(&mesh);
        assert_no_nan(&mesh);
    }

    #[test]
    fn cone_rejects_invalid_parameters() {
        for (radius, height, sectors, name) in [
            (0.0, 1.0, 36, "radius"),
            (0.5, -1.0, 36, "height"),
            (0.5, f32::INFINITY, 36, "height"),
            (0.5, 1.0, 2, "sector_count"),
        ] {
            match generate_cone(radius, height, sectors) {
                Err(SceneError::InvalidParameter { name: got, .. }) => assert_eq!(got, name),
                other => panic!("expected InvalidParameter({name}), got {other:?}"),
            }
        }
    }

    #[test]
    fn cube_has_six_outward_faces() {
        let mesh = create_cube();
        assert_eq!(mesh.vertex_count(), 36);
        assert_eq!(mesh.triangle_count(), 12);
        assert_outward_winding(&mesh);
        for v in &mesh.vertices {
            assert!(v.position.coords.amax() <= 0.5 + EPS);
            assert!((v.normal.norm() - 1.0).abs() < EPS);
            // every vertex lies on the face its normal points at
            assert!((v.position.coords.dot(&v.normal) - 0.5).abs() < EPS);
        }
    }

    #[test]
    fn plane_faces_up_and_tiles_uvs() {
        let mesh = create_plane(5.0, 5.0).unwrap();
        assert_eq!(mesh.triangle_count(), 2);
        assert_outward_winding(&mesh);
        let max_u = mesh.vertices.iter().map(|v| v.texcoord.x).fold(0.0, f32::max);
        let max_v = mesh.vertices.iter().map(|v| v.texcoord.y).fold(0.0, f32::max);
        assert_eq!(max_u, 5.0);
        assert_eq!(max_v, 5.0);
    }
}
