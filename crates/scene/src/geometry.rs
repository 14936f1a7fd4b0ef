use glam::{Mat3, Mat4, Vec3};
use std::f32::consts::TAU;

/// Index into a `SceneGraph`'s geometry registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GeometryId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
}

/// Flat-shaded triangle soup: every three vertices form one triangle and all
/// three share the face normal. Winding is counter-clockwise seen from outside.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometry {
    vertices: Vec<Vertex>,
}

impl Geometry {
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    fn push_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3) {
        let normal = (b - a).cross(c - a).normalize_or_zero();
        for position in [a, b, c] {
            self.vertices.push(Vertex { position, normal });
        }
    }

    fn push_quad(&mut self, a: Vec3, b: Vec3, c: Vec3, d: Vec3) {
        self.push_triangle(a, b, c);
        self.push_triangle(a, c, d);
    }

    /// Axis-aligned box centered on the origin.
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let (x, y, z) = (width * 0.5, height * 0.5, depth * 0.5);
        let v = Vec3::new;
        let mut g = Self::default();
        // +Z, -Z, +X, -X, +Y, -Y
        g.push_quad(v(-x, -y, z), v(x, -y, z), v(x, y, z), v(-x, y, z));
        g.push_quad(v(x, -y, -z), v(-x, -y, -z), v(-x, y, -z), v(x, y, -z));
        g.push_quad(v(x, -y, z), v(x, -y, -z), v(x, y, -z), v(x, y, z));
        g.push_quad(v(-x, -y, -z), v(-x, -y, z), v(-x, y, z), v(-x, y, -z));
        g.push_quad(v(-x, y, z), v(x, y, z), v(x, y, -z), v(-x, y, -z));
        g.push_quad(v(-x, -y, -z), v(x, -y, -z), v(x, -y, z), v(-x, -y, z));
        g
    }

    /// Closed cylinder along Y, centered on the origin.
    ///
    /// Angle 0 points at +Z and increases towards +X.
    pub fn cylinder(
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        radial_segments: u32,
        height_segments: u32,
    ) -> Self {
        let radial = radial_segments.max(3);
        let rings = height_segments.max(1);
        let half = height * 0.5;

        let point = |ring: u32, seg: u32| {
            let t = ring as f32 / rings as f32;
            let radius = radius_top + (radius_bottom - radius_top) * t;
            let theta = seg as f32 / radial as f32 * TAU;
            Vec3::new(radius * theta.sin(), half - t * height, radius * theta.cos())
        };

        let mut g = Self::default();
        for ring in 0..rings {
            for seg in 0..radial {
                g.push_quad(
                    point(ring, seg),
                    point(ring + 1, seg),
                    point(ring + 1, seg + 1),
                    point(ring, seg + 1),
                );
            }
        }

        let top = Vec3::new(0.0, half, 0.0);
        let bottom = Vec3::new(0.0, -half, 0.0);
        for seg in 0..radial {
            if radius_top > 0.0 {
                g.push_triangle(top, point(0, seg), point(0, seg + 1));
            }
            if radius_bottom > 0.0 {
                g.push_triangle(bottom, point(rings, seg + 1), point(rings, seg));
            }
        }
        g
    }

    /// Bake a matrix into the vertex data.
    pub fn apply_matrix(&mut self, m: Mat4) {
        let normal_matrix = Mat3::from_mat4(m).inverse().transpose();
        for v in &mut self.vertices {
            v.position = m.transform_point3(v.position);
            v.normal = (normal_matrix * v.normal).normalize_or_zero();
        }
    }

    /// Axis-aligned bounds as `(min, max)`, or `None` for empty geometry.
    #[cfg(test)]
    pub(crate) fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = self.vertices.first()?.position;
        Some(self.vertices.iter().fold((first, first), |(lo, hi), v| {
            (lo.min(v.position), hi.max(v.position))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cuboid_has_twelve_triangles() {
        let g = Geometry::cuboid(60.0, 50.0, 50.0);
        assert_eq!(g.triangle_count(), 12);
        let (lo, hi) = g.bounds().unwrap();
        assert_eq!(lo, Vec3::new(-30.0, -25.0, -25.0));
        assert_eq!(hi, Vec3::new(30.0, 25.0, 25.0));
    }

    #[test]
    fn cuboid_normals_point_outward() {
        let g = Geometry::cuboid(2.0, 2.0, 2.0);
        for tri in g.vertices().chunks(3) {
            let centroid = (tri[0].position + tri[1].position + tri[2].position) / 3.0;
            assert!(centroid.dot(tri[0].normal) > 0.0);
        }
    }

    #[test]
    fn cylinder_triangle_count() {
        let g = Geometry::cylinder(600.0, 600.0, 800.0, 40, 10);
        // sides: 40 * 10 quads, plus two 40-triangle caps
        assert_eq!(g.triangle_count(), 40 * 10 * 2 + 40 * 2);
    }

    #[test]
    fn cylinder_normals_point_outward() {
        let g = Geometry::cylinder(1.0, 1.0, 2.0, 8, 2);
        for tri in g.vertices().chunks(3) {
            let centroid = (tri[0].position + tri[1].position + tri[2].position) / 3.0;
            assert!(centroid.dot(tri[0].normal) > 0.0);
        }
    }

    #[test]
    fn apply_matrix_rotates_axis() {
        let mut g = Geometry::cylinder(1.0, 1.0, 10.0, 8, 1);
        g.apply_matrix(Mat4::from_rotation_x(-std::f32::consts::FRAC_PI_2));
        let (lo, hi) = g.bounds().unwrap();
        // the long axis now runs along Z
        assert!((hi.z - lo.z - 10.0).abs() < 1e-3);
        assert!(hi.y - lo.y < 2.1);
    }

    #[test]
    fn empty_geometry_has_no_bounds() {
        assert!(Geometry::default().bounds().is_none());
    }
}
