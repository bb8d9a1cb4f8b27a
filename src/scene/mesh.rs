use crate::core::geometry::Vertex;
use nalgebra::{Point3, Vector3};
use std::f32::consts::TAU;

/// A collection of vertices and indices representing a 3D object.
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    /// Triangle list, 3 indices per triangle, counter-clockwise front faces.
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Procedural torus centered at the origin, lying in the XY plane.
    ///
    /// `major_radius` is the distance from the torus center to the tube
    /// center, `tube_radius` the radius of the tube itself. The surface is
    /// sampled on a (radial x tubular) grid; normals point from the tube
    /// center circle through the vertex and are unit length analytically.
    pub fn torus(
        major_radius: f32,
        tube_radius: f32,
        radial_segments: u32,
        tubular_segments: u32,
    ) -> Self {
        let mut vertices =
            Vec::with_capacity(((radial_segments + 1) * (tubular_segments + 1)) as usize);

        for j in 0..=radial_segments {
            for i in 0..=tubular_segments {
                // u walks around the main ring, v around the tube section.
                let u = i as f32 / tubular_segments as f32 * TAU;
                let v = j as f32 / radial_segments as f32 * TAU;

                let position = Point3::new(
                    (major_radius + tube_radius * v.cos()) * u.cos(),
                    (major_radius + tube_radius * v.cos()) * u.sin(),
                    tube_radius * v.sin(),
                );
                let normal = Vector3::new(v.cos() * u.cos(), v.cos() * u.sin(), v.sin());

                vertices.push(Vertex::new(position, normal));
            }
        }

        let mut indices = Vec::with_capacity((radial_segments * tubular_segments * 6) as usize);
        let ring = tubular_segments + 1;

        for j in 1..=radial_segments {
            for i in 1..=tubular_segments {
                let a = ring * j + i - 1;
                let b = ring * (j - 1) + i - 1;
                let c = ring * (j - 1) + i;
                let d = ring * j + i;

                indices.extend_from_slice(&[a, b, d]);
                indices.extend_from_slice(&[b, c, d]);
            }
        }

        Self::new(vertices, indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn torus_grid_dimensions() {
        let mesh = Mesh::torus(10.0, 3.0, 16, 25);
        assert_eq!(mesh.vertices.len(), 17 * 26);
        assert_eq!(mesh.indices.len(), (16 * 25 * 2 * 3) as usize);
    }

    #[test]
    fn torus_indices_are_in_range() {
        let mesh = Mesh::torus(10.0, 3.0, 8, 12);
        let count = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < count));
    }

    #[test]
    fn torus_normals_are_unit_length() {
        let mesh = Mesh::torus(10.0, 3.0, 16, 25);
        for vertex in &mesh.vertices {
            assert_relative_eq!(vertex.normal.norm(), 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn torus_seam_vertex_lies_on_outer_equator() {
        // u = v = 0: outermost point on the +X axis, normal along +X.
        let mesh = Mesh::torus(10.0, 3.0, 16, 25);
        let first = &mesh.vertices[0];
        assert_relative_eq!(first.position.x, 13.0, epsilon = 1e-5);
        assert_relative_eq!(first.position.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(first.position.z, 0.0, epsilon = 1e-5);
        assert_relative_eq!(first.normal.x, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn torus_normals_point_away_from_tube_center() {
        let major = 10.0;
        let mesh = Mesh::torus(major, 3.0, 16, 25);
        for vertex in &mesh.vertices {
            let ring_dir = Vector3::new(vertex.position.x, vertex.position.y, 0.0).normalize();
            let tube_center = Point3::from(ring_dir * major);
            let outward = vertex.position - tube_center;
            assert!(vertex.normal.dot(&outward) > 0.0);
        }
    }
}
