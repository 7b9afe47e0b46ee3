//! Geometry primitives for 3D rendering
use std::collections::BTreeSet;

use nalgebra::{Point3, Vector3};

/// A 3D vertex with position and normal
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
}

impl Vertex {
    pub fn new(x: f32, y: f32, z: f32, nx: f32, ny: f32, nz: f32) -> Self {
        Self {
            position: Point3::new(x, y, z),
            normal: Vector3::new(nx, ny, nz),
        }
    }
}

/// An edge between two vertex indices, stored with the lower index first
pub type Edge = (usize, usize);

/// An indexed mesh: shared vertices plus faces referencing them
#[derive(Debug, Clone)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub faces: Vec<[usize; 3]>,
}

impl Mesh {
    /// Unique edges of the mesh, as drawn by a wireframe
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges = BTreeSet::new();
        for &[a, b, c] in &self.faces {
            for (from, to) in [(a, b), (b, c), (c, a)] {
                edges.insert((from.min(to), from.max(to)));
            }
        }
        edges.into_iter().collect()
    }

    /// Regular icosahedron with every vertex at `radius` from the origin
    ///
    /// Vertex normals point outward from the centre.
    pub fn icosahedron(radius: f32) -> Self {
        let t = (1.0 + 5.0_f32.sqrt()) / 2.0;

        let corners = [
            (-1.0, t, 0.0),
            (1.0, t, 0.0),
            (-1.0, -t, 0.0),
            (1.0, -t, 0.0),
            (0.0, -1.0, t),
            (0.0, 1.0, t),
            (0.0, -1.0, -t),
            (0.0, 1.0, -t),
            (t, 0.0, -1.0),
            (t, 0.0, 1.0),
            (-t, 0.0, -1.0),
            (-t, 0.0, 1.0),
        ];

        let vertices = corners
            .iter()
            .map(|&(x, y, z)| {
                let normal = Vector3::new(x, y, z).normalize();
                let position = normal * radius;
                Vertex::new(position.x, position.y, position.z, normal.x, normal.y, normal.z)
            })
            .collect();

        let faces = vec![
            [0, 11, 5],
            [0, 5, 1],
            [0, 1, 7],
            [0, 7, 10],
            [0, 10, 11],
            [1, 5, 9],
            [5, 11, 4],
            [11, 10, 2],
            [10, 7, 6],
            [7, 1, 8],
            [3, 9, 4],
            [3, 4, 2],
            [3, 2, 6],
            [3, 6, 8],
            [3, 8, 9],
            [4, 9, 5],
            [2, 4, 11],
            [6, 2, 10],
            [8, 6, 7],
            [9, 8, 1],
        ];

        Self { vertices, faces }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icosahedron_counts() {
        let mesh = Mesh::icosahedron(1.0);
        assert_eq!(mesh.vertices.len(), 12);
        assert_eq!(mesh.faces.len(), 20);
        assert_eq!(mesh.edges().len(), 30);
    }

    #[test]
    fn test_icosahedron_radius() {
        let mesh = Mesh::icosahedron(2.5);
        for vertex in &mesh.vertices {
            assert!((vertex.position.coords.norm() - 2.5).abs() < 1e-5);
        }
    }

    #[test]
    fn test_icosahedron_faces_point_outward() {
        let mesh = Mesh::icosahedron(1.0);
        for &[a, b, c] in &mesh.faces {
            let [p0, p1, p2] = [a, b, c].map(|i| mesh.vertices[i].position);
            let normal = (p1 - p0).cross(&(p2 - p0));
            let centroid = (p0.coords + p1.coords + p2.coords) / 3.0;
            assert!(normal.dot(&centroid) > 0.0);
        }
    }

    #[test]
    fn test_edges_are_ordered() {
        let mesh = Mesh::icosahedron(1.0);
        assert!(mesh.edges().iter().all(|&(a, b)| a < b));
    }
}
