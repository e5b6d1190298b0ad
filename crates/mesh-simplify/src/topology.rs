//! Derived mesh connectivity.
//!
//! [`MeshTopology`] is a working view of a [`Mesh`]: positions and face
//! indices copied out of the exchange type, plus everything the contraction
//! engine needs that the exchange type deliberately does not carry —
//! vertex↔vertex adjacency, vertex↔face incidence, per-face normals, areas
//! and centers, and the deduplicated undirected edge set.
//!
//! All derived data is computed once in [`MeshTopology::build`]. The type
//! itself performs no mutation; during decimation the contraction engine
//! rewrites positions, faces, adjacency and incidence in place and is
//! responsible for keeping the entries it touches consistent.

use std::collections::BTreeSet;

use nalgebra::{Point3, Vector3};

use crate::types::{Mesh, Triangle};

/// Connectivity and per-face geometry derived from a triangle mesh.
#[derive(Debug, Clone)]
pub struct MeshTopology {
    /// Number of vertices in the original arrays (live or not).
    pub vertex_count: usize,

    /// Number of faces in the original arrays (live or not).
    pub face_count: usize,

    /// Vertex positions, mutated in place during contraction.
    pub positions: Vec<Point3<f64>>,

    /// Triangle faces; vertex indices are rewritten in place when a vertex
    /// is merged into another.
    pub faces: Vec<[u32; 3]>,

    /// For each vertex, the set of vertices sharing an edge with it.
    ///
    /// Symmetrized: if `b` is in `vertex_adjacency[a]` then `a` is in
    /// `vertex_adjacency[b]`. The undirected edge set itself is kept
    /// separately in [`edges`](Self::edges).
    pub vertex_adjacency: Vec<BTreeSet<u32>>,

    /// For each vertex, the set of face indices that reference it.
    pub vertex_faces: Vec<BTreeSet<u32>>,

    /// Unit normal per face; the zero vector for degenerate faces.
    pub face_normals: Vec<Vector3<f64>>,

    /// Area per face.
    pub face_areas: Vec<f64>,

    /// Centroid per face.
    pub face_centers: Vec<Point3<f64>>,

    /// Deduplicated undirected edges as `(min, max)` index pairs, sorted.
    pub edges: Vec<(u32, u32)>,
}

impl MeshTopology {
    /// Derive the full topology from a mesh.
    pub fn build(mesh: &Mesh) -> Self {
        let vertex_count = mesh.vertex_count();
        let face_count = mesh.face_count();

        let positions: Vec<Point3<f64>> = mesh.vertices.iter().map(|v| v.position).collect();
        let faces = mesh.faces.clone();

        // Deduplicated undirected edge set. A BTreeSet keeps the derived
        // edge list in a reproducible order independent of face order.
        let mut edge_set: BTreeSet<(u32, u32)> = BTreeSet::new();
        for face in &faces {
            for i in 0..3 {
                let a = face[i];
                let b = face[(i + 1) % 3];
                if a != b {
                    edge_set.insert(if a < b { (a, b) } else { (b, a) });
                }
            }
        }
        let edges: Vec<(u32, u32)> = edge_set.into_iter().collect();

        let mut vertex_adjacency = vec![BTreeSet::new(); vertex_count];
        for &(a, b) in &edges {
            vertex_adjacency[a as usize].insert(b);
            vertex_adjacency[b as usize].insert(a);
        }

        let mut vertex_faces = vec![BTreeSet::new(); vertex_count];
        for (fi, face) in faces.iter().enumerate() {
            for &v in face {
                vertex_faces[v as usize].insert(fi as u32);
            }
        }

        let mut face_normals = Vec::with_capacity(face_count);
        let mut face_areas = Vec::with_capacity(face_count);
        let mut face_centers = Vec::with_capacity(face_count);
        for &[i0, i1, i2] in &faces {
            let tri = Triangle::new(
                positions[i0 as usize],
                positions[i1 as usize],
                positions[i2 as usize],
            );
            face_normals.push(tri.normal().unwrap_or_else(Vector3::zeros));
            face_areas.push(tri.area());
            face_centers.push(tri.centroid());
        }

        Self {
            vertex_count,
            face_count,
            positions,
            faces,
            vertex_adjacency,
            vertex_faces,
            face_normals,
            face_areas,
            face_centers,
            edges,
        }
    }

    /// The triangle geometry of a face at its current (possibly rewritten)
    /// vertex positions.
    #[inline]
    pub fn face_triangle(&self, face: u32) -> Triangle {
        let [i0, i1, i2] = self.faces[face as usize];
        Triangle::new(
            self.positions[i0 as usize],
            self.positions[i1 as usize],
            self.positions[i2 as usize],
        )
    }

    /// Recompute the cached normal, area, and centroid of a face from its
    /// current vertex positions. Called by the contraction engine after it
    /// rewrites a face's indices.
    pub fn refresh_face(&mut self, face: u32) {
        let tri = self.face_triangle(face);
        let fi = face as usize;
        self.face_normals[fi] = tri.normal().unwrap_or_else(Vector3::zeros);
        self.face_areas[fi] = tri.area();
        self.face_centers[fi] = tri.centroid();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Vertex;

    /// Two triangles sharing the edge (1, 2).
    fn quad_mesh() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(1.0, 1.0, 0.0));
        mesh.faces.push([0, 1, 2]);
        mesh.faces.push([1, 3, 2]);
        mesh
    }

    #[test]
    fn test_edge_deduplication() {
        let topo = MeshTopology::build(&quad_mesh());
        // 5 distinct undirected edges: 4 boundary + 1 shared diagonal.
        assert_eq!(topo.edges.len(), 5);
        assert!(topo.edges.contains(&(1, 2)));
        // Edges are normalized to (min, max).
        for &(a, b) in &topo.edges {
            assert!(a < b);
        }
    }

    #[test]
    fn test_adjacency_is_symmetric() {
        let topo = MeshTopology::build(&quad_mesh());
        for (v, neighbors) in topo.vertex_adjacency.iter().enumerate() {
            for &n in neighbors {
                assert!(
                    topo.vertex_adjacency[n as usize].contains(&(v as u32)),
                    "adjacency asymmetric between {} and {}",
                    v,
                    n
                );
            }
        }
        // The diagonal endpoints see all three other vertices.
        assert_eq!(topo.vertex_adjacency[1].len(), 3);
        assert_eq!(topo.vertex_adjacency[2].len(), 3);
        // The off-diagonal corners only see the diagonal endpoints.
        assert_eq!(topo.vertex_adjacency[0].len(), 2);
        assert_eq!(topo.vertex_adjacency[3].len(), 2);
    }

    #[test]
    fn test_adjacency_totals_match_edge_count() {
        let topo = MeshTopology::build(&quad_mesh());
        let total: usize = topo.vertex_adjacency.iter().map(|s| s.len()).sum();
        // Symmetrized adjacency counts each undirected edge twice.
        assert_eq!(total, 2 * topo.edges.len());
    }

    #[test]
    fn test_vertex_faces() {
        let topo = MeshTopology::build(&quad_mesh());
        assert_eq!(topo.vertex_faces[0], BTreeSet::from([0]));
        assert_eq!(topo.vertex_faces[1], BTreeSet::from([0, 1]));
        assert_eq!(topo.vertex_faces[2], BTreeSet::from([0, 1]));
        assert_eq!(topo.vertex_faces[3], BTreeSet::from([1]));
    }

    #[test]
    fn test_face_geometry() {
        let topo = MeshTopology::build(&quad_mesh());
        for fi in 0..2 {
            let n = topo.face_normals[fi];
            assert!((n.z.abs() - 1.0).abs() < 1e-12);
            assert!((topo.face_areas[fi] - 0.5).abs() < 1e-12);
            assert!((topo.face_centers[fi].z).abs() < 1e-12);
        }
    }

    #[test]
    fn test_degenerate_face_zero_normal() {
        let mut mesh = Mesh::new();
        mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(2.0, 0.0, 0.0));
        mesh.faces.push([0, 1, 2]); // collinear

        let topo = MeshTopology::build(&mesh);
        assert_eq!(topo.face_normals[0], Vector3::zeros());
        assert!(topo.face_areas[0] < 1e-12);
        assert!(topo.face_normals[0].iter().all(|c| c.is_finite()));
    }

    #[test]
    fn test_refresh_face_after_position_change() {
        let mut topo = MeshTopology::build(&quad_mesh());
        topo.positions[0] = Point3::new(0.0, 0.0, 2.0);
        topo.refresh_face(0);
        assert!(topo.face_normals[0].z.abs() < 1.0); // no longer +Z
        assert!((topo.face_centers[0].z - 2.0 / 3.0).abs() < 1e-12);
    }
}
