//! Quadric error matrices.
//!
//! Each vertex carries a symmetric 4×4 error quadric: the sum of the
//! fundamental quadrics `p·pᵀ` of the planes of its incident faces, where
//! `p = (a, b, c, d)` is a face's homogeneous plane equation with unit
//! normal `(a, b, c)` and `d = -normal · centroid`. Evaluating `vᵀ·Q·v` at a
//! homogeneous point `v = (x, y, z, 1)` gives the sum of squared distances
//! to those planes, the error measure minimized by each edge collapse.

use std::collections::BTreeSet;
use std::ops::Add;

use nalgebra::{Point3, Vector3};

use crate::topology::MeshTopology;

/// A quadric error matrix (4x4 symmetric matrix stored as 10 values).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadric {
    /// Upper triangular elements:
    /// | a b c d |
    /// | b e f g |
    /// | c f h i |
    /// | d g i j |
    data: [f64; 10],
}

impl Quadric {
    /// Create a zero quadric.
    #[inline]
    pub fn zero() -> Self {
        Self { data: [0.0; 10] }
    }

    /// Create a quadric from a plane equation ax + by + cz + d = 0.
    /// The plane should be normalized (a² + b² + c² = 1); the zero plane
    /// (degenerate face convention) yields the zero quadric.
    pub fn from_plane(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self {
            data: [
                a * a,
                a * b,
                a * c,
                a * d,
                b * b,
                b * c,
                b * d,
                c * c,
                c * d,
                d * d,
            ],
        }
    }

    /// The fundamental quadric of a face given its unit normal and centroid.
    ///
    /// Degenerate faces carry a zero normal, which maps to the zero quadric
    /// so their contribution stays finite.
    pub fn fundamental(normal: &Vector3<f64>, center: &Point3<f64>) -> Self {
        let d = -normal.dot(&center.coords);
        Self::from_plane(normal.x, normal.y, normal.z, d)
    }

    /// Add another quadric to this one in place.
    pub fn add_assign(&mut self, other: &Quadric) {
        for i in 0..10 {
            self.data[i] += other.data[i];
        }
    }

    /// Evaluate the quadric error for a point.
    /// Returns vᵀ·Q·v where v = [x, y, z, 1].
    pub fn evaluate(&self, x: f64, y: f64, z: f64) -> f64 {
        self.data[0] * x * x
            + 2.0 * self.data[1] * x * y
            + 2.0 * self.data[2] * x * z
            + 2.0 * self.data[3] * x
            + self.data[4] * y * y
            + 2.0 * self.data[5] * y * z
            + 2.0 * self.data[6] * y
            + self.data[7] * z * z
            + 2.0 * self.data[8] * z
            + self.data[9]
    }

    /// Find the stationary point of the error form, or None if the system
    /// is singular (or close enough that the solve cannot be trusted).
    ///
    /// Solving `Q'·v = [0,0,0,1]ᵀ` — where `Q'` is this matrix's top three
    /// rows over the row `[0,0,0,1]` — reduces to the 3×3 linear system
    ///
    /// ```text
    /// [a b c] [x]   [-d]
    /// [b e f] [y] = [-g]
    /// [c f h] [z]   [-i]
    /// ```
    pub fn minimizer(&self) -> Option<Point3<f64>> {
        let [a, b, c, d, e, f, g, h, i, _j] = self.data;

        let det = a * (e * h - f * f) - b * (b * h - f * c) + c * (b * f - e * c);
        if det.abs() < 1e-10 {
            return None;
        }

        let inv_det = 1.0 / det;
        let m00 = (e * h - f * f) * inv_det;
        let m01 = (c * f - b * h) * inv_det;
        let m02 = (b * f - c * e) * inv_det;
        let m11 = (a * h - c * c) * inv_det;
        let m12 = (b * c - a * f) * inv_det;
        let m22 = (a * e - b * b) * inv_det;

        let x = m00 * (-d) + m01 * (-g) + m02 * (-i);
        let y = m01 * (-d) + m11 * (-g) + m12 * (-i);
        let z = m02 * (-d) + m12 * (-g) + m22 * (-i);

        Some(Point3::new(x, y, z))
    }
}

impl Default for Quadric {
    fn default() -> Self {
        Self::zero()
    }
}

impl Add for Quadric {
    type Output = Quadric;

    fn add(self, other: Quadric) -> Quadric {
        let mut result = self;
        result.add_assign(&other);
        result
    }
}

/// Compute the error quadric of a single vertex from its current incident
/// faces' cached normals and centroids.
///
/// This is the narrow entry point the contraction engine uses to refresh a
/// merged vertex: always a full recomputation over the incident set, never
/// an incremental update, so rounding does not accumulate across collapses.
pub fn vertex_quadric(
    incident_faces: &BTreeSet<u32>,
    face_normals: &[Vector3<f64>],
    face_centers: &[Point3<f64>],
) -> Quadric {
    let mut q = Quadric::zero();
    for &f in incident_faces {
        let fi = f as usize;
        q.add_assign(&Quadric::fundamental(&face_normals[fi], &face_centers[fi]));
    }
    q
}

/// Compute the initial error quadric for every vertex of a mesh.
pub fn vertex_quadrics(topo: &MeshTopology) -> Vec<Quadric> {
    topo.vertex_faces
        .iter()
        .map(|faces| vertex_quadric(faces, &topo.face_normals, &topo.face_centers))
        .collect()
}
