//! Rebuild a dense mesh from liveness-masked arrays.
//!
//! During decimation nothing is physically removed: dead vertices and faces
//! are only flagged. This module is the final pass that drops them and
//! remaps the surviving triangle indices onto the dense vertex range.

use nalgebra::Point3;

use crate::types::{Mesh, Vertex};

/// Compact masked vertex/face arrays into a dense mesh.
///
/// A pure function of its four inputs: live vertices keep their original
/// relative order, live faces keep theirs, and each surviving face's
/// indices are remapped through the prefix-sum old→new table. Every
/// surviving face must have three pairwise-distinct indices referencing
/// live vertices; the contraction engine guarantees this and it is
/// debug-asserted here.
///
/// With all-true masks this reproduces the input arrays unchanged.
pub fn compact_mesh(
    positions: &[Point3<f64>],
    vertex_alive: &[bool],
    faces: &[[u32; 3]],
    face_alive: &[bool],
) -> Mesh {
    debug_assert_eq!(positions.len(), vertex_alive.len());
    debug_assert_eq!(faces.len(), face_alive.len());

    // Prefix sum over the liveness mask: old index -> new dense index.
    let mut remap = vec![u32::MAX; positions.len()];
    let mut next = 0u32;
    for (old, &alive) in vertex_alive.iter().enumerate() {
        if alive {
            remap[old] = next;
            next += 1;
        }
    }

    let vertices: Vec<Vertex> = positions
        .iter()
        .zip(vertex_alive)
        .filter(|&(_, &alive)| alive)
        .map(|(&p, _)| Vertex::new(p))
        .collect();

    let mut new_faces = Vec::with_capacity(face_alive.iter().filter(|&&a| a).count());
    for (fi, face) in faces.iter().enumerate() {
        if !face_alive[fi] {
            continue;
        }

        let mapped = face.map(|v| remap[v as usize]);
        debug_assert!(
            mapped.iter().all(|&v| v != u32::MAX),
            "live face {} references a dead vertex: {:?}",
            fi,
            face
        );
        debug_assert!(
            mapped[0] != mapped[1] && mapped[1] != mapped[2] && mapped[0] != mapped[2],
            "live face {} has duplicate vertex indices: {:?}",
            fi,
            mapped
        );
        new_faces.push(mapped);
    }

    Mesh {
        vertices,
        faces: new_faces,
    }
}
