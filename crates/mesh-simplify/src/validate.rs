//! Input mesh validation.
//!
//! The contraction engine assumes well-formed input; the loading layer runs
//! these checks first so malformed files never reach the core.

use crate::error::{MeshError, MeshResult};
use crate::types::Mesh;

/// Check that every face references an existing vertex and every coordinate
/// is finite.
///
/// Returns the first problem found as an error.
pub fn validate_mesh_data(mesh: &Mesh) -> MeshResult<()> {
    for (vi, vertex) in mesh.vertices.iter().enumerate() {
        let p = &vertex.position;
        for (value, name) in [(p.x, "x"), (p.y, "y"), (p.z, "z")] {
            if !value.is_finite() {
                return Err(MeshError::invalid_coordinate(vi, name, value));
            }
        }
    }

    let vertex_count = mesh.vertex_count();
    for (fi, face) in mesh.faces.iter().enumerate() {
        for &v in face {
            if v as usize >= vertex_count {
                return Err(MeshError::invalid_vertex_index(fi, v, vertex_count));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Vertex;

    fn triangle_mesh() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
        mesh.faces.push([0, 1, 2]);
        mesh
    }

    #[test]
    fn test_valid_mesh_passes() {
        assert!(validate_mesh_data(&triangle_mesh()).is_ok());
    }

    #[test]
    fn test_out_of_range_index_is_rejected() {
        let mut mesh = triangle_mesh();
        mesh.faces.push([0, 1, 7]);

        let err = validate_mesh_data(&mesh).unwrap_err();
        assert!(matches!(
            err,
            MeshError::InvalidVertexIndex {
                face_index: 1,
                vertex_index: 7,
                vertex_count: 3,
            }
        ));
    }

    #[test]
    fn test_nan_coordinate_is_rejected() {
        let mut mesh = triangle_mesh();
        mesh.vertices[1].position.y = f64::NAN;

        let err = validate_mesh_data(&mesh).unwrap_err();
        assert!(matches!(
            err,
            MeshError::InvalidCoordinate {
                vertex_index: 1,
                coordinate: "y",
                ..
            }
        ));
    }

    #[test]
    fn test_infinite_coordinate_is_rejected() {
        let mut mesh = triangle_mesh();
        mesh.vertices[2].position.z = f64::INFINITY;
        assert!(validate_mesh_data(&mesh).is_err());
    }
}
