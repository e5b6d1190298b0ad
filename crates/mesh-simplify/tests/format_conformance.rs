//! Format conformance tests for mesh I/O.
//!
//! These verify that the OFF reader accepts the header and payload variants
//! found in real exports, that the writer emits the canonical form, and
//! that malformed files are rejected before they reach the simplifier.

use mesh_simplify::{Mesh, MeshError, Vertex, load_mesh, save_mesh};
use std::io::Write;
use tempfile::NamedTempFile;

fn off_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(".off").unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

// =============================================================================
// OFF Format Conformance Tests
// =============================================================================

mod off_conformance {
    use super::*;

    /// The canonical layout: tag line, counts line, vertices, faces.
    #[test]
    fn test_canonical_layout() {
        let file = off_file(
            "OFF\n\
             4 2 5\n\
             0 0 0\n\
             1 0 0\n\
             0 1 0\n\
             1 1 0\n\
             3 0 1 2\n\
             3 1 3 2\n",
        );

        let mesh = load_mesh(file.path()).expect("canonical OFF should load");
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.faces, vec![[0, 1, 2], [1, 3, 2]]);
    }

    /// The `OFF` tag line is optional.
    #[test]
    fn test_missing_tag_line() {
        let file = off_file("3 1 0\n0 0 0\n1 0 0\n0 1 0\n3 0 1 2\n");
        let mesh = load_mesh(file.path()).expect("tagless OFF should load");
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face_count(), 1);
    }

    /// Some exporters put the tag and the counts on the same line.
    #[test]
    fn test_tag_and_counts_merged() {
        let file = off_file("OFF 3 1 0\n0 0 0\n1 0 0\n0 1 0\n3 0 1 2\n");
        let mesh = load_mesh(file.path()).expect("merged header should load");
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face_count(), 1);
    }

    /// The trailing edge count in the counts line may be absent.
    #[test]
    fn test_counts_without_edge_count() {
        let file = off_file("OFF\n3 1\n0 0 0\n1 0 0\n0 1 0\n3 0 1 2\n");
        let mesh = load_mesh(file.path()).expect("two-value counts line should load");
        assert_eq!(mesh.face_count(), 1);
    }

    /// Quads are split into two triangles with the fixed (0,1,2)/(1,2,3)
    /// pattern.
    #[test]
    fn test_quad_split_pattern() {
        let file = off_file(
            "OFF\n4 1 0\n0 0 0\n1 0 0\n1 1 0\n0 1 0\n4 0 1 2 3\n",
        );
        let mesh = load_mesh(file.path()).expect("quad OFF should load");
        assert_eq!(mesh.faces, vec![[0, 1, 2], [1, 2, 3]]);
    }

    /// Per-vertex extra columns and per-face trailing colors are ignored.
    #[test]
    fn test_color_data_is_ignored() {
        let file = off_file(
            "OFF\n\
             3 1 0\n\
             0 0 0 1.0 0.0 0.0 0.5\n\
             1 0 0 0.0 1.0 0.0 0.5\n\
             0 1 0 0.0 0.0 1.0 0.5\n\
             3 0 1 2 255 0 0\n",
        );
        let mesh = load_mesh(file.path()).expect("colored OFF should load");
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.faces, vec![[0, 1, 2]]);
        assert_eq!(mesh.vertices[1].position.x, 1.0);
    }

    /// Negative and high-precision coordinates survive loading.
    #[test]
    fn test_coordinate_precision() {
        let file = off_file(
            "OFF\n3 1 0\n-10.25 0.000125 -3e-7\n1 0 0\n0 1 0\n3 0 1 2\n",
        );
        let mesh = load_mesh(file.path()).unwrap();
        assert_eq!(mesh.vertices[0].position.x, -10.25);
        assert_eq!(mesh.vertices[0].position.y, 0.000125);
        assert_eq!(mesh.vertices[0].position.z, -3e-7);
    }

    /// Polygons beyond quads are rejected, not silently dropped.
    #[test]
    fn test_pentagon_rejected() {
        let file = off_file(
            "OFF\n5 1 0\n0 0 0\n1 0 0\n1 1 0\n0 1 0\n0.5 1.5 0\n5 0 1 2 3 4\n",
        );
        assert!(matches!(
            load_mesh(file.path()),
            Err(MeshError::ParseError { .. })
        ));
    }

    /// Vertex lines with fewer than three coordinates are rejected.
    #[test]
    fn test_short_vertex_line_rejected() {
        let file = off_file("OFF\n3 1 0\n0 0\n1 0 0\n0 1 0\n3 0 1 2\n");
        assert!(matches!(
            load_mesh(file.path()),
            Err(MeshError::ParseError { .. })
        ));
    }

    /// A counts line that is not numeric is rejected.
    #[test]
    fn test_garbage_counts_rejected() {
        let file = off_file("OFF\nthree one zero\n");
        assert!(matches!(
            load_mesh(file.path()),
            Err(MeshError::ParseError { .. })
        ));
    }

    /// Truncated files are rejected.
    #[test]
    fn test_truncated_face_list_rejected() {
        let file = off_file("OFF\n3 2 0\n0 0 0\n1 0 0\n0 1 0\n3 0 1 2\n");
        assert!(matches!(
            load_mesh(file.path()),
            Err(MeshError::ParseError { .. })
        ));
    }

    /// Faces referencing missing vertices are rejected at load time.
    #[test]
    fn test_dangling_index_rejected() {
        let file = off_file("OFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n3 0 1 12\n");
        assert!(matches!(
            load_mesh(file.path()),
            Err(MeshError::InvalidVertexIndex { .. })
        ));
    }

    /// A header-only file is an empty mesh, not a panic.
    #[test]
    fn test_empty_mesh_rejected() {
        let file = off_file("OFF\n0 0 0\n");
        assert!(matches!(
            load_mesh(file.path()),
            Err(MeshError::EmptyMesh { .. })
        ));
    }

    /// The writer emits the canonical header with a literal 0 edge count.
    #[test]
    fn test_writer_canonical_header() {
        let mut mesh = Mesh::new();
        mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
        mesh.faces.push([0, 1, 2]);

        let file = NamedTempFile::with_suffix(".off").unwrap();
        save_mesh(&mesh, file.path()).unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "OFF");
        assert_eq!(lines[1], "3 1 0");
        assert_eq!(lines[5], "3 0 1 2");
    }

    /// Write → read reproduces positions and connectivity exactly.
    #[test]
    fn test_round_trip_exact() {
        let mut mesh = Mesh::new();
        mesh.vertices.push(Vertex::from_coords(0.1, -2.75, 1e-9));
        mesh.vertices.push(Vertex::from_coords(1.0 / 3.0, 2.0 / 7.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(0.0, 1.0, -0.5));
        mesh.vertices.push(Vertex::from_coords(123456.789, 0.0, 0.25));
        mesh.faces.push([0, 1, 2]);
        mesh.faces.push([1, 3, 2]);

        let file = NamedTempFile::with_suffix(".off").unwrap();
        save_mesh(&mesh, file.path()).unwrap();
        let reloaded = load_mesh(file.path()).unwrap();

        assert_eq!(reloaded.faces, mesh.faces);
        for (a, b) in reloaded.vertices.iter().zip(&mesh.vertices) {
            assert_eq!(a.position, b.position);
        }
    }
}

// =============================================================================
// OBJ Format Conformance Tests
// =============================================================================

mod obj_conformance {
    use super::*;

    /// OBJ files preserve vertex order exactly.
    #[test]
    fn test_obj_preserves_vertex_order() {
        let mut file = NamedTempFile::with_suffix(".obj").unwrap();
        writeln!(file, "v 0 0 0").unwrap();
        writeln!(file, "v 1 0 0").unwrap();
        writeln!(file, "v 0 1 0").unwrap();
        writeln!(file, "f 1 2 3").unwrap();

        let mesh = load_mesh(file.path()).expect("OBJ should load");
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.faces, vec![[0, 1, 2]]);
        assert_eq!(mesh.vertices[1].position.x, 1.0);
    }

    /// OFF → OBJ → OFF conversion keeps connectivity.
    #[test]
    fn test_cross_format_conversion() {
        let file = off_file("OFF\n4 2 0\n0 0 0\n1 0 0\n0 1 0\n1 1 0\n3 0 1 2\n3 1 3 2\n");
        let mesh = load_mesh(file.path()).unwrap();

        let obj = NamedTempFile::with_suffix(".obj").unwrap();
        save_mesh(&mesh, obj.path()).unwrap();
        let from_obj = load_mesh(obj.path()).unwrap();

        let off2 = NamedTempFile::with_suffix(".off").unwrap();
        save_mesh(&from_obj, off2.path()).unwrap();
        let final_mesh = load_mesh(off2.path()).unwrap();

        assert_eq!(final_mesh.vertex_count(), 4);
        assert_eq!(final_mesh.faces, mesh.faces);
    }
}
