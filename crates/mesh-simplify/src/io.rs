//! Mesh file I/O for OFF and OBJ formats.
//!
//! OFF (Object File Format) is the primary exchange format: a text header,
//! a counts line, then vertex and face lines. The reader accepts the common
//! variants found in the wild — a missing `OFF` tag, the tag and counts
//! merged onto one line, extra per-vertex columns, quad faces (split into
//! two triangles), and trailing per-face color values. The writer always
//! emits the canonical triangles-only form.
//!
//! Loaded meshes are validated before they are handed to any algorithm:
//! out-of-range face indices and non-finite coordinates are rejected here,
//! so the simplifier can assume well-formed input.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::error::{MeshError, MeshResult};
use crate::types::{Mesh, Vertex};
use crate::validate::validate_mesh_data;

/// Supported mesh file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshFormat {
    Off,
    Obj,
}

impl MeshFormat {
    /// Detect format from file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .and_then(|ext| match ext.as_str() {
                "off" => Some(MeshFormat::Off),
                "obj" => Some(MeshFormat::Obj),
                _ => None,
            })
    }
}

/// Load a mesh from file, auto-detecting format from extension.
pub fn load_mesh(path: &Path) -> MeshResult<Mesh> {
    let format = MeshFormat::from_path(path).ok_or_else(|| MeshError::UnsupportedFormat {
        extension: path.extension().and_then(|e| e.to_str()).map(String::from),
    })?;

    info!("Loading mesh from {:?} (format: {:?})", path, format);

    let mesh = match format {
        MeshFormat::Off => load_off(path)?,
        MeshFormat::Obj => load_obj(path)?,
    };

    if mesh.vertices.is_empty() || mesh.faces.is_empty() {
        return Err(MeshError::EmptyMesh {
            details: "mesh has no vertices or faces".to_string(),
        });
    }

    validate_mesh_data(&mesh)?;

    info!(
        "Loaded mesh: {} vertices, {} faces",
        mesh.vertex_count(),
        mesh.face_count()
    );

    Ok(mesh)
}

/// Save mesh to file, auto-detecting format from extension.
pub fn save_mesh(mesh: &Mesh, path: &Path) -> MeshResult<()> {
    let format = MeshFormat::from_path(path).ok_or_else(|| MeshError::UnsupportedFormat {
        extension: path.extension().and_then(|e| e.to_str()).map(String::from),
    })?;

    match format {
        MeshFormat::Off => save_off(mesh, path),
        MeshFormat::Obj => save_obj(mesh, path),
    }
}

/// Load mesh from an OFF file.
///
/// Accepted layout:
/// - an optional first line carrying the literal `OFF` tag, possibly with
///   the counts appended on the same line;
/// - a counts line `nv nf [ne]` (the edge count is ignored);
/// - `nv` vertex lines of at least three floating-point values (extra
///   columns ignored);
/// - `nf` face lines of a leading vertex count followed by that many
///   indices; 3 is kept as-is, 4 is split into the triangles `(0,1,2)` and
///   `(1,2,3)`, and trailing color values are ignored.
pub fn load_off(path: &Path) -> MeshResult<Mesh> {
    let content = std::fs::read_to_string(path).map_err(|e| MeshError::io_read(path, e))?;
    let mut lines = content.lines();

    let first_line = lines
        .next()
        .ok_or_else(|| MeshError::parse_error(path, "file is empty"))?
        .trim();

    // The tag line is optional, and some exporters merge the tag and the
    // counts onto a single line.
    let counts_line = if let Some(rest) = first_line.strip_prefix("OFF") {
        if rest.trim().is_empty() {
            lines
                .next()
                .ok_or_else(|| MeshError::parse_error(path, "missing counts line after OFF tag"))?
                .trim()
                .to_string()
        } else {
            rest.trim().to_string()
        }
    } else {
        first_line.to_string()
    };

    let counts: Vec<usize> = counts_line
        .split_whitespace()
        .map(str::parse)
        .collect::<Result<_, _>>()
        .map_err(|_| {
            MeshError::parse_error(path, format!("invalid counts line: {:?}", counts_line))
        })?;
    if counts.len() < 2 {
        return Err(MeshError::parse_error(
            path,
            format!("counts line needs vertex and face counts: {:?}", counts_line),
        ));
    }
    let (n_vertices, n_faces) = (counts[0], counts[1]);

    let mut mesh = Mesh::with_capacity(n_vertices, n_faces);

    for i in 0..n_vertices {
        let line = lines.next().ok_or_else(|| {
            MeshError::parse_error(path, format!("unexpected end of file in vertex {}", i))
        })?;
        let values: Vec<f64> = line
            .split_whitespace()
            .take(3)
            .map(str::parse)
            .collect::<Result<_, _>>()
            .map_err(|_| {
                MeshError::parse_error(path, format!("invalid vertex line {}: {:?}", i, line))
            })?;
        if values.len() < 3 {
            return Err(MeshError::parse_error(
                path,
                format!("vertex {} has {} coordinates, expected 3", i, values.len()),
            ));
        }
        mesh.vertices
            .push(Vertex::from_coords(values[0], values[1], values[2]));
    }

    for i in 0..n_faces {
        let line = lines.next().ok_or_else(|| {
            MeshError::parse_error(path, format!("unexpected end of file in face {}", i))
        })?;
        let mut tokens = line.split_whitespace();
        let n: usize = tokens
            .next()
            .ok_or_else(|| MeshError::parse_error(path, format!("face {} is blank", i)))?
            .parse()
            .map_err(|_| {
                MeshError::parse_error(path, format!("invalid face line {}: {:?}", i, line))
            })?;

        // Trailing tokens past the index list are per-face colors; ignored.
        let indices: Vec<u32> = tokens
            .take(n)
            .map(str::parse)
            .collect::<Result<_, _>>()
            .map_err(|_| {
                MeshError::parse_error(path, format!("invalid face line {}: {:?}", i, line))
            })?;
        if indices.len() < n {
            return Err(MeshError::parse_error(
                path,
                format!("face {} declares {} vertices but lists {}", i, n, indices.len()),
            ));
        }

        match n {
            3 => mesh.faces.push([indices[0], indices[1], indices[2]]),
            4 => {
                // Fixed split pattern for quads.
                mesh.faces.push([indices[0], indices[1], indices[2]]);
                mesh.faces.push([indices[1], indices[2], indices[3]]);
            }
            _ => {
                return Err(MeshError::parse_error(
                    path,
                    format!(
                        "face {} has {} vertices; only triangles and quads are supported",
                        i, n
                    ),
                ));
            }
        }
    }

    debug!(
        "OFF loaded: {} vertices, {} faces",
        mesh.vertices.len(),
        mesh.faces.len()
    );

    Ok(mesh)
}

/// Save mesh to an OFF file.
pub fn save_off(mesh: &Mesh, path: &Path) -> MeshResult<()> {
    info!("Saving mesh to {:?} (OFF format)", path);

    let file = File::create(path).map_err(|e| MeshError::io_write(path, e))?;
    let mut writer = BufWriter::new(file);
    write_off(mesh, &mut writer).map_err(|e| MeshError::io_write(path, e))?;
    writer.flush().map_err(|e| MeshError::io_write(path, e))?;

    info!(
        "Saved {} vertices and {} faces to {:?}",
        mesh.vertex_count(),
        mesh.face_count(),
        path
    );

    Ok(())
}

fn write_off(mesh: &Mesh, w: &mut impl Write) -> std::io::Result<()> {
    writeln!(w, "OFF")?;
    writeln!(w, "{} {} 0", mesh.vertex_count(), mesh.face_count())?;

    // f64 Display prints the shortest representation that round-trips
    // exactly, so a write/read cycle reproduces positions bit-for-bit.
    for v in &mesh.vertices {
        writeln!(w, "{} {} {}", v.position.x, v.position.y, v.position.z)?;
    }

    for face in &mesh.faces {
        writeln!(w, "3 {} {} {}", face[0], face[1], face[2])?;
    }

    Ok(())
}

/// Load mesh from an OBJ file.
fn load_obj(path: &Path) -> MeshResult<Mesh> {
    let (models, _materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
    )
    .map_err(|e| MeshError::ParseError {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;

    if models.is_empty() {
        return Err(MeshError::EmptyMesh {
            details: "OBJ file contains no models".to_string(),
        });
    }

    // Merge all models into a single mesh.
    let mut mesh = Mesh::new();
    let mut vertex_offset = 0u32;

    for model in &models {
        debug!("OBJ model '{}': loading", model.name);

        let obj_mesh = &model.mesh;

        for chunk in obj_mesh.positions.chunks(3) {
            if chunk.len() == 3 {
                mesh.vertices.push(Vertex::from_coords(
                    chunk[0] as f64,
                    chunk[1] as f64,
                    chunk[2] as f64,
                ));
            }
        }

        for chunk in obj_mesh.indices.chunks(3) {
            if chunk.len() == 3 {
                mesh.faces.push([
                    chunk[0] + vertex_offset,
                    chunk[1] + vertex_offset,
                    chunk[2] + vertex_offset,
                ]);
            }
        }

        vertex_offset = mesh.vertices.len() as u32;
    }

    debug!(
        "OBJ loaded: {} vertices, {} faces from {} models",
        mesh.vertices.len(),
        mesh.faces.len(),
        models.len()
    );

    Ok(mesh)
}

/// Save mesh to an OBJ file (ASCII, indexed).
pub fn save_obj(mesh: &Mesh, path: &Path) -> MeshResult<()> {
    info!("Saving mesh to {:?} (OBJ format)", path);

    let file = File::create(path).map_err(|e| MeshError::io_write(path, e))?;
    let mut writer = BufWriter::new(file);
    write_obj(mesh, &mut writer).map_err(|e| MeshError::io_write(path, e))?;
    writer.flush().map_err(|e| MeshError::io_write(path, e))?;

    Ok(())
}

fn write_obj(mesh: &Mesh, w: &mut impl Write) -> std::io::Result<()> {
    writeln!(w, "# OBJ file exported by mesh-simplify")?;
    writeln!(w, "# Vertices: {}", mesh.vertex_count())?;
    writeln!(w, "# Faces: {}", mesh.face_count())?;
    writeln!(w)?;

    for v in &mesh.vertices {
        writeln!(
            w,
            "v {:.6} {:.6} {:.6}",
            v.position.x, v.position.y, v.position.z
        )?;
    }

    writeln!(w)?;
    for face in &mesh.faces {
        // OBJ uses 1-based indexing.
        writeln!(w, "f {} {} {}", face[0] + 1, face[1] + 1, face[2] + 1)?;
    }

    Ok(())
}
