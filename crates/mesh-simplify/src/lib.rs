//! Triangle mesh simplification via quadric error metric edge collapse.
//!
//! This crate reduces the triangle count of a manifold-ish mesh while
//! minimizing geometric distortion, using the Garland–Heckbert quadric
//! error metric: every vertex accumulates a 4×4 error quadric from the
//! planes of its incident faces, candidate edges are ranked by the error of
//! their optimal merged position, and the cheapest valid edge is contracted
//! until a target vertex count is reached.
//!
//! Contractions that would create non-manifold topology or collapse a
//! boundary edge are skipped, so the simplifier can run out of candidates
//! before reaching the target; the result reports this instead of failing.
//!
//! # Quick Start
//!
//! ```no_run
//! use mesh_simplify::Mesh;
//!
//! // Load a mesh (OFF or OBJ, detected from the extension)
//! let mesh = Mesh::load("bunny.off").unwrap();
//!
//! // Simplify to 2000 vertices
//! let result = mesh.decimate_to_count(2000).unwrap();
//! println!(
//!     "{} -> {} vertices ({} collapses)",
//!     result.original_vertices, result.final_vertices, result.collapses_performed
//! );
//!
//! // Save the simplified mesh
//! result.mesh.save("bunny_simplified.off").unwrap();
//! ```
//!
//! # Building Meshes Programmatically
//!
//! ```
//! use mesh_simplify::{decimate_mesh, DecimateParams, Mesh, Vertex};
//!
//! let mut mesh = Mesh::new();
//! mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(0.5, 1.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(0.5, 0.5, 1.0));
//! mesh.faces.push([0, 2, 1]);
//! mesh.faces.push([0, 1, 3]);
//! mesh.faces.push([1, 2, 3]);
//! mesh.faces.push([2, 0, 3]);
//!
//! let result = decimate_mesh(&mesh, &DecimateParams::with_target_vertices(4)).unwrap();
//! assert_eq!(result.final_vertices, 4);
//! ```
//!
//! # Error Handling
//!
//! Fallible operations return [`MeshResult<T>`]. Algorithmic conditions —
//! singular quadric solves, rejected collapses, queue exhaustion — are not
//! errors; only file I/O problems and malformed input are.

mod error;
mod types;

pub mod compact;
pub mod decimate;
pub mod io;
pub mod quadric;
pub mod topology;
pub mod tracing_ext;
pub mod validate;

pub use compact::compact_mesh;
pub use decimate::{DecimateParams, DecimateResult, decimate_mesh};
pub use error::{MeshError, MeshResult};
pub use io::{MeshFormat, load_mesh, save_mesh};
pub use quadric::Quadric;
pub use topology::MeshTopology;
pub use types::{Mesh, Triangle, Vertex};

// Re-export nalgebra types for convenience
pub use nalgebra;

// Convenience methods on Mesh
impl Mesh {
    /// Load a mesh from a file, auto-detecting format from extension.
    pub fn load(path: impl AsRef<std::path::Path>) -> MeshResult<Self> {
        io::load_mesh(path.as_ref())
    }

    /// Save the mesh to a file, auto-detecting format from extension.
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> MeshResult<()> {
        io::save_mesh(self, path.as_ref())
    }

    /// Simplify the mesh to a target vertex count.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_simplify::{Mesh, Vertex};
    ///
    /// let mut mesh = Mesh::new();
    /// mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
    /// mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
    /// mesh.vertices.push(Vertex::from_coords(0.5, 1.0, 0.0));
    /// mesh.faces.push([0, 1, 2]);
    ///
    /// // A lone triangle has no collapsible interior edge.
    /// let result = mesh.decimate_to_count(2).unwrap();
    /// assert!(result.queue_exhausted);
    /// assert_eq!(result.final_vertices, 3);
    /// ```
    pub fn decimate_to_count(&self, target: usize) -> MeshResult<decimate::DecimateResult> {
        decimate::decimate_mesh(self, &decimate::DecimateParams::with_target_vertices(target))
    }

    /// Simplify the mesh with explicit parameters.
    pub fn decimate_with_params(
        &self,
        params: &decimate::DecimateParams,
    ) -> MeshResult<decimate::DecimateResult> {
        decimate::decimate_mesh(self, params)
    }
}
