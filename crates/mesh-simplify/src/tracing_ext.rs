//! Tracing extensions for mesh operations.
//!
//! Structured logging helpers built on the `tracing` ecosystem. Enable them
//! by installing a subscriber in the application:
//!
//! ```rust,ignore
//! use tracing_subscriber::{fmt, prelude::*, EnvFilter};
//!
//! tracing_subscriber::registry()
//!     .with(fmt::layer())
//!     .with(EnvFilter::from_default_env())
//!     .init();
//!
//! // Set RUST_LOG=mesh_simplify=debug for detailed output.
//! ```
//!
//! Log levels used by the library:
//! - **WARN**: recoverable but notable conditions (queue exhaustion)
//! - **INFO**: operation summaries and timing
//! - **DEBUG**: degenerate-solve fallbacks, per-file I/O detail
//! - **TRACE**: per-candidate rejection detail

use std::time::Instant;
use tracing::{Span, debug, info};

/// A performance timer that logs duration on drop.
///
/// ```rust,ignore
/// fn expensive_operation() {
///     let _timer = OperationTimer::new("decimate");
///     // ... work ...
/// } // duration logged here
/// ```
pub struct OperationTimer {
    name: &'static str,
    start: Instant,
    span: Span,
}

impl OperationTimer {
    /// Create a new operation timer.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!("mesh_operation", operation = name);
        debug!(target: "mesh_simplify::timing", operation = name, "Starting operation");
        Self {
            name,
            start: Instant::now(),
            span,
        }
    }

    /// Create a timer with mesh dimensions as context fields.
    pub fn with_context(name: &'static str, vertex_count: usize, face_count: usize) -> Self {
        let span = tracing::info_span!(
            "mesh_operation",
            operation = name,
            vertices = vertex_count,
            faces = face_count
        );
        debug!(
            target: "mesh_simplify::timing",
            operation = name,
            vertices = vertex_count,
            faces = face_count,
            "Starting operation"
        );
        Self {
            name,
            start: Instant::now(),
            span,
        }
    }

    /// Get the elapsed time.
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    /// Get the span for this timer.
    pub fn span(&self) -> &Span {
        &self.span
    }
}

impl Drop for OperationTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed_ms();
        info!(
            target: "mesh_simplify::timing",
            operation = self.name,
            elapsed_ms = format!("{:.2}", elapsed_ms),
            "Operation completed"
        );
    }
}

/// Log mesh statistics at debug level.
pub fn log_mesh_stats(mesh: &crate::Mesh, context: &str) {
    let dims = mesh
        .bounds()
        .map(|(min, max)| max - min)
        .unwrap_or_default();

    debug!(
        target: "mesh_simplify::mesh_state",
        context = context,
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        dimensions = format!("{:.2} x {:.2} x {:.2}", dims.x, dims.y, dims.z),
        "Mesh state"
    );
}

/// Log the outcome of a decimation run.
pub fn log_decimate_result(result: &crate::DecimateResult, elapsed_ms: f64) {
    info!(
        target: "mesh_simplify::decimate",
        original_vertices = result.original_vertices,
        final_vertices = result.final_vertices,
        collapses_performed = result.collapses_performed,
        collapses_rejected = result.collapses_rejected,
        queue_exhausted = result.queue_exhausted,
        elapsed_ms = format!("{:.2}", elapsed_ms),
        "Decimation completed"
    );
}
