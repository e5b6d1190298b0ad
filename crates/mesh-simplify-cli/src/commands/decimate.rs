//! mesh-simplify decimate command - simplify a mesh to a vertex target.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use mesh_simplify::{DecimateParams, Mesh};
use serde::Serialize;

use crate::{Cli, OutputFormat, output};

#[derive(Serialize)]
struct DecimateReport {
    input: String,
    output: String,
    target_vertices: usize,
    original_vertices: usize,
    final_vertices: usize,
    original_faces: usize,
    final_faces: usize,
    collapses_performed: usize,
    collapses_rejected: usize,
    queue_exhausted: bool,
}

pub fn run(input: &Path, output_path: &Path, target: usize, cli: &Cli) -> Result<()> {
    let mesh =
        Mesh::load(input).with_context(|| format!("Failed to load mesh from {:?}", input))?;

    output::info(
        &format!(
            "Decimating mesh ({} vertices) to {} vertices...",
            mesh.vertex_count(),
            target
        ),
        cli.format,
        cli.quiet,
    );

    let params = DecimateParams::with_target_vertices(target);
    let result = mesh
        .decimate_with_params(&params)
        .with_context(|| format!("Failed to decimate mesh from {:?}", input))?;

    result
        .mesh
        .save(output_path)
        .with_context(|| format!("Failed to save decimated mesh to {:?}", output_path))?;

    let report = DecimateReport {
        input: input.display().to_string(),
        output: output_path.display().to_string(),
        target_vertices: target,
        original_vertices: result.original_vertices,
        final_vertices: result.final_vertices,
        original_faces: result.original_faces,
        final_faces: result.final_faces,
        collapses_performed: result.collapses_performed,
        collapses_rejected: result.collapses_rejected,
        queue_exhausted: result.queue_exhausted,
    };

    match cli.format {
        OutputFormat::Json => {
            output::print(&report, cli.format, cli.quiet);
        }
        OutputFormat::Text => {
            if !cli.quiet {
                output::success(
                    &format!("Decimated mesh saved to {}", output_path.display()),
                    cli.format,
                    cli.quiet,
                );
                println!(
                    "  {}: {} → {} vertices (target {})",
                    "Vertices".cyan(),
                    report.original_vertices,
                    report.final_vertices,
                    report.target_vertices
                );
                println!(
                    "  {}: {} → {} faces",
                    "Faces".cyan(),
                    report.original_faces,
                    report.final_faces
                );
                println!(
                    "  {}: {} performed, {} rejected",
                    "Collapses".cyan(),
                    report.collapses_performed,
                    report.collapses_rejected
                );
                if report.queue_exhausted {
                    println!(
                        "  {}: ran out of collapsible edges before reaching the target",
                        "Note".yellow()
                    );
                }
            }
        }
    }

    Ok(())
}
