//! mesh-simplify: Command-line interface for quadric edge-collapse mesh
//! simplification.
//!
//! # Logging
//!
//! Set the `RUST_LOG` environment variable to control log output:
//! - `RUST_LOG=mesh_simplify=info` - Basic operation logging
//! - `RUST_LOG=mesh_simplify=debug` - Detailed progress logging
//! - `RUST_LOG=mesh_simplify::timing=debug` - Performance timing
//! - `RUST_LOG=debug` - All debug output
//!
//! # Example
//!
//! ```bash
//! # Simplify a scan down to 5000 vertices with info logging
//! RUST_LOG=mesh_simplify=info mesh-simplify decimate scan.off -o small.off --target 5000
//!
//! # Inspect a mesh
//! mesh-simplify info scan.off --detailed
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod commands;
mod output;

use commands::{convert, decimate, info};

/// mesh-simplify - reduce triangle meshes with quadric error metrics.
///
/// Load a mesh, collapse its cheapest edges until a target vertex count is
/// reached, and save the result.
#[derive(Parser)]
#[command(name = "mesh-simplify")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format for results
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Suppress all non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Increase output verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for scripting
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Display mesh statistics and information
    Info {
        /// Input mesh file
        input: PathBuf,

        /// Show surface area and bounding box detail
        #[arg(long)]
        detailed: bool,
    },

    /// Simplify a mesh to a target vertex count
    Decimate {
        /// Input mesh file
        input: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Target number of vertices
        #[arg(long, short)]
        target: usize,
    },

    /// Convert mesh between formats
    Convert {
        /// Input mesh file
        input: PathBuf,

        /// Output file path (format determined by extension)
        #[arg(short, long)]
        output: PathBuf,
    },
}

/// Initialize the tracing subscriber based on verbosity level.
fn init_tracing(verbose: u8, quiet: bool) {
    // If quiet, don't initialize any tracing
    if quiet {
        return;
    }

    // Check RUST_LOG first, then fall back to -v flags
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "warn",
            1 => "mesh_simplify=info",
            2 => "mesh_simplify=debug",
            _ => "trace",
        };
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    // Install miette's panic hook for better error display in development
    #[cfg(debug_assertions)]
    miette::set_panic_hook();

    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Info { input, detailed } => info::run(input, *detailed, &cli),
        Commands::Decimate {
            input,
            output,
            target,
        } => decimate::run(input, output, *target, &cli),
        Commands::Convert { input, output } => convert::run(input, output, &cli),
    };

    if let Err(e) = &result {
        if !cli.quiet {
            eprintln!("{}: {}", "Error".red().bold(), e);
            for cause in e.chain().skip(1) {
                eprintln!("  {}: {}", "Caused by".yellow(), cause);
            }
        }
        std::process::exit(1);
    }

    Ok(())
}
