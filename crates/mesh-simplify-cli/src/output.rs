//! Shared output helpers for text and JSON result printing.

use colored::Colorize;
use serde::Serialize;

use crate::OutputFormat;

/// Print a serializable result value in the selected format.
///
/// Text mode is handled by each command directly; this only renders JSON.
pub fn print<T: Serialize>(value: &T, format: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    if let OutputFormat::Json = format {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("{}: failed to serialize output: {}", "Error".red().bold(), e),
        }
    }
}

/// Print an informational progress line (text mode only).
pub fn info(message: &str, format: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    if let OutputFormat::Text = format {
        println!("{} {}", "·".dimmed(), message);
    }
}

/// Print a success line (text mode only).
pub fn success(message: &str, format: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    if let OutputFormat::Text = format {
        println!("{} {}", "✓".green().bold(), message);
    }
}
