//! Default handler: resolve and print every fact.

use std::io::Write;

use hostfacts_core::FactRegistry;

use crate::error::CliError;
use crate::presentation::{OutputFormat, failure_summary, render_snapshot};

/// Print the full snapshot. Per-fact failures never fail the command.
pub async fn execute<W: Write>(
    registry: &FactRegistry,
    format: OutputFormat,
    verbose: bool,
    out: &mut W,
) -> Result<(), CliError> {
    let snapshot = registry.resolve_all().await;
    writeln!(out, "{}", render_snapshot(&snapshot, format)?)?;
    if verbose {
        if let Some(summary) = failure_summary(&snapshot) {
            eprintln!("{summary}");
        }
    }
    Ok(())
}
