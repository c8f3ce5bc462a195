//! Get command handler.

use std::io::Write;

use hostfacts_core::FactRegistry;

use crate::error::CliError;
use crate::presentation::{OutputFormat, render_value};

/// Resolve one fact and print its value.
///
/// Unknown names and resolver failures are returned as errors, so the
/// process exits non-zero with nothing on stdout.
pub async fn execute<W: Write>(
    registry: &FactRegistry,
    name: &str,
    format: OutputFormat,
    out: &mut W,
) -> Result<(), CliError> {
    let value = registry.resolve(name).await?;
    writeln!(out, "{}", render_value(&value, format)?)?;
    Ok(())
}
