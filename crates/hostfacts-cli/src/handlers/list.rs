//! List command handler.

use std::io::Write;

use hostfacts_core::FactRegistry;

use crate::error::CliError;
use crate::presentation::{OutputFormat, render_names};

/// Print every registered fact name. No resolver runs.
pub fn execute<W: Write>(
    registry: &FactRegistry,
    format: OutputFormat,
    out: &mut W,
) -> Result<(), CliError> {
    let names = registry.list_names();
    writeln!(out, "{}", render_names(&names, format)?)?;
    Ok(())
}
