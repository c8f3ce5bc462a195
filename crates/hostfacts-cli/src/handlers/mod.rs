//! Command handlers.
//!
//! Each handler takes the registry and a writer for stdout so it can run
//! against fakes in tests. Diagnostics go to stderr through `tracing`.

pub mod get;
pub mod list;
pub mod snapshot;

use std::io::Write;

use crate::bootstrap::CliContext;
use crate::commands::Commands;
use crate::error::CliError;

/// Route a parsed command to its handler.
pub async fn dispatch<W: Write>(
    ctx: &CliContext,
    command: Option<&Commands>,
    out: &mut W,
) -> Result<(), CliError> {
    match command {
        Some(Commands::List) => list::execute(&ctx.registry, ctx.format, out),
        Some(Commands::Get { name }) => get::execute(&ctx.registry, name, ctx.format, out).await,
        None => snapshot::execute(&ctx.registry, ctx.format, ctx.verbose, out).await,
    }
}
