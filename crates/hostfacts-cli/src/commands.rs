//! Subcommand definitions.

use clap::Subcommand;

/// What to report. With no subcommand every fact is resolved.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print every fact name, one per line
    List,

    /// Resolve a single fact
    Get {
        /// Fact name, as printed by `list`
        name: String,
    },
}
