//! Command-line shell for `hostfacts`.
//!
//! `hostfacts` prints every fact as `name => value`, `hostfacts list`
//! prints the catalog and `hostfacts get <name>` resolves one fact.
//! `--json` switches any of them to JSON.
#![deny(unused_crate_dependencies)]

// Used by the binary only
use anyhow as _;
use tokio as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod parser;
pub mod presentation;

pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::Commands;
pub use error::CliError;
pub use handlers::dispatch;
pub use logging::init_logging;
pub use parser::Cli;
pub use presentation::OutputFormat;
