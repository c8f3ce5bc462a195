//! Root CLI structure with global options.

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for the host fact reporter.
#[derive(Parser, Debug)]
#[command(name = "hostfacts")]
#[command(about = "Report inventory facts about this Mac")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output on stderr
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Print results as JSON
    #[arg(long = "json", global = true)]
    pub json: bool,

    /// Per-fact timeout in seconds
    #[arg(long = "timeout", value_name = "SECS", global = true)]
    pub timeout: Option<u64>,

    /// Endpoint used for the externalip fact
    #[arg(long = "external-ip-url", value_name = "URL", global = true)]
    pub external_ip_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
