//! CLI entry point - the composition root.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use hostfacts_cli::{Cli, CliConfig, CliError, bootstrap, dispatch, init_logging};

/// Exit code for failures that never became a `CliError`.
const EX_SOFTWARE: u8 = 70;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("hostfacts: {err:#}");
            ExitCode::from(
                err.downcast_ref::<CliError>()
                    .map_or(EX_SOFTWARE, CliError::exit_code),
            )
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = CliConfig::load(cli)?;

    // Facts resolve one at a time; a single thread is enough.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    runtime.block_on(async {
        let ctx = bootstrap(config).await?;
        let mut stdout = std::io::stdout().lock();
        dispatch(&ctx, cli.command.as_ref(), &mut stdout).await?;
        Ok::<(), anyhow::Error>(())
    })
}
