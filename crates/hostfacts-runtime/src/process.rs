//! Process execution on the tokio runtime.

use std::process::Stdio;

use async_trait::async_trait;
use hostfacts_core::ports::command_runner::command_line;
use hostfacts_core::ports::{CommandError, CommandOutput, CommandRunner};
use tokio::process::Command;
use tracing::debug;

/// Runs programs with `tokio::process`.
///
/// Children are killed if the awaiting future is dropped, so a resolver
/// that times out does not leave its subprocess behind.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioCommandRunner;

impl TokioCommandRunner {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for TokioCommandRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, CommandError> {
        debug!(command = %command_line(program, args), "spawning");
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| CommandError::Spawn {
                program: program.to_string(),
                message: e.to_string(),
            })?;

        debug!(
            program,
            status = ?output.status.code(),
            stdout_bytes = output.stdout.len(),
            stderr_bytes = output.stderr.len(),
            "command finished"
        );
        Ok(CommandOutput {
            status: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn captures_stdout_and_status() {
        let output = TokioCommandRunner::new()
            .run("sh", &["-c", "printf hello; exit 3"])
            .await
            .unwrap();
        assert_eq!(output.status, Some(3));
        assert_eq!(output.stdout, b"hello");
    }

    #[tokio::test]
    async fn captures_stderr() {
        let output = TokioCommandRunner::new()
            .run("sh", &["-c", "echo oops >&2"])
            .await
            .unwrap();
        assert_eq!(output.status, Some(0));
        assert!(output.into_text("sh").is_err());
    }

    #[tokio::test]
    async fn missing_program_is_a_spawn_error() {
        let err = TokioCommandRunner::new()
            .run("/nonexistent/hostfacts-probe", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::Spawn { .. }));
    }
}
