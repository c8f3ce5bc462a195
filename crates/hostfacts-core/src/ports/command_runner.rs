//! Process execution port.
//!
//! The runner only executes and captures. Deciding whether an exit status
//! or stderr output constitutes a failure is the caller's policy (see
//! `CommandOutput::into_stdout`).

use async_trait::async_trait;

use super::CommandError;

/// Captured result of one process execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, or `None` when the process was killed by a signal.
    pub status: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    /// Successful output with the given stdout.
    pub fn success(stdout: impl Into<Vec<u8>>) -> Self {
        Self {
            status: Some(0),
            stdout: stdout.into(),
            stderr: Vec::new(),
        }
    }

    /// Failed output with the given exit code and stderr.
    pub fn failure(status: i32, stderr: impl Into<Vec<u8>>) -> Self {
        Self {
            status: Some(status),
            stdout: Vec::new(),
            stderr: stderr.into(),
        }
    }

    /// Stdout bytes, or an error when the process exited non-zero or wrote
    /// anything to stderr.
    pub fn into_stdout(self, command: &str) -> Result<Vec<u8>, CommandError> {
        let stderr = String::from_utf8_lossy(&self.stderr).trim().to_string();
        if self.status == Some(0) && stderr.is_empty() {
            return Ok(self.stdout);
        }
        Err(CommandError::Failed {
            command: command.to_string(),
            status: self
                .status
                .map_or_else(|| "signal".to_string(), |code| code.to_string()),
            stderr,
        })
    }

    /// Like `into_stdout`, decoded lossily as UTF-8 text.
    pub fn into_text(self, command: &str) -> Result<String, CommandError> {
        self.into_stdout(command)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Executes external programs with an argument vector.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args` and capture its output.
    ///
    /// Returns `Err` only when the program could not be started.
    async fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, CommandError>;
}

/// Render a command line for diagnostics.
pub fn command_line(program: &str, args: &[&str]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{program} {}", args.join(" "))
    }
}
