//! Preference store backed by `defaults read`.

use std::sync::Arc;

use async_trait::async_trait;
use hostfacts_core::ports::command_runner::command_line;
use hostfacts_core::ports::{CommandRunner, PreferenceError, PreferenceStore};
use tracing::debug;

/// `defaults` reports an unset key or missing domain with this phrase.
const NOT_SET_MARKER: &str = "does not exist";

/// Reads preferences by running `defaults read <domain> <key>`.
#[derive(Clone)]
pub struct DefaultsPreferenceStore {
    commands: Arc<dyn CommandRunner>,
}

impl DefaultsPreferenceStore {
    pub fn new(commands: Arc<dyn CommandRunner>) -> Self {
        Self { commands }
    }
}

#[async_trait]
impl PreferenceStore for DefaultsPreferenceStore {
    async fn read(&self, domain: &str, key: &str) -> Result<Option<String>, PreferenceError> {
        let args = ["read", domain, key];
        let read_error = |message: String| PreferenceError::Read {
            domain: domain.to_string(),
            key: key.to_string(),
            message,
        };

        let output = self
            .commands
            .run("defaults", &args)
            .await
            .map_err(|e| read_error(e.to_string()))?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if output.status != Some(0) && stderr.contains(NOT_SET_MARKER) {
            debug!(domain, key, "preference not set");
            return Ok(None);
        }

        let text = output
            .into_text(&command_line("defaults", &args))
            .map_err(|e| read_error(e.to_string()))?;
        Ok(Some(text.trim().to_string()))
    }
}
