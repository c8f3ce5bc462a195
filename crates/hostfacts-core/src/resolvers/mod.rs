//! The fact catalog.
//!
//! Every resolver is an `async fn(&FactContext) -> FactResult`. Each family
//! module registers its resolvers with a `RegistryBuilder`; `register_all`
//! assembles the complete catalog.
//!
//! Resolvers never look each other up through the registry. A fact built
//! from another fact (`cidr` from `ipaddress` and `subnetmask`) calls the
//! other resolver function directly.

pub mod hardware;
pub mod identity;
pub mod network;
pub mod os;
pub mod power;
pub mod security;
pub mod storage;

use tracing::debug;

use crate::derive::text::first_line;
use crate::domain::Structured;
use crate::error::ResolveError;
use crate::ports::HostServices;
use crate::ports::command_runner::command_line;
use crate::registry::RegistryBuilder;
use crate::session::SessionState;
use crate::settings::Settings;

/// Everything a resolver may consult.
pub struct FactContext {
    pub services: HostServices,
    pub session: SessionState,
    pub settings: Settings,
}

impl FactContext {
    pub const fn new(services: HostServices, session: SessionState, settings: Settings) -> Self {
        Self {
            services,
            session,
            settings,
        }
    }

    /// Run a command and return its stdout as text.
    pub async fn run_text(&self, program: &str, args: &[&str]) -> Result<String, ResolveError> {
        let line = command_line(program, args);
        debug!(command = %line, "running command");
        let output = self.services.commands.run(program, args).await?;
        Ok(output.into_text(&line)?)
    }

    /// Run a command and return its first non-empty output line.
    pub async fn run_line(&self, program: &str, args: &[&str]) -> Result<String, ResolveError> {
        let text = self.run_text(program, args).await?;
        first_line(&text)
            .map(str::to_string)
            .ok_or_else(|| ResolveError::unexpected(command_line(program, args), "no output"))
    }

    /// Run a command emitting a property list and decode it.
    ///
    /// Empty output (no registry entry matched the query) is
    /// `MissingEntry` rather than a decode failure.
    pub async fn run_structured(
        &self,
        program: &str,
        args: &[&str],
    ) -> Result<Structured, ResolveError> {
        let line = command_line(program, args);
        debug!(command = %line, "running command");
        let output = self.services.commands.run(program, args).await?;
        let payload = output.into_stdout(&line)?;
        if payload.iter().all(u8::is_ascii_whitespace) {
            return Err(ResolveError::MissingEntry { query: line });
        }
        Ok(self.services.plist.decode(&payload)?)
    }

    /// `sysctl -n <name>`, trimmed.
    pub async fn sysctl(&self, name: &str) -> Result<String, ResolveError> {
        self.run_line("sysctl", &["-n", name]).await
    }

    /// `sysctl -n <name>` parsed as an integer.
    pub async fn sysctl_integer(&self, name: &str) -> Result<i64, ResolveError> {
        let raw = self.sysctl(name).await?;
        raw.parse().map_err(|_| {
            ResolveError::unexpected(format!("sysctl -n {name}"), format!("'{raw}' is not an integer"))
        })
    }
}

/// Register the complete fact catalog.
pub fn register_all(builder: &mut RegistryBuilder) {
    identity::register(builder);
    os::register(builder);
    hardware::register(builder);
    power::register(builder);
    storage::register(builder);
    security::register(builder);
    network::register(builder);
}

/// Read a text field from a decoded entry.
pub(crate) fn text_field(entry: &Structured, query: &str, key: &str) -> Result<String, ResolveError> {
    entry
        .get(key)
        .and_then(Structured::text)
        .ok_or_else(|| ResolveError::missing_field(query, key))
}

/// Read an integer field from a decoded entry.
pub(crate) fn integer_field(entry: &Structured, query: &str, key: &str) -> Result<i64, ResolveError> {
    entry
        .get(key)
        .and_then(Structured::as_i64)
        .ok_or_else(|| ResolveError::missing_field(query, key))
}

/// Read a boolean (or zero/non-zero integer) field from a decoded entry.
pub(crate) fn bool_field(entry: &Structured, query: &str, key: &str) -> Result<bool, ResolveError> {
    entry
        .get(key)
        .and_then(Structured::as_bool)
        .ok_or_else(|| ResolveError::missing_field(query, key))
}
