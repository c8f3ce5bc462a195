//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the resolvers expect from the host. They
//! contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `plist`, `reqwest` or `tokio::process` types in any signature
//! - Adapters live in `hostfacts-runtime`; fakes live in `testing`
//! - Every collaborator is injected through `HostServices`, never reached
//!   through process-wide state

pub mod command_runner;
pub mod display_probe;
pub mod host_environment;
pub mod http_client;
pub mod network_config;
pub mod plist_decoder;
pub mod preference_store;

use std::sync::Arc;
use thiserror::Error;

pub use command_runner::{CommandOutput, CommandRunner};
pub use display_probe::DisplayProbe;
pub use host_environment::HostEnvironment;
pub use http_client::HttpClient;
pub use network_config::NetworkConfig;
pub use plist_decoder::PlistDecoder;
pub use preference_store::PreferenceStore;

/// Container for every external collaborator the resolvers use.
///
/// Built once by the composition root (or by `testing::FakeHost`) and
/// shared read-only for the rest of the run.
#[derive(Clone)]
pub struct HostServices {
    /// Process execution.
    pub commands: Arc<dyn CommandRunner>,
    /// Property-list decoding.
    pub plist: Arc<dyn PlistDecoder>,
    /// Platform preference lookups.
    pub preferences: Arc<dyn PreferenceStore>,
    /// Network and radio configuration.
    pub network: Arc<dyn NetworkConfig>,
    /// Primary display geometry.
    pub display: Arc<dyn DisplayProbe>,
    /// Off-host HTTP lookups.
    pub http: Arc<dyn HttpClient>,
    /// Process environment, identity and clock.
    pub host: Arc<dyn HostEnvironment>,
}

/// Errors raised while running an external command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The program could not be started at all.
    #[error("failed to run {program}: {message}")]
    Spawn { program: String, message: String },

    /// The program ran but reported failure (non-zero exit or stderr output).
    #[error("{command} failed (status {status}): {stderr}")]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },
}

/// Errors raised while decoding a property list.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("empty property list payload")]
    Empty,

    #[error("malformed property list: {0}")]
    Malformed(String),
}

/// Errors raised by the preference store.
#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("reading {domain} {key} failed: {message}")]
    Read {
        domain: String,
        key: String,
        message: String,
    },
}

/// Errors raised by the network configuration service.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("network configuration query failed: {0}")]
    Query(String),

    #[error("unexpected network configuration output: {0}")]
    Parse(String),
}

/// Errors raised by the display service.
#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("display query failed: {0}")]
    Query(String),

    #[error("unexpected display report: {0}")]
    Parse(String),
}

/// Errors raised by the HTTP client.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Connection, DNS, TLS or timeout failure before a response arrived.
    #[error("{0}")]
    Transport(String),

    #[error("HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("invalid response body from {url}: {message}")]
    Body { url: String, message: String },
}

impl HttpError {
    /// Whether the request never produced a response.
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Errors raised by host environment queries.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("{0} is not available on this platform")]
    Unsupported(&'static str),

    #[error("host query failed: {0}")]
    Query(String),
}
