//! Host adapters for `hostfacts-core`.
//!
//! Each module implements one core port against the real machine.
//! `default_services` wires them into the `HostServices` the registry
//! consumes; every command-based adapter shares one process runner.

pub mod display;
pub mod error;
pub mod host;
pub mod http;
pub mod network;
pub mod plist_decoder;
pub mod preferences;
pub mod process;

use std::sync::Arc;

use hostfacts_core::ports::{CommandRunner, HostServices};
use hostfacts_core::settings::Settings;

pub use display::SystemProfilerDisplay;
pub use error::RuntimeError;
pub use host::SystemHostEnvironment;
pub use http::ReqwestHttpClient;
pub use network::NetworksetupConfig;
pub use plist_decoder::PlistCrateDecoder;
pub use preferences::DefaultsPreferenceStore;
pub use process::TokioCommandRunner;

/// Build the production adapter set.
pub fn default_services(settings: &Settings) -> Result<HostServices, RuntimeError> {
    let commands: Arc<dyn CommandRunner> = Arc::new(TokioCommandRunner::new());
    Ok(HostServices {
        commands: Arc::clone(&commands),
        plist: Arc::new(PlistCrateDecoder::new()),
        preferences: Arc::new(DefaultsPreferenceStore::new(Arc::clone(&commands))),
        network: Arc::new(NetworksetupConfig::new(Arc::clone(&commands))),
        display: Arc::new(SystemProfilerDisplay::new(commands)),
        http: Arc::new(ReqwestHttpClient::new(settings.http_timeout)?),
        host: Arc::new(SystemHostEnvironment::new()),
    })
}
