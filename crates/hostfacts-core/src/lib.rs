//! Core of `hostfacts`: the fact catalog and the registry that resolves it.
//!
//! This crate defines the domain values, the ports through which resolvers
//! reach the host (processes, property lists, preferences, network
//! configuration, display, HTTP, process environment) and the resolvers
//! themselves. It performs no I/O of its own; adapters live in
//! `hostfacts-runtime`.
//!
//! ```ignore
//! let registry = FactRegistry::new(services, Settings::default()).await?;
//! for name in registry.list_names() {
//!     println!("{name}");
//! }
//! let snapshot = registry.resolve_all().await;
//! ```
#![deny(unused_crate_dependencies)]

pub mod derive;
pub mod domain;
pub mod error;
pub mod ports;
pub mod registry;
pub mod resolvers;
pub mod session;
pub mod settings;
pub mod snapshot;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use domain::{DefaultRoute, FactValue, HardwarePort, InterfaceBinding, Structured};
pub use error::{FactResult, RegistryError, ResolveError};
pub use ports::{
    CommandError, CommandOutput, CommandRunner, DecodeError, DisplayError, DisplayProbe,
    HostEnvironment, HostError, HostServices, HttpClient, HttpError, NetworkConfig, NetworkError,
    PlistDecoder, PreferenceError, PreferenceStore,
};
pub use registry::{Catalog, FactRegistry, RegistryBuilder, ResolveFn};
pub use resolvers::FactContext;
pub use session::{SessionError, SessionState};
pub use settings::{
    DEFAULT_EXTERNAL_IP_URL, DEFAULT_HTTP_TIMEOUT, DEFAULT_RESOLVER_TIMEOUT, Settings,
    SettingsError, SettingsUpdate, validate_settings,
};
pub use snapshot::{Snapshot, SnapshotEntry};
