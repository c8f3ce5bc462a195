//! Resolution and registry errors.
//!
//! `ResolveError` is what a single resolver reports; it distinguishes the
//! failing collaborator from an unexpected output shape. `RegistryError`
//! is what callers of `FactRegistry` see and adds the lookup-level
//! conditions (`NotFound`, catalog validation).

use std::time::Duration;
use thiserror::Error;

use crate::ports::{
    CommandError, DecodeError, DisplayError, HostError, HttpError, NetworkError, PreferenceError,
};
use crate::session::SessionError;

/// Result type returned by every resolver.
pub type FactResult = Result<crate::domain::FactValue, ResolveError>;

/// A resolver could not produce its fact.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Preference(#[from] PreferenceError),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Display(#[from] DisplayError),

    #[error(transparent)]
    Http(#[from] HttpError),

    #[error(transparent)]
    Host(#[from] HostError),

    /// The query succeeded but returned no entry to read from.
    #[error("{query} returned no matching entry")]
    MissingEntry { query: String },

    /// The entry exists but lacks the expected field (or it has the wrong type).
    #[error("{query} output has no usable '{field}' field")]
    MissingField { query: String, field: String },

    /// Output could not be interpreted.
    #[error("unexpected output from {query}: {detail}")]
    Unexpected { query: String, detail: String },

    /// Subnet mask with non-hex characters or non-contiguous bits.
    #[error("malformed subnet mask '{0}'")]
    MalformedMask(String),

    /// Session state this fact depends on could not be gathered.
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("resolver timed out after {0:?}")]
    Timeout(Duration),
}

impl ResolveError {
    pub fn missing_field(query: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingField {
            query: query.into(),
            field: field.into(),
        }
    }

    pub fn unexpected(query: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Unexpected {
            query: query.into(),
            detail: detail.into(),
        }
    }
}

/// Errors surfaced by `FactRegistry`.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The requested fact name is not in the catalog.
    #[error("no fact named '{0}'")]
    NotFound(String),

    /// Two resolvers were registered under one name.
    #[error("fact '{0}' is registered more than once")]
    DuplicateName(String),

    /// A registered name is empty or not lowercase ASCII alphanumerics.
    #[error("invalid fact name '{0}': expected lowercase ASCII letters and digits")]
    InvalidName(String),

    /// The resolver for `name` ran and failed.
    #[error("fact '{name}' could not be resolved: {source}")]
    Resolve {
        name: String,
        #[source]
        source: ResolveError,
    },
}
