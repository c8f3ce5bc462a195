//! Runtime settings and validation.
//!
//! Pure domain types; reading them from the environment or the command line
//! is the CLI's job.

use std::time::Duration;
use thiserror::Error;

/// Upper bound for a single resolver invocation.
pub const DEFAULT_RESOLVER_TIMEOUT: Duration = Duration::from_secs(5);

/// Upper bound for the external IP request.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(4);

/// Endpoint answering with `{"ip": "..."}`.
pub const DEFAULT_EXTERNAL_IP_URL: &str = "https://api.ipify.org?format=json";

/// Settings shared by the registry and the adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Applied to every resolver call and every session-gathering step.
    pub resolver_timeout: Duration,
    /// Applied by the HTTP adapter to each request.
    pub http_timeout: Duration,
    /// Endpoint queried by the `externalip` fact.
    pub external_ip_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl Settings {
    /// Create settings with sensible defaults.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            resolver_timeout: DEFAULT_RESOLVER_TIMEOUT,
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            external_ip_url: DEFAULT_EXTERNAL_IP_URL.to_string(),
        }
    }

    /// Merge an update, only changing fields that are `Some`.
    pub fn merge(&mut self, update: &SettingsUpdate) {
        if let Some(timeout) = update.resolver_timeout {
            self.resolver_timeout = timeout;
        }
        if let Some(timeout) = update.http_timeout {
            self.http_timeout = timeout;
        }
        if let Some(ref url) = update.external_ip_url {
            self.external_ip_url.clone_from(url);
        }
    }
}

/// Partial settings update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsUpdate {
    pub resolver_timeout: Option<Duration>,
    pub http_timeout: Option<Duration>,
    pub external_ip_url: Option<String>,
}

/// Settings validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("HTTP timeout ({http:?}) must not exceed the resolver timeout ({resolver:?})")]
    HttpTimeoutTooLong { http: Duration, resolver: Duration },

    #[error("external IP URL must start with http:// or https://, got '{0}'")]
    InvalidUrl(String),
}

/// Validate settings before they are handed to the registry.
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    if settings.resolver_timeout.is_zero() {
        return Err(SettingsError::ZeroTimeout("resolver timeout"));
    }
    if settings.http_timeout.is_zero() {
        return Err(SettingsError::ZeroTimeout("HTTP timeout"));
    }
    if settings.http_timeout > settings.resolver_timeout {
        return Err(SettingsError::HttpTimeoutTooLong {
            http: settings.http_timeout,
            resolver: settings.resolver_timeout,
        });
    }
    let url = settings.external_ip_url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(SettingsError::InvalidUrl(settings.external_ip_url.clone()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(validate_settings(&Settings::with_defaults()), Ok(()));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut settings = Settings::with_defaults();
        settings.resolver_timeout = Duration::ZERO;
        assert_eq!(
            validate_settings(&settings),
            Err(SettingsError::ZeroTimeout("resolver timeout"))
        );
    }

    #[test]
    fn http_timeout_must_fit_inside_resolver_timeout() {
        let mut settings = Settings::with_defaults();
        settings.merge(&SettingsUpdate {
            resolver_timeout: Some(Duration::from_secs(2)),
            ..SettingsUpdate::default()
        });
        assert!(matches!(
            validate_settings(&settings),
            Err(SettingsError::HttpTimeoutTooLong { .. })
        ));
    }

    #[test]
    fn url_scheme_is_checked() {
        let mut settings = Settings::with_defaults();
        settings.merge(&SettingsUpdate {
            external_ip_url: Some("ftp://example.com".into()),
            ..SettingsUpdate::default()
        });
        assert!(matches!(
            validate_settings(&settings),
            Err(SettingsError::InvalidUrl(_))
        ));
    }

    #[test]
    fn merge_only_touches_some_fields() {
        let mut settings = Settings::with_defaults();
        settings.merge(&SettingsUpdate {
            http_timeout: Some(Duration::from_secs(1)),
            ..SettingsUpdate::default()
        });
        assert_eq!(settings.http_timeout, Duration::from_secs(1));
        assert_eq!(settings.resolver_timeout, DEFAULT_RESOLVER_TIMEOUT);
        assert_eq!(settings.external_ip_url, DEFAULT_EXTERNAL_IP_URL);
    }
}
