//! CLI bootstrap - the composition root.
//!
//! Settings are layered as defaults, then `.env` and process environment,
//! then command-line flags. The validated result is handed to the runtime
//! adapters and the fact registry.

use std::time::Duration;

use hostfacts_core::{FactRegistry, Settings, SettingsUpdate, validate_settings};
use hostfacts_runtime::default_services;
use tracing::{debug, warn};

use crate::error::CliError;
use crate::parser::Cli;
use crate::presentation::OutputFormat;

pub const RESOLVER_TIMEOUT_VAR: &str = "HOSTFACTS_RESOLVER_TIMEOUT_SECS";
pub const HTTP_TIMEOUT_VAR: &str = "HOSTFACTS_HTTP_TIMEOUT_SECS";
pub const EXTERNAL_IP_URL_VAR: &str = "HOSTFACTS_EXTERNAL_IP_URL";

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub settings: Settings,
    pub format: OutputFormat,
    pub verbose: bool,
}

impl CliConfig {
    /// Load `.env` if present, then build from the process environment.
    pub fn load(cli: &Cli) -> Result<Self, CliError> {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                warn!(error = %err, "ignoring unreadable .env file");
            }
        }
        Self::from_lookup(cli, |key| std::env::var(key).ok())
    }

    /// Build from flags and an environment lookup.
    ///
    /// When only the resolver timeout is given, the HTTP timeout is capped
    /// to it so the pair stays valid.
    pub fn from_lookup(
        cli: &Cli,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, CliError> {
        let resolver_timeout = match cli.timeout {
            Some(secs) => Some(Duration::from_secs(secs)),
            None => lookup(RESOLVER_TIMEOUT_VAR)
                .map(|raw| parse_secs(RESOLVER_TIMEOUT_VAR, &raw))
                .transpose()?,
        };
        let http_timeout = lookup(HTTP_TIMEOUT_VAR)
            .map(|raw| parse_secs(HTTP_TIMEOUT_VAR, &raw))
            .transpose()?;
        let external_ip_url = cli
            .external_ip_url
            .clone()
            .or_else(|| lookup(EXTERNAL_IP_URL_VAR));

        let mut settings = Settings::with_defaults();
        settings.merge(&SettingsUpdate {
            resolver_timeout,
            http_timeout,
            external_ip_url,
        });
        if http_timeout.is_none() {
            settings.http_timeout = settings.http_timeout.min(settings.resolver_timeout);
        }
        validate_settings(&settings)?;
        debug!(?settings, "settings resolved");

        Ok(Self {
            settings,
            format: OutputFormat::from_json_flag(cli.json),
            verbose: cli.verbose,
        })
    }
}

fn parse_secs(var: &str, raw: &str) -> Result<Duration, CliError> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| CliError::Config(format!("{var} must be a whole number of seconds, got '{raw}'")))
}

/// Fully composed context for command dispatch.
pub struct CliContext {
    pub registry: FactRegistry,
    pub format: OutputFormat,
    pub verbose: bool,
}

/// Wire the host adapters into a registry.
pub async fn bootstrap(config: CliConfig) -> Result<CliContext, CliError> {
    let services =
        default_services(&config.settings).map_err(|e| CliError::Internal(e.to_string()))?;
    let registry = FactRegistry::new(services, config.settings).await?;
    Ok(CliContext {
        registry,
        format: config.format,
        verbose: config.verbose,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::collections::HashMap;

    fn config(args: &[&str], env: &[(&str, &str)]) -> Result<CliConfig, CliError> {
        let cli = Cli::parse_from(args.iter().copied());
        let env: HashMap<String, String> = env
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        CliConfig::from_lookup(&cli, |key| env.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = config(&["hostfacts"], &[]).unwrap();
        assert_eq!(config.settings, Settings::with_defaults());
        assert_eq!(config.format, OutputFormat::Text);
    }

    #[test]
    fn flags_override_environment() {
        let config = config(
            &["hostfacts", "--timeout", "9", "--external-ip-url", "http://flag.test/"],
            &[
                (RESOLVER_TIMEOUT_VAR, "2"),
                (EXTERNAL_IP_URL_VAR, "http://env.test/"),
            ],
        )
        .unwrap();
        assert_eq!(config.settings.resolver_timeout, Duration::from_secs(9));
        assert_eq!(config.settings.external_ip_url, "http://flag.test/");
    }

    #[test]
    fn short_resolver_timeout_caps_http_timeout() {
        let config = config(&["hostfacts", "--timeout", "2"], &[]).unwrap();
        assert_eq!(config.settings.http_timeout, Duration::from_secs(2));
    }

    #[test]
    fn explicit_http_timeout_is_validated() {
        let err = config(
            &["hostfacts", "--timeout", "2"],
            &[(HTTP_TIMEOUT_VAR, "3")],
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 78);
    }

    #[test]
    fn non_numeric_timeout_is_a_config_error() {
        let err = config(&["hostfacts"], &[(RESOLVER_TIMEOUT_VAR, "soon")]).unwrap_err();
        assert!(matches!(err, CliError::Config(ref msg) if msg.contains("soon")));
    }
}
