//! Per-run session state.
//!
//! Gathered once when the registry is constructed and shared read-only by
//! every resolver. Each part is gathered independently; a part that could
//! not be gathered is kept as an error so only the facts depending on it
//! fail.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

use crate::derive::parse_default_route;
use crate::domain::{DefaultRoute, HardwarePort};
use crate::ports::HostServices;
use crate::ports::command_runner::command_line;

const ROUTE_PROGRAM: &str = "netstat";
const ROUTE_ARGS: &[&str] = &["-rn", "-f", "inet"];

/// A part of the session state could not be gathered.
#[derive(Debug, Clone, Error)]
#[error("session {what} unavailable: {message}")]
pub struct SessionError {
    pub what: &'static str,
    pub message: String,
}

impl SessionError {
    fn new(what: &'static str, message: impl Display) -> Self {
        Self {
            what,
            message: message.to_string(),
        }
    }
}

/// Network context captured at registry construction.
#[derive(Debug, Clone)]
pub struct SessionState {
    network_services: Result<Vec<String>, SessionError>,
    hardware_ports: Result<Vec<HardwarePort>, SessionError>,
    wireless_interfaces: Result<Vec<String>, SessionError>,
    default_route: Result<Option<DefaultRoute>, SessionError>,
}

impl SessionState {
    /// Query every part of the session, bounding each step by `timeout`.
    pub async fn gather(services: &HostServices, timeout: Duration) -> Self {
        let network_services = bounded(
            "network services",
            timeout,
            services.network.network_services(),
        )
        .await;
        let hardware_ports =
            bounded("hardware ports", timeout, services.network.hardware_ports()).await;
        let wireless_interfaces = bounded(
            "wireless interfaces",
            timeout,
            services.network.wireless_interfaces(),
        )
        .await;
        let default_route = bounded("default route", timeout, read_default_route(services)).await;

        Self {
            network_services,
            hardware_ports,
            wireless_interfaces,
            default_route,
        }
    }

    /// Assemble a session from already-known parts.
    pub fn from_parts(
        network_services: Result<Vec<String>, SessionError>,
        hardware_ports: Result<Vec<HardwarePort>, SessionError>,
        wireless_interfaces: Result<Vec<String>, SessionError>,
        default_route: Result<Option<DefaultRoute>, SessionError>,
    ) -> Self {
        Self {
            network_services,
            hardware_ports,
            wireless_interfaces,
            default_route,
        }
    }

    /// Configured network service names, in service order.
    pub fn network_services(&self) -> Result<&[String], SessionError> {
        self.network_services.as_deref().map_err(Clone::clone)
    }

    pub fn hardware_ports(&self) -> Result<&[HardwarePort], SessionError> {
        self.hardware_ports.as_deref().map_err(Clone::clone)
    }

    pub fn wireless_interfaces(&self) -> Result<&[String], SessionError> {
        self.wireless_interfaces.as_deref().map_err(Clone::clone)
    }

    /// The non-tunnel default route, `None` when the host has none.
    pub fn default_route(&self) -> Result<Option<&DefaultRoute>, SessionError> {
        self.default_route
            .as_ref()
            .map(Option::as_ref)
            .map_err(Clone::clone)
    }

    /// Interface carrying the default route.
    pub fn active_interface(&self) -> Result<Option<&str>, SessionError> {
        Ok(self.default_route()?.map(|route| route.interface.as_str()))
    }
}

async fn bounded<T, E, F>(what: &'static str, timeout: Duration, step: F) -> Result<T, SessionError>
where
    E: Display,
    F: Future<Output = Result<T, E>>,
{
    let result = match tokio::time::timeout(timeout, step).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(SessionError::new(what, err)),
        Err(_) => Err(SessionError::new(
            what,
            format!("timed out after {timeout:?}"),
        )),
    };
    match &result {
        Ok(_) => debug!(part = what, "session part gathered"),
        Err(err) => warn!(part = what, error = %err.message, "session part unavailable"),
    }
    result
}

async fn read_default_route(services: &HostServices) -> Result<Option<DefaultRoute>, String> {
    let line = command_line(ROUTE_PROGRAM, ROUTE_ARGS);
    let table = services
        .commands
        .run(ROUTE_PROGRAM, ROUTE_ARGS)
        .await
        .and_then(|output| output.into_text(&line))
        .map_err(|err| err.to_string())?;
    Ok(parse_default_route(&table))
}
