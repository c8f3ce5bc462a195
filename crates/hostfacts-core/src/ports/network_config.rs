//! Network and radio configuration port.

use async_trait::async_trait;

use super::NetworkError;
use crate::domain::HardwarePort;

/// Enumerates configured network services and queries per-interface
/// attributes.
#[async_trait]
pub trait NetworkConfig: Send + Sync {
    /// Display names of all configured network services, in service order.
    async fn network_services(&self) -> Result<Vec<String>, NetworkError>;

    /// Hardware ports (display name, device, hardware address).
    async fn hardware_ports(&self) -> Result<Vec<HardwarePort>, NetworkError>;

    /// BSD names of the wireless interfaces.
    async fn wireless_interfaces(&self) -> Result<Vec<String>, NetworkError>;

    /// Hardware address of `device`, if it has one.
    async fn hardware_address(&self, device: &str) -> Result<Option<String>, NetworkError>;

    /// Whether the radio behind `device` is powered on.
    async fn wifi_power(&self, device: &str) -> Result<bool, NetworkError>;

    /// Network name `device` is associated with, if any.
    async fn current_network(&self, device: &str) -> Result<Option<String>, NetworkError>;
}
