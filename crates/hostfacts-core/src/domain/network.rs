//! Network description types shared between ports and resolvers.

use serde::{Deserialize, Serialize};

/// One entry of the host's hardware port list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HardwarePort {
    /// Display name, e.g. `Wi-Fi` or `Thunderbolt Ethernet Slot 1`.
    pub name: String,
    /// BSD device identifier, e.g. `en0`.
    pub device: String,
    /// Hardware (MAC) address as reported by the system.
    pub hardware_address: String,
}

impl HardwarePort {
    pub fn new(
        name: impl Into<String>,
        device: impl Into<String>,
        hardware_address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            device: device.into(),
            hardware_address: hardware_address.into(),
        }
    }
}

/// The routing table's default route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultRoute {
    pub gateway: String,
    pub interface: String,
}
