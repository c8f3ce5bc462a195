//! Parsers for `networksetup` reports.

use hostfacts_core::domain::HardwarePort;

/// Hardware port names that denote a wireless radio.
const WIRELESS_PORT_NAMES: &[&str] = &["Wi-Fi", "AirPort"];

/// Parse `networksetup -listallhardwareports`.
///
/// Each port is a `Hardware Port:` / `Device:` / `Ethernet Address:` block.
/// A block without a device is dropped; a missing address is kept empty.
pub fn hardware_ports(report: &str) -> Vec<HardwarePort> {
    report
        .split("Hardware Port:")
        .skip(1)
        .filter_map(|block| {
            let mut lines = block.lines();
            let name = lines.next()?.trim();
            let mut device = None;
            let mut address = "";
            for line in lines.map(str::trim) {
                if let Some(value) = line.strip_prefix("Device:") {
                    device = Some(value.trim());
                } else if let Some(value) = line.strip_prefix("Ethernet Address:") {
                    address = value.trim();
                }
            }
            Some(HardwarePort::new(name, device?, address))
        })
        .collect()
}

/// Parse `networksetup -listallnetworkservices`.
///
/// The first line is an explanatory header; disabled services carry a
/// leading `*`, which is stripped.
pub fn network_services(report: &str) -> Vec<String> {
    report
        .lines()
        .skip(1)
        .map(|line| line.trim().trim_start_matches('*').trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Devices of the wireless hardware ports.
pub fn wireless_devices(ports: &[HardwarePort]) -> Vec<String> {
    ports
        .iter()
        .filter(|port| WIRELESS_PORT_NAMES.contains(&port.name.as_str()))
        .map(|port| port.device.clone())
        .collect()
}

/// Parse `networksetup -getairportpower <device>` (`Wi-Fi Power (en0): On`).
pub fn airport_power(report: &str) -> Option<bool> {
    let (_, state) = report.trim().rsplit_once(':')?;
    match state.trim() {
        "On" => Some(true),
        "Off" => Some(false),
        _ => None,
    }
}

/// Parse `networksetup -getairportnetwork <device>`.
///
/// `Current Wi-Fi Network: HomeNet` yields the name; the "not associated"
/// answer yields `None`.
pub fn airport_network(report: &str) -> Option<String> {
    let line = report.lines().map(str::trim).find(|line| !line.is_empty())?;
    let (label, network) = line.split_once(": ")?;
    if !label.starts_with("Current") {
        return None;
    }
    let network = network.trim();
    (!network.is_empty()).then(|| network.to_string())
}
