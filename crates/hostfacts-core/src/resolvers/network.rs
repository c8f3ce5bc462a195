//! Network interface, addressing and name service facts.

use indexmap::IndexMap;
use tracing::warn;

use super::FactContext;
use crate::derive::network_cidr;
use crate::derive::text::{configured_entries, keyed_token};
use crate::domain::{FactValue, HardwarePort};
use crate::error::{FactResult, ResolveError};
use crate::registry::RegistryBuilder;

/// Hardware port name of the built-in wireless interface.
pub const WIFI_PORT: &str = "Wi-Fi";

/// Services whose name contains one of these get search domain and DNS
/// server lookups.
const NAME_SERVICE_MARKERS: &[&str] = &["Ethernet", "Wi-Fi"];

pub(super) fn register(builder: &mut RegistryBuilder) {
    builder
        .register("networkinterfaces", |ctx| Box::pin(networkinterfaces(ctx)))
        .register("wifiinterface", |ctx| Box::pin(wifiinterface(ctx)))
        .register("wifimacaddress", |ctx| Box::pin(wifimacaddress(ctx)))
        .register("wifipower", |ctx| Box::pin(wifipower(ctx)))
        .register("ssid", |ctx| Box::pin(ssid(ctx)))
        .register("activenetwork", |ctx| Box::pin(activenetwork(ctx)))
        .register("activemacaddress", |ctx| Box::pin(activemacaddress(ctx)))
        .register("ipaddress", |ctx| Box::pin(ipaddress(ctx)))
        .register("subnetmask", |ctx| Box::pin(subnetmask(ctx)))
        .register("cidr", |ctx| Box::pin(cidr(ctx)))
        .register("defaultgateway", |ctx| Box::pin(defaultgateway(ctx)))
        .register("searchdomains", |ctx| Box::pin(searchdomains(ctx)))
        .register("dnsservers", |ctx| Box::pin(dnsservers(ctx)))
        .register("externalip", |ctx| Box::pin(externalip(ctx)));
}

/// Network service name to (device, hardware address), in service order.
///
/// Each service is joined to the hardware port of the same name. Services
/// with no port behind them (VPNs, PPPoE) are left out.
pub async fn networkinterfaces(ctx: &FactContext) -> FactResult {
    let services = ctx.session.network_services()?;
    let ports = ctx.session.hardware_ports()?;
    let map = services
        .iter()
        .filter_map(|service| {
            ports.iter().find(|port| &port.name == service).map(|port| {
                (
                    service.clone(),
                    (port.device.clone(), port.hardware_address.clone()),
                )
            })
        })
        .collect();
    Ok(FactValue::Interfaces(map))
}

fn wifi_port(ctx: &FactContext) -> Result<Option<&HardwarePort>, ResolveError> {
    let ports = ctx.session.hardware_ports()?;
    Ok(ports.iter().find(|port| port.name == WIFI_PORT))
}

pub async fn wifiinterface(ctx: &FactContext) -> FactResult {
    Ok(FactValue::optional_text(
        wifi_port(ctx)?.map(|port| port.device.clone()),
    ))
}

pub async fn wifimacaddress(ctx: &FactContext) -> FactResult {
    Ok(FactValue::optional_text(
        wifi_port(ctx)?.map(|port| port.hardware_address.clone()),
    ))
}

/// Device of the wireless radio: the `Wi-Fi` port, else the first
/// wireless interface the system reports.
fn wireless_device(ctx: &FactContext) -> Result<Option<String>, ResolveError> {
    if let Some(port) = wifi_port(ctx)? {
        return Ok(Some(port.device.clone()));
    }
    Ok(ctx.session.wireless_interfaces()?.first().cloned())
}

pub async fn wifipower(ctx: &FactContext) -> FactResult {
    let Some(device) = wireless_device(ctx)? else {
        return Ok(FactValue::Absent);
    };
    Ok(ctx.services.network.wifi_power(&device).await?.into())
}

/// Network the wireless radio is associated with.
pub async fn ssid(ctx: &FactContext) -> FactResult {
    let Some(device) = wireless_device(ctx)? else {
        return Ok(FactValue::Absent);
    };
    Ok(FactValue::optional_text(
        ctx.services.network.current_network(&device).await?,
    ))
}

/// Interface carrying the default route.
pub async fn activenetwork(ctx: &FactContext) -> FactResult {
    Ok(FactValue::optional_text(
        ctx.session.active_interface()?.map(str::to_string),
    ))
}

async fn active_interface(ctx: &FactContext) -> Result<Option<String>, ResolveError> {
    Ok(activenetwork(ctx).await?.as_text().map(str::to_string))
}

pub async fn activemacaddress(ctx: &FactContext) -> FactResult {
    let Some(interface) = active_interface(ctx).await? else {
        return Ok(FactValue::Absent);
    };
    Ok(FactValue::optional_text(
        ctx.services.network.hardware_address(&interface).await?,
    ))
}

pub async fn ipaddress(ctx: &FactContext) -> FactResult {
    let Some(interface) = active_interface(ctx).await? else {
        return Ok(FactValue::Absent);
    };
    Ok(ctx
        .run_line("ipconfig", &["getifaddr", interface.as_str()])
        .await?
        .into())
}

/// Netmask of the active interface as `ifconfig` prints it (`0xffffff00`).
pub async fn subnetmask(ctx: &FactContext) -> FactResult {
    let Some(interface) = active_interface(ctx).await? else {
        return Ok(FactValue::Absent);
    };
    let report = ctx.run_text("ifconfig", &[interface.as_str()]).await?;
    keyed_token(&report, "netmask")
        .map(FactValue::Text)
        .ok_or_else(|| ResolveError::missing_field(format!("ifconfig {interface}"), "netmask"))
}

/// `A.B.C.0/N` for the active interface.
pub async fn cidr(ctx: &FactContext) -> FactResult {
    let address = ipaddress(ctx).await?;
    let mask = subnetmask(ctx).await?;
    let (Some(address), Some(mask)) = (address.as_text(), mask.as_text()) else {
        return Ok(FactValue::Absent);
    };
    Ok(network_cidr(address, mask)?.into())
}

pub async fn defaultgateway(ctx: &FactContext) -> FactResult {
    Ok(FactValue::optional_text(
        ctx.session
            .default_route()?
            .map(|route| route.gateway.clone()),
    ))
}

pub async fn searchdomains(ctx: &FactContext) -> FactResult {
    per_service_lists(ctx, "-getsearchdomains").await
}

pub async fn dnsservers(ctx: &FactContext) -> FactResult {
    per_service_lists(ctx, "-getdnsservers").await
}

/// Run `networksetup <flag> <service>` for every Ethernet or Wi-Fi service.
///
/// A service whose answer is the "nothing configured" sentinel keeps its
/// key with an empty list. Other services are left out. Disabled services
/// are queried too; any failed query fails the fact.
async fn per_service_lists(ctx: &FactContext, flag: &str) -> FactResult {
    let services = ctx.session.network_services()?;
    let mut lists = IndexMap::new();
    for service in services
        .iter()
        .filter(|name| NAME_SERVICE_MARKERS.iter().any(|marker| name.contains(marker)))
    {
        let output = ctx.run_text("networksetup", &[flag, service.as_str()]).await?;
        lists.insert(service.clone(), configured_entries(&output));
    }
    Ok(FactValue::Lists(lists))
}

/// Public address as seen by the configured lookup endpoint.
///
/// A transport failure becomes a diagnostic text value; a response that
/// arrives but is unusable is a resolver failure.
pub async fn externalip(ctx: &FactContext) -> FactResult {
    let url = &ctx.settings.external_ip_url;
    match ctx.services.http.get_json(url).await {
        Ok(body) => body
            .get("ip")
            .and_then(serde_json::Value::as_str)
            .map(FactValue::text)
            .ok_or_else(|| ResolveError::missing_field(url.as_str(), "ip")),
        Err(err) if err.is_transport() => {
            warn!(url = %url, error = %err, "external IP lookup unreachable");
            Ok(FactValue::text(format!("unable to reach {url}: {err}")))
        }
        Err(err) => Err(err.into()),
    }
}
