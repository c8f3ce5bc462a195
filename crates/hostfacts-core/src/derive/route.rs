//! Routing-table scraping.

use crate::domain::DefaultRoute;

/// Destination token of the default route row.
const DEFAULT_DESTINATION: &str = "default";

/// Tunnel interfaces never count as the active network.
const TUNNEL_PREFIX: &str = "utun";

/// Column of the interface name when no header line is present
/// (`Destination Gateway Flags Netif Expire`).
const FALLBACK_NETIF_COLUMN: usize = 3;

/// Extract the first non-tunnel default route from `netstat -rn` output.
///
/// The interface column is located from the `Netif` header when one is
/// present, since older releases insert `Refs`/`Use` columns before it.
/// Rows mentioning a `utun` interface anywhere are skipped even when their
/// destination is `default`.
pub fn parse_default_route(table: &str) -> Option<DefaultRoute> {
    let mut netif_column = FALLBACK_NETIF_COLUMN;

    for line in table.lines() {
        let columns: Vec<&str> = line.split_whitespace().collect();
        if let Some(position) = columns.iter().position(|c| *c == "Netif")
            && columns.first() == Some(&"Destination")
        {
            netif_column = position;
            continue;
        }
        if columns.first() != Some(&DEFAULT_DESTINATION) {
            continue;
        }
        if line.contains(TUNNEL_PREFIX) {
            continue;
        }
        let (Some(gateway), Some(interface)) = (columns.get(1), columns.get(netif_column)) else {
            continue;
        };
        return Some(DefaultRoute {
            gateway: (*gateway).to_string(),
            interface: (*interface).to_string(),
        });
    }

    None
}
