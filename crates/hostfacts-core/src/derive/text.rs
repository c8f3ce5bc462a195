//! Line- and token-oriented scraping helpers.

/// Prefix shared by `networksetup`'s "nothing configured" answers, e.g.
/// `There aren't any Search Domains set on Wi-Fi.`
pub const NONE_CONFIGURED_PREFIX: &str = "There aren't any";

/// First non-empty line, trimmed.
pub fn first_line(text: &str) -> Option<&str> {
    text.lines().map(str::trim).find(|line| !line.is_empty())
}

/// Non-empty trimmed lines with the "nothing configured" sentinel removed.
pub fn configured_entries(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(NONE_CONFIGURED_PREFIX))
        .map(str::to_string)
        .collect()
}

/// Token following `key` in `ifconfig`-style output
/// (`ether 3c:22:fb:00:11:22`, `netmask 0xffffff00`).
pub fn keyed_token(text: &str, key: &str) -> Option<String> {
    let mut tokens = text.split_whitespace();
    while let Some(token) = tokens.next() {
        if token == key {
            return tokens.next().map(str::to_string);
        }
    }
    None
}

/// Whether `token` appears as a whole whitespace-separated word.
pub fn has_token(text: &str, token: &str) -> bool {
    text.split_whitespace().any(|word| word == token)
}

/// Text between the first pair of single quotes.
pub fn single_quoted(text: &str) -> Option<&str> {
    let start = text.find('\'')? + 1;
    let len = text[start..].find('\'')?;
    Some(&text[start..start + len])
}

/// Time zone name from the `/etc/localtime` symlink target.
pub fn zone_from_link(target: &str) -> Option<String> {
    let (_, zone) = target.trim().split_once("zoneinfo/")?;
    (!zone.is_empty()).then(|| zone.to_string())
}

/// Leading integer component of a dotted version string.
pub fn major_version(version: &str) -> Option<i64> {
    version.trim().split('.').next()?.parse().ok()
}
