//! Network prefix derivation from an IPv4 address and a hex subnet mask.
//!
//! The prefix length is the sum of a per-nibble bit weight over the mask
//! string (`f`=4, `e`=3, `c`=2, `8`=1, anything else 0). That sum equals
//! the number of set bits only for left-contiguous masks, so
//! `prefix_length` validates the mask before applying it.

use std::net::Ipv4Addr;

use crate::error::ResolveError;

/// Number of hex digits in an IPv4 mask.
const IPV4_MASK_NIBBLES: usize = 8;

const fn nibble_weight(c: char) -> u32 {
    match c {
        'f' => 4,
        'e' => 3,
        'c' => 2,
        '8' => 1,
        _ => 0,
    }
}

/// Raw weight sum over every character of `mask`, with no validation.
pub fn mask_weight(mask: &str) -> u32 {
    mask.chars().map(nibble_weight).sum()
}

/// Strip an optional `0x` prefix and any dot separators.
fn mask_digits(mask: &str) -> String {
    let trimmed = mask.trim();
    let without_prefix = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    without_prefix
        .chars()
        .filter(|c| *c != '.')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Prefix length of a canonical IPv4 subnet mask such as `0xffffff00`,
/// `ffffff00` or `ff.ff.ff.00`.
///
/// Rejects masks that are not exactly eight hex digits or whose set bits
/// are not left-contiguous.
pub fn prefix_length(mask: &str) -> Result<u32, ResolveError> {
    let malformed = || ResolveError::MalformedMask(mask.to_string());
    let digits = mask_digits(mask);
    if digits.len() != IPV4_MASK_NIBBLES || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(malformed());
    }

    let mut seen_partial = false;
    for c in digits.chars() {
        match (seen_partial, c) {
            (false, 'f') => {}
            (false, 'e' | 'c' | '8' | '0') => seen_partial = true,
            (true, '0') => {}
            _ => return Err(malformed()),
        }
    }

    Ok(mask_weight(&digits))
}

/// `A.B.C.0/N` for the first three octets of `ip` and the prefix length
/// of `mask`. The fourth octet is always `0`.
pub fn network_cidr(ip: &str, mask: &str) -> Result<String, ResolveError> {
    let addr: Ipv4Addr = ip
        .trim()
        .parse()
        .map_err(|_| ResolveError::unexpected("ipaddress", format!("'{ip}' is not IPv4")))?;
    let prefix = prefix_length(mask)?;
    let [a, b, c, _] = addr.octets();
    Ok(format!("{a}.{b}.{c}.0/{prefix}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_sum_matches_per_nibble_table() {
        assert_eq!(mask_weight("ffffff00"), 24);
        assert_eq!(mask_weight("fffffe00"), 23);
        assert_eq!(mask_weight("fffffc00"), 22);
        assert_eq!(mask_weight("ffffff80"), 25);
        assert_eq!(mask_weight("ffff0000"), 16);
    }

    #[test]
    fn raw_weight_ignores_unknown_characters() {
        // Non-canonical nibbles contribute nothing.
        assert_eq!(mask_weight("0xff.ff.a0.00"), 16);
    }

    #[test]
    fn prefix_accepts_ifconfig_and_dotted_forms() {
        assert_eq!(prefix_length("0xffffff00").unwrap(), 24);
        assert_eq!(prefix_length("ff.ff.ff.00").unwrap(), 24);
        assert_eq!(prefix_length("FFFFFFF0").unwrap(), 28);
        assert_eq!(prefix_length("00000000").unwrap(), 0);
        assert_eq!(prefix_length("ffffffff").unwrap(), 32);
    }

    #[test]
    fn prefix_agrees_with_bit_count_for_every_canonical_mask() {
        for bits in 0..=32u32 {
            let mask = if bits == 0 { 0 } else { u32::MAX << (32 - bits) };
            let hex = format!("{mask:08x}");
            assert_eq!(prefix_length(&hex).unwrap(), bits, "mask {hex}");
        }
    }

    #[test]
    fn non_contiguous_masks_are_rejected() {
        assert!(matches!(
            prefix_length("ff00ff00"),
            Err(ResolveError::MalformedMask(_))
        ));
        assert!(prefix_length("fffffa00").is_err());
        assert!(prefix_length("fffffe08").is_err());
    }

    #[test]
    fn bad_alphabet_and_length_are_rejected() {
        assert!(prefix_length("ffffzz00").is_err());
        assert!(prefix_length("ffffff").is_err());
        assert!(prefix_length("").is_err());
    }

    #[test]
    fn cidr_forces_last_octet_to_zero() {
        assert_eq!(
            network_cidr("192.168.1.23", "0xffffff00").unwrap(),
            "192.168.1.0/24"
        );
        assert_eq!(network_cidr("10.0.0.5", "fffffe00").unwrap(), "10.0.0.0/23");
        // The fourth octet is zeroed even when the prefix is longer than 24.
        assert_eq!(
            network_cidr("172.16.4.77", "ffffffc0").unwrap(),
            "172.16.4.0/26"
        );
    }

    #[test]
    fn cidr_rejects_non_ipv4_addresses() {
        assert!(matches!(
            network_cidr("fe80::1", "ffffff00"),
            Err(ResolveError::Unexpected { .. })
        ));
    }
}
