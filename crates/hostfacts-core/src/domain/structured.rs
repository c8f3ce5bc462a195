//! Decoded property-list trees.
//!
//! `Structured` is the core's view of whatever the `PlistDecoder` port
//! produced. It carries no dependency on a particular plist library so
//! resolvers can be tested against hand-built trees.

use std::collections::BTreeMap;

/// A node in a decoded property list.
#[derive(Debug, Clone, PartialEq)]
pub enum Structured {
    Dict(BTreeMap<String, Structured>),
    Array(Vec<Structured>),
    String(String),
    Integer(i64),
    Real(f64),
    Boolean(bool),
    Data(Vec<u8>),
    /// Dates are kept in their textual (RFC 3339) form.
    Date(String),
}

impl Structured {
    /// Look up a key when this node is a dictionary.
    pub fn get(&self, key: &str) -> Option<&Self> {
        match self {
            Self::Dict(map) => map.get(key),
            _ => None,
        }
    }

    /// Borrow the elements when this node is an array.
    pub fn as_array(&self) -> Option<&[Self]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Booleans, plus integers read as zero/non-zero.
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(value) => Some(*value),
            Self::Integer(value) => Some(*value != 0),
            _ => None,
        }
    }

    /// Text content of a string node, or of a data node holding
    /// NUL-padded ASCII (IOKit stores `board-id` and similar this way).
    pub fn text(&self) -> Option<String> {
        match self {
            Self::String(value) => Some(value.clone()),
            Self::Data(bytes) => {
                let end = bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len());
                std::str::from_utf8(&bytes[..end])
                    .ok()
                    .map(|s| s.trim().to_string())
            }
            _ => None,
        }
    }

    /// First element of the child-entry list stored under `key`.
    pub fn first_child(&self, key: &str) -> Option<&Self> {
        self.get(key)?.as_array()?.first()
    }

    /// First dictionary in a top-level array, or the node itself when it is
    /// already a dictionary. `ioreg -r` emits an array of matching entries.
    pub fn first_entry(&self) -> Option<&Self> {
        match self {
            Self::Array(items) => items.iter().find(|item| matches!(item, Self::Dict(_))),
            Self::Dict(_) => Some(self),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict(entries: Vec<(&str, Structured)>) -> Structured {
        Structured::Dict(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    #[test]
    fn data_text_strips_nul_padding() {
        let node = Structured::Data(b"Mac-7BA5B2D9E42DDD94\0\0".to_vec());
        assert_eq!(node.text().as_deref(), Some("Mac-7BA5B2D9E42DDD94"));
    }

    #[test]
    fn first_child_descends_into_child_list() {
        let root = dict(vec![(
            "IORegistryEntryChildren",
            Structured::Array(vec![dict(vec![(
                "IOPlatformSerialNumber",
                Structured::String("C02ABC123".into()),
            )])]),
        )]);
        let child = root.first_child("IORegistryEntryChildren").unwrap();
        assert_eq!(
            child.get("IOPlatformSerialNumber").and_then(Structured::as_str),
            Some("C02ABC123")
        );
    }

    #[test]
    fn first_entry_skips_non_dictionaries() {
        let root = Structured::Array(vec![
            Structured::String("noise".into()),
            dict(vec![("CycleCount", Structured::Integer(42))]),
        ]);
        let entry = root.first_entry().unwrap();
        assert_eq!(entry.get("CycleCount").and_then(Structured::as_i64), Some(42));
        assert!(Structured::Array(vec![]).first_entry().is_none());
    }

    #[test]
    fn as_bool_accepts_integers() {
        assert_eq!(Structured::Integer(0).as_bool(), Some(false));
        assert_eq!(Structured::Integer(3).as_bool(), Some(true));
        assert_eq!(Structured::String("yes".into()).as_bool(), None);
    }
}
