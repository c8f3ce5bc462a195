//! Resolved fact values.

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Device identifier and hardware address of one network service.
pub type InterfaceBinding = (String, String);

/// The value a resolver produced for one fact.
///
/// `Absent` is a legitimate outcome (an unset environment variable, a
/// machine without Wi-Fi) and is distinct from a resolver failure, which is
/// reported through `ResolveError` instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FactValue {
    /// Free-form text.
    Text(String),
    /// Signed integer.
    Integer(i64),
    /// Boolean flag.
    Boolean(bool),
    /// Two numbers, e.g. width and height.
    Pair(i64, i64),
    /// Service name to (device identifier, hardware address), in service
    /// order.
    Interfaces(IndexMap<String, InterfaceBinding>),
    /// Service name to an ordered list of entries, in service order.
    Lists(IndexMap<String, Vec<String>>),
    /// No value obtainable.
    Absent,
}

impl FactValue {
    /// Build a text value.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Map an optional string to `Text` or `Absent`.
    pub fn optional_text(value: Option<String>) -> Self {
        value.map_or(Self::Absent, Self::Text)
    }

    /// Whether this is the `Absent` marker.
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Borrow the text payload, if this is a `Text` value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }
}

impl From<String> for FactValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for FactValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for FactValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for FactValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl fmt::Display for FactValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(value) => f.write_str(value),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Pair(first, second) => write!(f, "({first}, {second})"),
            Self::Interfaces(map) => {
                f.write_str("{")?;
                for (idx, (service, (device, address))) in map.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{service}: ({device}, {address})")?;
                }
                f.write_str("}")
            }
            Self::Lists(map) => {
                f.write_str("{")?;
                for (idx, (service, entries)) in map.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{service}: [{}]", entries.join(", "))?;
                }
                f.write_str("}")
            }
            Self::Absent => f.write_str("None"),
        }
    }
}
