//! Snapshot of every resolved fact.

use serde::Serialize;
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

use crate::domain::FactValue;

/// Outcome of one resolver within a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SnapshotEntry {
    Value(FactValue),
    /// The resolver failed; the run continued past it.
    Failed { error: String },
}

impl SnapshotEntry {
    pub const fn value(&self) -> Option<&FactValue> {
        match self {
            Self::Value(value) => Some(value),
            Self::Failed { .. } => None,
        }
    }

    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

impl fmt::Display for SnapshotEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => value.fmt(f),
            Self::Failed { error } => write!(f, "<failed: {error}>"),
        }
    }
}

/// Fact name to outcome, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Snapshot {
    entries: BTreeMap<String, SnapshotEntry>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_value(&mut self, name: impl Into<String>, value: FactValue) {
        self.entries.insert(name.into(), SnapshotEntry::Value(value));
    }

    /// Record a failed fact. Multi-line messages (command stderr) are
    /// folded onto one line joined by `; `.
    pub fn record_failure(&mut self, name: impl Into<String>, error: impl fmt::Display) {
        self.entries.insert(
            name.into(),
            SnapshotEntry::Failed {
                error: single_line(&error.to_string()),
            },
        );
    }

    pub fn get(&self, name: &str) -> Option<&SnapshotEntry> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in name order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, SnapshotEntry> {
        self.entries.iter()
    }

    /// Names and messages of the facts that failed, in name order.
    pub fn failures(&self) -> Vec<(&str, &str)> {
        self.entries
            .iter()
            .filter_map(|(name, entry)| match entry {
                SnapshotEntry::Failed { error } => Some((name.as_str(), error.as_str())),
                SnapshotEntry::Value(_) => None,
            })
            .collect()
    }
}

fn single_line(message: &str) -> String {
    message
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = (&'a String, &'a SnapshotEntry);
    type IntoIter = btree_map::Iter<'a, String, SnapshotEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iteration_is_name_ordered_regardless_of_insertion() {
        let mut snapshot = Snapshot::new();
        snapshot.record_value("uid", FactValue::Integer(501));
        snapshot.record_failure("batterycyclecount", "no battery");
        snapshot.record_value("architecture", FactValue::text("arm64"));

        let names: Vec<&str> = snapshot.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, ["architecture", "batterycyclecount", "uid"]);
    }

    #[test]
    fn failures_are_listed() {
        let mut snapshot = Snapshot::new();
        snapshot.record_value("shell", FactValue::Absent);
        snapshot.record_failure("serialnumber", "ioreg failed");
        assert_eq!(snapshot.failures(), vec![("serialnumber", "ioreg failed")]);
        assert!(!snapshot.get("shell").unwrap().is_failed());
    }

    #[test]
    fn serializes_as_flat_object() {
        let mut snapshot = Snapshot::new();
        snapshot.record_value("cpucores", FactValue::Integer(10));
        snapshot.record_failure("externalip", "HTTP status 503");
        assert_eq!(
            serde_json::to_string(&snapshot).unwrap(),
            r#"{"cpucores":10,"externalip":{"error":"HTTP status 503"}}"#
        );
    }

    #[test]
    fn multi_line_failure_stays_on_one_line() {
        let mut snapshot = Snapshot::new();
        snapshot.record_failure(
            "sipstatus",
            "csrutil status exited with 1: line one\r\n\nline two\n",
        );
        let rendered = snapshot.get("sipstatus").unwrap().to_string();
        assert_eq!(
            rendered,
            "<failed: csrutil status exited with 1: line one; line two>"
        );
        assert_eq!(rendered.lines().count(), 1);
    }

    #[test]
    fn failed_entry_display_is_marked() {
        let entry = SnapshotEntry::Failed {
            error: "timed out".into(),
        };
        assert_eq!(entry.to_string(), "<failed: timed out>");
    }
}
