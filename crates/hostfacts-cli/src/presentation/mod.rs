//! Output rendering.
//!
//! Format-only: values arrive fully resolved from the registry.

use hostfacts_core::{FactValue, Snapshot};

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub const fn from_json_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Text }
    }
}

/// One fact's value.
pub fn render_value(value: &FactValue, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(value.to_string()),
        OutputFormat::Json => serde_json::to_string(value),
    }
}

/// Registered names, one per line, or a JSON array.
pub fn render_names(names: &[&str], format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(names.join("\n")),
        OutputFormat::Json => serde_json::to_string_pretty(names),
    }
}

/// Every fact as `name => value`, or a JSON object keyed by name.
///
/// Failed facts render as `<failed: reason>` in text and as
/// `{"error": "reason"}` in JSON.
pub fn render_snapshot(snapshot: &Snapshot, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(snapshot
            .iter()
            .map(|(name, entry)| format!("{name} => {entry}"))
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => serde_json::to_string_pretty(snapshot),
    }
}

/// One-line summary of failed facts, if any.
pub fn failure_summary(snapshot: &Snapshot) -> Option<String> {
    let failures = snapshot.failures();
    if failures.is_empty() {
        return None;
    }
    let names: Vec<&str> = failures.iter().map(|(name, _)| *name).collect();
    Some(format!(
        "{} of {} facts failed: {}",
        failures.len(),
        snapshot.len(),
        names.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> Snapshot {
        let mut snapshot = Snapshot::new();
        snapshot.record_value("uid", FactValue::Integer(501));
        snapshot.record_failure("ssid", "networksetup timed out");
        snapshot.record_value("lang", FactValue::Absent);
        snapshot
    }

    #[test]
    fn text_snapshot_is_sorted_arrow_lines() {
        assert_eq!(
            render_snapshot(&snapshot(), OutputFormat::Text).unwrap(),
            "lang => None\nssid => <failed: networksetup timed out>\nuid => 501"
        );
    }

    #[test]
    fn multi_line_stderr_keeps_one_line_per_fact() {
        let mut snapshot = snapshot();
        snapshot.record_failure("sipstatus", "csrutil: line one\nline two");
        let text = render_snapshot(&snapshot, OutputFormat::Text).unwrap();

        assert_eq!(text.lines().count(), 4);
        assert!(text.lines().all(|line| line.contains(" => ")));
        assert!(text.contains("sipstatus => <failed: csrutil: line one; line two>"));
    }

    #[test]
    fn json_snapshot_marks_failures() {
        let json = render_snapshot(&snapshot(), OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["uid"], 501);
        assert!(parsed["lang"].is_null());
        assert_eq!(parsed["ssid"]["error"], "networksetup timed out");
    }

    #[test]
    fn summary_names_failed_facts() {
        assert_eq!(
            failure_summary(&snapshot()).as_deref(),
            Some("1 of 3 facts failed: ssid")
        );
        assert_eq!(failure_summary(&Snapshot::new()), None);
    }

    #[test]
    fn json_value_is_bare() {
        assert_eq!(
            render_value(&FactValue::text("en0"), OutputFormat::Json).unwrap(),
            "\"en0\""
        );
        assert_eq!(
            render_value(&FactValue::Boolean(true), OutputFormat::Text).unwrap(),
            "true"
        );
    }
}
