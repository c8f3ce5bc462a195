//! Display geometry from `system_profiler`.

use std::sync::Arc;

use async_trait::async_trait;
use hostfacts_core::ports::command_runner::command_line;
use hostfacts_core::ports::{CommandRunner, DisplayError, DisplayProbe};
use serde::Deserialize;

const PROGRAM: &str = "system_profiler";
const ARGS: &[&str] = &["SPDisplaysDataType", "-json"];
const MAIN_DISPLAY_FLAG: &str = "spdisplays_yes";

#[derive(Debug, Deserialize)]
struct DisplayReport {
    #[serde(rename = "SPDisplaysDataType", default)]
    adapters: Vec<Adapter>,
}

#[derive(Debug, Deserialize)]
struct Adapter {
    #[serde(rename = "spdisplays_ndrvs", default)]
    displays: Vec<Display>,
}

#[derive(Debug, Deserialize)]
struct Display {
    #[serde(rename = "_spdisplays_pixels")]
    pixels: Option<String>,
    #[serde(rename = "spdisplays_main")]
    main: Option<String>,
}

/// Reads the main display's pixel size from the JSON display report.
#[derive(Clone)]
pub struct SystemProfilerDisplay {
    commands: Arc<dyn CommandRunner>,
}

impl SystemProfilerDisplay {
    pub fn new(commands: Arc<dyn CommandRunner>) -> Self {
        Self { commands }
    }
}

#[async_trait]
impl DisplayProbe for SystemProfilerDisplay {
    async fn main_display_size(&self) -> Result<Option<(i64, i64)>, DisplayError> {
        let output = self
            .commands
            .run(PROGRAM, ARGS)
            .await
            .and_then(|output| output.into_stdout(&command_line(PROGRAM, ARGS)))
            .map_err(|e| DisplayError::Query(e.to_string()))?;
        main_display_size(&output)
    }
}

/// Pixel size of the display flagged as main, else of the first display.
pub fn main_display_size(report: &[u8]) -> Result<Option<(i64, i64)>, DisplayError> {
    let report: DisplayReport =
        serde_json::from_slice(report).map_err(|e| DisplayError::Parse(e.to_string()))?;
    let displays: Vec<&Display> = report
        .adapters
        .iter()
        .flat_map(|adapter| &adapter.displays)
        .collect();

    let chosen = displays
        .iter()
        .find(|display| display.main.as_deref() == Some(MAIN_DISPLAY_FLAG))
        .or_else(|| displays.first());

    chosen
        .and_then(|display| display.pixels.as_deref())
        .map(parse_pixels)
        .transpose()
}

/// `"3024 x 1964"` → `(3024, 1964)`.
fn parse_pixels(pixels: &str) -> Result<(i64, i64), DisplayError> {
    let malformed = || DisplayError::Parse(format!("pixel size '{pixels}'"));
    let (width, height) = pixels.split_once('x').ok_or_else(malformed)?;
    let height = height.split_whitespace().next().ok_or_else(malformed)?;
    Ok((
        width.trim().parse().map_err(|_| malformed())?,
        height.parse().map_err(|_| malformed())?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = r#"{
  "SPDisplaysDataType" : [
    {
      "_name" : "Apple M1 Pro",
      "spdisplays_ndrvs" : [
        {
          "_name" : "DELL U2720Q",
          "_spdisplays_pixels" : "3840 x 2160",
          "_spdisplays_resolution" : "1920 x 1080 @ 60.00Hz"
        },
        {
          "_name" : "Color LCD",
          "_spdisplays_pixels" : "3024 x 1964",
          "spdisplays_main" : "spdisplays_yes"
        }
      ]
    }
  ]
}"#;

    #[test]
    fn main_display_wins() {
        assert_eq!(main_display_size(REPORT.as_bytes()).unwrap(), Some((3024, 1964)));
    }

    #[test]
    fn headless_report_has_no_size() {
        let report = r#"{"SPDisplaysDataType":[{"_name":"Apple M2"}]}"#;
        assert_eq!(main_display_size(report.as_bytes()).unwrap(), None);
    }

    #[test]
    fn pixel_suffixes_are_ignored() {
        assert_eq!(parse_pixels("2560 x 1600 Retina").unwrap(), (2560, 1600));
        assert!(parse_pixels("unknown").is_err());
    }
}
