//! Resolved merge configuration.
//!
//! Keys are snake_case; the camelCase names used by editor settings are
//! accepted as aliases so an exported settings block can be reused as is.

use serde::{Deserialize, Serialize};

use crate::merge::InvalidTimestampPolicy;
use crate::types::PrefixStyle;

pub const DEFAULT_TIME_FORMAT: &str = "YYYY-MM-DD HH:mm:ss,SSS";
pub const DEFAULT_TIME_REGEX: &str = r"(\d{4}-\d{2}-\d{2}\s\d{2}:\d{2}:\d{2}(?:,\d{3})?)";

/// Which rendered lines are registered in the line map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineMapping {
    /// Only the first physical line of each entry; the content counter
    /// advances by one per entry, as editor integrations expect.
    #[default]
    FirstLine,
    /// Every physical line of each entry.
    PhysicalLines,
}

/// Options for one merge invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergerConfig {
    /// Time pattern, strftime (`%Y-%m-%d`) or moment-style (`YYYY-MM-DD`).
    #[serde(default = "default_time_format", alias = "timeFormat")]
    pub time_format: String,
    /// Regex whose first capture group is the timestamp text.
    #[serde(default = "default_time_regex", alias = "timeRegex")]
    pub time_regex: String,
    #[serde(default = "default_true", alias = "showTimeGaps")]
    pub show_time_gaps: bool,
    #[serde(
        default = "default_gap_threshold",
        alias = "timeGapThresholdSeconds",
        alias = "timeGapThreshold"
    )]
    pub time_gap_threshold_seconds: f64,
    #[serde(default = "default_true", alias = "showFilePrefix")]
    pub show_file_prefix: bool,
    #[serde(default, alias = "filePrefixType")]
    pub file_prefix_type: PrefixStyle,
    #[serde(default = "default_palette", alias = "colorPalette")]
    pub color_palette: Vec<String>,
    #[serde(
        default = "default_dark_palette",
        alias = "darkColorPalette",
        alias = "darkThemeColorPalette"
    )]
    pub dark_color_palette: Option<Vec<String>>,
    #[serde(default, alias = "invalidTimestamps")]
    pub invalid_timestamps: InvalidTimestampPolicy,
    #[serde(default, alias = "lineMapping")]
    pub line_mapping: LineMapping,
}

fn default_time_format() -> String {
    DEFAULT_TIME_FORMAT.to_string()
}

fn default_time_regex() -> String {
    DEFAULT_TIME_REGEX.to_string()
}

fn default_true() -> bool {
    true
}

fn default_gap_threshold() -> f64 {
    60.0
}

fn default_palette() -> Vec<String> {
    [
        "rgba(255, 99, 71, 0.15)",
        "rgba(65, 105, 225, 0.15)",
        "rgba(50, 205, 50, 0.15)",
        "rgba(255, 165, 0, 0.15)",
        "rgba(186, 85, 211, 0.15)",
        "rgba(0, 206, 209, 0.15)",
        "rgba(255, 215, 0, 0.15)",
        "rgba(199, 21, 133, 0.15)",
    ]
    .iter()
    .map(|c| c.to_string())
    .collect()
}

fn default_dark_palette() -> Option<Vec<String>> {
    Some(
        [
            "rgba(255, 99, 71, 0.25)",
            "rgba(100, 149, 237, 0.25)",
            "rgba(50, 205, 50, 0.25)",
            "rgba(255, 165, 0, 0.25)",
            "rgba(218, 112, 214, 0.25)",
            "rgba(64, 224, 208, 0.25)",
            "rgba(255, 215, 0, 0.25)",
            "rgba(255, 105, 180, 0.25)",
        ]
        .iter()
        .map(|c| c.to_string())
        .collect(),
    )
}

impl MergerConfig {
    /// Gap threshold in milliseconds, or `None` when it is not a finite number.
    pub fn gap_threshold_ms(&self) -> Option<i64> {
        let seconds = self.time_gap_threshold_seconds;
        seconds.is_finite().then(|| (seconds * 1000.0).round() as i64)
    }
}

impl Default for MergerConfig {
    fn default() -> Self {
        Self {
            time_format: default_time_format(),
            time_regex: default_time_regex(),
            show_time_gaps: true,
            time_gap_threshold_seconds: default_gap_threshold(),
            show_file_prefix: true,
            file_prefix_type: PrefixStyle::default(),
            color_palette: default_palette(),
            dark_color_palette: default_dark_palette(),
            invalid_timestamps: InvalidTimestampPolicy::default(),
            line_mapping: LineMapping::default(),
        }
    }
}
