//! Core merge types: log entries, gap markers, per-file info.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::color::Palette;
use crate::merge::format_duration;

// ── Source File ───────────────────────────────────────────────

/// One input file: display name plus raw content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl SourceFile {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }

    /// Use the final path component as the filename.
    pub fn from_path(path: impl AsRef<Path>, bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(file_name_of(path.as_ref()), bytes)
    }
}

/// Final component of `path`, or the whole path when it has none.
pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

// ── Log Entry ─────────────────────────────────────────────────

/// One logical log record, possibly spanning several physical lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Milliseconds since the Unix epoch. `None` when the captured text
    /// could not be parsed under the configured time format.
    pub timestamp: Option<i64>,
    /// Timestamp text exactly as captured.
    pub time_text: String,
    /// The matching line plus any continuation lines, joined by `\n`.
    pub content: String,
    /// Filename this entry came from.
    pub source_file: String,
    /// Position of the source file in selection order.
    pub file_index: usize,
}

impl LogEntry {
    /// Number of physical lines in `content`.
    pub fn line_count(&self) -> usize {
        self.content.split('\n').count()
    }
}

// ── Gap Marker ────────────────────────────────────────────────

/// A period without activity between two adjacent entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapMarker {
    pub duration_ms: i64,
    pub formatted_duration: String,
}

impl GapMarker {
    pub fn new(duration_ms: i64) -> Self {
        Self {
            duration_ms,
            formatted_duration: format_duration(duration_ms),
        }
    }
}

// ── Merge Item ────────────────────────────────────────────────

/// An element of the merged sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MergeItem {
    Entry(LogEntry),
    Gap(GapMarker),
}

impl MergeItem {
    pub fn as_entry(&self) -> Option<&LogEntry> {
        match self {
            Self::Entry(entry) => Some(entry),
            Self::Gap(_) => None,
        }
    }

    pub fn as_gap(&self) -> Option<&GapMarker> {
        match self {
            Self::Entry(_) => None,
            Self::Gap(gap) => Some(gap),
        }
    }
}

// ── File Info ─────────────────────────────────────────────────

/// A successfully parsed input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileInfo {
    pub filename: String,
    /// Selection position; fixes the palette slot for the file's lifetime.
    pub file_index: usize,
    pub color: String,
    pub entries: Vec<LogEntry>,
}

impl FileInfo {
    pub fn new(filename: impl Into<String>, file_index: usize, palette: &Palette) -> Self {
        Self {
            filename: filename.into(),
            file_index,
            color: palette.color_for(file_index).to_string(),
            entries: Vec::new(),
        }
    }

    pub fn with_entries(mut self, entries: Vec<LogEntry>) -> Self {
        self.entries = entries;
        self
    }

    /// Swap to another palette, keeping the same slot.
    pub fn recolor(&mut self, palette: &Palette) {
        self.color = palette.color_for(self.file_index).to_string();
    }
}

// ── Prefix Style ──────────────────────────────────────────────

/// How each rendered entry is marked with its source file.
///
/// Unrecognized names fall back to `Full`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum PrefixStyle {
    /// `[api-server.log] `
    Full,
    /// `[api-server] `
    #[default]
    Short,
    /// `[ASL] `
    Initial,
}

impl From<&str> for PrefixStyle {
    fn from(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "short" => Self::Short,
            "initial" => Self::Initial,
            _ => Self::Full,
        }
    }
}

impl From<String> for PrefixStyle {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

// ── Theme ─────────────────────────────────────────────────────

/// Host color theme, selecting the light or dark palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            // High-contrast themes use the dark palette.
            "dark" | "high-contrast" | "high_contrast" => Ok(Self::Dark),
            other => Err(format!("unknown theme: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(content: &str) -> LogEntry {
        LogEntry {
            timestamp: Some(0),
            time_text: String::new(),
            content: content.into(),
            source_file: "a.log".into(),
            file_index: 0,
        }
    }

    #[test]
    fn source_file_name_from_path() {
        let source = SourceFile::from_path("/var/log/app/api-server.log", b"x".to_vec());
        assert_eq!(source.filename, "api-server.log");
    }

    #[test]
    fn entry_line_count_includes_continuations() {
        assert_eq!(entry("one").line_count(), 1);
        assert_eq!(entry("one\n  at two\n  at three").line_count(), 3);
    }

    #[test]
    fn gap_marker_formats_duration() {
        let gap = GapMarker::new(35_000);
        assert_eq!(gap.formatted_duration, "35s");
    }

    #[test]
    fn prefix_style_unknown_falls_back_to_full() {
        assert_eq!(PrefixStyle::from("short"), PrefixStyle::Short);
        assert_eq!(PrefixStyle::from("INITIAL"), PrefixStyle::Initial);
        assert_eq!(PrefixStyle::from("full"), PrefixStyle::Full);
        assert_eq!(PrefixStyle::from("fancy"), PrefixStyle::Full);
    }

    #[test]
    fn prefix_style_deserializes_leniently() {
        let style: PrefixStyle = serde_json::from_str(r#""initial""#).unwrap();
        assert_eq!(style, PrefixStyle::Initial);
        let style: PrefixStyle = serde_json::from_str(r#""whatever""#).unwrap();
        assert_eq!(style, PrefixStyle::Full);
    }

    #[test]
    fn merge_item_serializes_tagged() {
        let json = serde_json::to_value(MergeItem::Gap(GapMarker::new(61_000))).unwrap();
        assert_eq!(json["kind"], "gap");
        assert_eq!(json["duration_ms"], 61_000);
        assert_eq!(json["formatted_duration"], "1m 1s");
    }

    #[test]
    fn theme_parses_high_contrast_as_dark() {
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!("high-contrast".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!("Light".parse::<Theme>().unwrap(), Theme::Light);
        assert!("sepia".parse::<Theme>().is_err());
    }
}
