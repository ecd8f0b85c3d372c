//! Entry parser: raw file content → timestamped, possibly multi-line entries.
//!
//! A line starts a new entry when the time regex matches it; its first
//! capture group is the timestamp text. Non-matching lines are continuations
//! of the open entry (stack traces, wrapped messages). Blank lines are
//! dropped, and lines before the first match have nothing to attach to.

use regex::Regex;

use crate::error::{FileFailure, MergeError, MergeResult};
use crate::time_format::TimeFormat;
use crate::types::LogEntry;

/// Splits log text into [`LogEntry`] values.
#[derive(Debug, Clone)]
pub struct EntryParser {
    time_regex: Regex,
    time_format: TimeFormat,
}

impl EntryParser {
    /// Compile `time_regex`, which must contain at least one capture group.
    pub fn new(time_regex: &str, time_format: TimeFormat) -> MergeResult<Self> {
        let regex = Regex::new(time_regex).map_err(|e| MergeError::InvalidRegex {
            pattern: time_regex.to_string(),
            message: e.to_string(),
        })?;

        // captures_len counts the implicit whole-match group
        match regex.captures_len() {
            0 | 1 => return Err(MergeError::MissingCaptureGroup(time_regex.to_string())),
            2 => {}
            groups => tracing::warn!(
                pattern = time_regex,
                groups = groups - 1,
                "time regex has several capture groups; using the first"
            ),
        }

        Ok(Self {
            time_regex: regex,
            time_format,
        })
    }

    /// Decode `bytes` as UTF-8 and parse them.
    pub fn parse(
        &self,
        bytes: &[u8],
        filename: &str,
        file_index: usize,
    ) -> Result<Vec<LogEntry>, FileFailure> {
        let text =
            std::str::from_utf8(bytes).map_err(|e| FileFailure::new(filename, e.to_string()))?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        Ok(self.parse_text(text, filename, file_index))
    }

    /// Parse already-decoded text.
    pub fn parse_text(&self, text: &str, filename: &str, file_index: usize) -> Vec<LogEntry> {
        let mut entries = Vec::new();
        let mut current: Option<LogEntry> = None;
        let mut orphan_lines = 0usize;
        let mut invalid_timestamps = 0usize;

        for line in text.lines() {
            if line.trim().is_empty() {
                continue;
            }

            if let Some(caps) = self.time_regex.captures(line) {
                if let Some(done) = current.take() {
                    entries.push(done);
                }

                let time_text = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
                let timestamp = if time_text.is_empty() {
                    None
                } else {
                    self.time_format.parse_millis(time_text)
                };
                if timestamp.is_none() {
                    invalid_timestamps += 1;
                }

                current = Some(LogEntry {
                    timestamp,
                    time_text: time_text.to_string(),
                    content: line.to_string(),
                    source_file: filename.to_string(),
                    file_index,
                });
            } else if let Some(entry) = current.as_mut() {
                entry.content.push('\n');
                entry.content.push_str(line);
            } else {
                orphan_lines += 1;
            }
        }

        if let Some(done) = current {
            entries.push(done);
        }

        if invalid_timestamps > 0 {
            tracing::warn!(
                file = filename,
                invalid_timestamps,
                time_format = self.time_format.source(),
                strftime = self.time_format.strftime(),
                "timestamps did not parse under the configured format"
            );
        }
        tracing::debug!(
            file = filename,
            entries = entries.len(),
            orphan_lines,
            "parsed log file"
        );

        entries
    }
}
