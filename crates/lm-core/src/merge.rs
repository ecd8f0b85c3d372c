//! Chronological merge of per-file entries with gap detection.

use serde::{Deserialize, Serialize};

use crate::types::{FileInfo, GapMarker, LogEntry, MergeItem};

/// Where entries whose timestamp failed to parse end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidTimestampPolicy {
    /// Before every valid entry.
    First,
    /// After every valid entry.
    #[default]
    Last,
    /// Left out of the merge.
    Drop,
}

/// Merge behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOptions {
    pub show_time_gaps: bool,
    /// Gaps strictly longer than this are reported. Negative values act as 0.
    pub gap_threshold_ms: i64,
    pub invalid_timestamps: InvalidTimestampPolicy,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            show_time_gaps: true,
            gap_threshold_ms: 60_000,
            invalid_timestamps: InvalidTimestampPolicy::default(),
        }
    }
}

/// Concatenate the entries of `files` in selection order, then merge.
pub fn merge_files(files: &[FileInfo], options: &MergeOptions) -> Vec<MergeItem> {
    let entries = files.iter().flat_map(|f| f.entries.iter().cloned()).collect();
    merge_entries(entries, options)
}

/// Stable-sort `entries` by timestamp and insert gap markers.
///
/// Ties keep their input order, so same-timestamp entries stay in selection
/// order, then file order.
pub fn merge_entries(mut entries: Vec<LogEntry>, options: &MergeOptions) -> Vec<MergeItem> {
    match options.invalid_timestamps {
        // None < Some(_) for Option
        InvalidTimestampPolicy::First => entries.sort_by_key(|e| e.timestamp),
        InvalidTimestampPolicy::Last => entries.sort_by_key(|e| (e.timestamp.is_none(), e.timestamp)),
        InvalidTimestampPolicy::Drop => {
            entries.retain(|e| e.timestamp.is_some());
            entries.sort_by_key(|e| e.timestamp);
        }
    }

    let threshold = options.gap_threshold_ms.max(0);
    let mut merged = Vec::with_capacity(entries.len());
    let mut previous: Option<i64> = None;

    for entry in entries {
        if options.show_time_gaps {
            if let (Some(prev), Some(current)) = (previous, entry.timestamp) {
                let delta = current - prev;
                if delta > threshold {
                    merged.push(MergeItem::Gap(GapMarker::new(delta)));
                }
            }
        }
        previous = entry.timestamp;
        merged.push(MergeItem::Entry(entry));
    }

    merged
}

/// Human-readable duration: largest nonzero unit first, then every smaller
/// unit down to seconds (`35s`, `1m 5s`, `2h 0m 5s`, `1d 0h 0m 0s`).
pub fn format_duration(milliseconds: i64) -> String {
    let seconds = milliseconds / 1000;
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if days > 0 {
        format!("{days}d {}h {}m {}s", hours % 24, minutes % 60, seconds % 60)
    } else if hours > 0 {
        format!("{hours}h {}m {}s", minutes % 60, seconds % 60)
    } else if minutes > 0 {
        format!("{minutes}m {}s", seconds % 60)
    } else {
        format!("{seconds}s")
    }
}
