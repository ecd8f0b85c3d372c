//! Shared test harness for E2E integration tests.
//!
//! Wraps a configured `LogMerger` with a fixed generation time so rendered
//! documents are reproducible across runs.

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};

use lm_core::render::header_line_count;
use lm_core::{LogMerger, MergeReport, MergerConfig, MockLogSource, SourceFile, Theme};

/// Merger plus a mock source, pinned to 2024-01-15 13:00:00.
pub struct TestHarness {
    pub merger: LogMerger,
    pub source: MockLogSource,
    pub generated_at: NaiveDateTime,
}

impl TestHarness {
    /// Default configuration, with the two-service sample loaded.
    pub fn with_service_pair() -> Self {
        Self::with_config(MergerConfig::default(), MockLogSource::with_service_pair())
    }

    /// Default configuration, no mock files.
    pub fn empty() -> Self {
        Self::with_config(MergerConfig::default(), MockLogSource::new())
    }

    pub fn with_config(config: MergerConfig, source: MockLogSource) -> Self {
        Self {
            merger: LogMerger::from_config(&config).expect("valid test config"),
            source,
            generated_at: NaiveDate::from_ymd_opt(2024, 1, 15)
                .and_then(|d| d.and_hms_opt(13, 0, 0))
                .expect("valid date"),
        }
    }

    /// Merge in-memory `(filename, content)` pairs.
    pub fn merge(&self, files: &[(&str, &str)]) -> MergeReport {
        let sources: Vec<SourceFile> = files
            .iter()
            .map(|(name, content)| SourceFile::new(*name, *content))
            .collect();
        self.merger.run(&sources, Theme::Light, self.generated_at)
    }

    /// Merge paths read through the mock source.
    pub async fn merge_paths(&self, paths: &[&str], theme: Theme) -> MergeReport {
        let paths: Vec<String> = paths.iter().map(|p| p.to_string()).collect();
        self.merger
            .run_from_source(&self.source, &paths, theme, self.generated_at)
            .await
    }
}

/// Rendered lines after the header.
pub fn content_lines(report: &MergeReport) -> Vec<&str> {
    report
        .text
        .lines()
        .skip(header_line_count(report.files.len()))
        .collect()
}

/// `HH:MM:SS`-only config on an anchored regex, for compact fixtures.
pub fn clock_config(threshold_seconds: f64) -> MergerConfig {
    MergerConfig {
        time_format: "HH:mm:ss".into(),
        time_regex: r"^(\d{2}:\d{2}:\d{2})".into(),
        time_gap_threshold_seconds: threshold_seconds,
        ..MergerConfig::default()
    }
}
