//! E2E tests for chronological ordering and gap detection across files.

mod helpers;

use helpers::{TestHarness, clock_config, content_lines};
use lm_core::{InvalidTimestampPolicy, MergeItem, MergerConfig, MockLogSource, Theme};

fn entry_contents(report: &lm_core::MergeReport) -> Vec<&str> {
    report
        .items
        .iter()
        .filter_map(MergeItem::as_entry)
        .map(|e| e.content.as_str())
        .collect()
}

/// Two files interleave by time; a 35s silence exceeds a 30s threshold.
#[test]
fn e2e_two_files_with_gap() {
    let h = TestHarness::with_config(clock_config(30.0), MockLogSource::new());
    let report = h.merge(&[
        ("A.log", "10:00:00 a0\n10:00:05 a1\n"),
        ("B.log", "10:00:40 b0\n"),
    ]);

    assert_eq!(
        content_lines(&report),
        vec![
            "[A] 10:00:00 a0",
            "[A] 10:00:05 a1",
            "",
            "--- 35s ---",
            "",
            "[B] 10:00:40 b0",
        ]
    );
    let gap = report.items[2].as_gap().unwrap();
    assert_eq!(gap.duration_ms, 35_000);
}

/// Equal timestamps keep selection order.
#[test]
fn e2e_ties_follow_selection_order() {
    let h = TestHarness::with_config(clock_config(60.0), MockLogSource::new());
    let report = h.merge(&[
        ("second.log", "10:00:00 from-second\n"),
        ("first.log", "10:00:00 from-first\n"),
    ]);
    assert_eq!(
        entry_contents(&report),
        vec!["10:00:00 from-second", "10:00:00 from-first"]
    );

    let flipped = h.merge(&[
        ("first.log", "10:00:00 from-first\n"),
        ("second.log", "10:00:00 from-second\n"),
    ]);
    assert_eq!(
        entry_contents(&flipped),
        vec!["10:00:00 from-first", "10:00:00 from-second"]
    );
}

/// Valid timestamps never decrease in the merged sequence.
#[tokio::test]
async fn e2e_service_pair_is_chronological() {
    let h = TestHarness::with_service_pair();
    let report = h
        .merge_paths(&["/var/log/api-server.log", "/var/log/worker.log"], Theme::Light)
        .await;

    let stamps: Vec<i64> = report
        .items
        .iter()
        .filter_map(MergeItem::as_entry)
        .filter_map(|e| e.timestamp)
        .collect();
    assert_eq!(stamps.len(), 7);
    assert!(stamps.windows(2).all(|w| w[0] <= w[1]));

    // same millisecond in both files: api-server was selected first
    let tied: Vec<usize> = report
        .items
        .iter()
        .filter_map(MergeItem::as_entry)
        .filter(|e| e.time_text == "2024-01-15 12:00:09,310")
        .map(|e| e.file_index)
        .collect();
    assert_eq!(tied, vec![0, 1]);

    // the worker banner precedes its first timestamp and is dropped
    assert!(!report.text.contains("boot banner"));
}

/// Every gap sits between entries whose delta exceeds the threshold, and
/// every such pair has a gap.
#[tokio::test]
async fn e2e_gaps_match_threshold() {
    let h = TestHarness::with_config(MergerConfig::default(), MockLogSource::with_gap_sample());
    let report = h.merge_paths(&["/var/log/time-gap.log"], Theme::Light).await;

    let mut previous: Option<i64> = None;
    let mut pending_gap: Option<i64> = None;
    for item in &report.items {
        match item {
            MergeItem::Gap(gap) => pending_gap = Some(gap.duration_ms),
            MergeItem::Entry(entry) => {
                let current = entry.timestamp.unwrap();
                if let Some(prev) = previous {
                    let delta = current - prev;
                    if delta > 60_000 {
                        assert_eq!(pending_gap, Some(delta));
                    } else {
                        assert_eq!(pending_gap, None);
                    }
                }
                previous = Some(current);
                pending_gap = None;
            }
        }
    }
    assert_eq!(report.gap_count(), 1);
    assert!(report.text.contains("--- 1m 10s ---"));
}

/// Disabling gaps removes markers from both the sequence and the document.
#[test]
fn e2e_gaps_disabled() {
    let config = MergerConfig {
        show_time_gaps: false,
        ..clock_config(1.0)
    };
    let h = TestHarness::with_config(config, MockLogSource::new());
    let report = h.merge(&[("app.log", "10:00:00 a\n11:00:00 b\n")]);
    assert_eq!(report.gap_count(), 0);
    assert_eq!(content_lines(&report), vec!["[app] 10:00:00 a", "[app] 11:00:00 b"]);
}

/// A negative threshold behaves like zero: equal stamps produce no gap.
#[test]
fn e2e_negative_threshold_clamps_to_zero() {
    let h = TestHarness::with_config(clock_config(-5.0), MockLogSource::new());
    let report = h.merge(&[("app.log", "10:00:00 a\n10:00:00 b\n10:00:01 c\n")]);
    let gaps: Vec<&str> = report
        .items
        .iter()
        .filter_map(MergeItem::as_gap)
        .map(|g| g.formatted_duration.as_str())
        .collect();
    assert_eq!(gaps, vec!["1s"]);
}

/// Unparseable timestamps are placed by policy and never produce gaps.
#[test]
fn e2e_invalid_timestamp_policies() {
    let files = [
        ("A.log", "10:00:00 a0\n25:00:00 broken\n10:00:10 a1\n"),
        ("B.log", "10:00:05 b0\n"),
    ];
    let run = |policy| {
        let config = MergerConfig {
            invalid_timestamps: policy,
            ..clock_config(0.0)
        };
        let report = TestHarness::with_config(config, MockLogSource::new()).merge(&files);
        let contents: Vec<String> = entry_contents(&report).into_iter().map(String::from).collect();
        (contents, report.gap_count())
    };

    let (last, last_gaps) = run(InvalidTimestampPolicy::Last);
    assert_eq!(last, ["10:00:00 a0", "10:00:05 b0", "10:00:10 a1", "25:00:00 broken"]);
    assert_eq!(last_gaps, 2);

    let (first, first_gaps) = run(InvalidTimestampPolicy::First);
    assert_eq!(first, ["25:00:00 broken", "10:00:00 a0", "10:00:05 b0", "10:00:10 a1"]);
    assert_eq!(first_gaps, 2);

    let (dropped, _) = run(InvalidTimestampPolicy::Drop);
    assert_eq!(dropped, ["10:00:00 a0", "10:00:05 b0", "10:00:10 a1"]);
}

/// A file with no recognizable timestamps still appears in the legend but
/// contributes nothing.
#[tokio::test]
async fn e2e_untimed_file_contributes_no_entries() {
    let mut source = MockLogSource::with_untimed_sample();
    source.add_file("/var/log/app.log", "2024-01-15 09:00:00,000 INFO ok\n");
    let h = TestHarness::with_config(MergerConfig::default(), source);

    let report = h
        .merge_paths(&["/var/log/no-timestamp.log", "/var/log/app.log"], Theme::Light)
        .await;
    assert_eq!(report.files.len(), 2);
    assert!(report.files[0].entries.is_empty());
    assert!(report.failures.is_empty());
    assert_eq!(content_lines(&report), vec!["[app] 2024-01-15 09:00:00,000 INFO ok"]);
    assert!(report.text.contains("# ■ no-timestamp.log"));
}

/// ISO-8601 logs with a `Z` designator merge chronologically across files,
/// including one written with a numeric offset.
#[test]
fn e2e_iso_utc_files_interleave() {
    let config = MergerConfig {
        time_format: "YYYY-MM-DDTHH:mm:ss.SSSZ".into(),
        time_regex: r"^(\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(?:\.\d{3})?(?:Z|[+-]\d{2}:?\d{2}))"
            .into(),
        time_gap_threshold_seconds: 30.0,
        ..MergerConfig::default()
    };
    let h = TestHarness::with_config(config, MockLogSource::new());
    let report = h.merge(&[
        (
            "edge.log",
            "2024-01-15T12:00:00.000Z edge up\n2024-01-15T12:01:00.000Z edge tick\n",
        ),
        (
            "core.log",
            "2024-01-15T14:00:10.500+02:00 core up\n2024-01-15T12:00:20Z core ready\n",
        ),
    ]);

    assert!(
        report
            .items
            .iter()
            .filter_map(MergeItem::as_entry)
            .all(|e| e.timestamp.is_some())
    );
    assert_eq!(
        content_lines(&report),
        vec![
            "[edge] 2024-01-15T12:00:00.000Z edge up",
            "[core] 2024-01-15T14:00:10.500+02:00 core up",
            "[core] 2024-01-15T12:00:20Z core ready",
            "",
            "--- 40s ---",
            "",
            "[edge] 2024-01-15T12:01:00.000Z edge tick",
        ]
    );
}
