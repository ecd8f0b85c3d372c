//! The `log-merger` flow: load config, read and merge files, write output.

use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDateTime;
use lm_core::{FileLogSource, LogMerger, LogSource, MergeReport};

use crate::cli::Args;
use crate::config::AppConfig;
use crate::output;

/// What a completed run produced.
#[derive(Debug)]
pub struct RunOutcome {
    pub output_path: PathBuf,
    pub line_map_path: Option<PathBuf>,
    pub report: MergeReport,
}

/// Run with the local filesystem as source.
pub async fn run(args: &Args, now: NaiveDateTime) -> anyhow::Result<RunOutcome> {
    run_with_source(args, &FileLogSource, now).await
}

/// Merge `args.files` read through `source`.
///
/// Fails on bad configuration, or when none of the files could be used.
pub async fn run_with_source(
    args: &Args,
    source: &dyn LogSource,
    now: NaiveDateTime,
) -> anyhow::Result<RunOutcome> {
    let config = AppConfig::load(args.config.as_deref())?;
    let theme = args.theme.unwrap_or(config.theme);
    let merger = LogMerger::from_config(&config.merger).context("invalid merge configuration")?;
    tracing::info!(files = args.files.len(), theme = ?theme, "merging log files");

    let paths: Vec<String> = args
        .files
        .iter()
        .map(|p| p.to_string_lossy().into_owned())
        .collect();
    let report = merger.run_from_source(source, &paths, theme, now).await;

    if report.files.is_empty() && !report.failures.is_empty() {
        let names: Vec<&str> = report.failures.iter().map(|f| f.file.as_str()).collect();
        anyhow::bail!("no log file could be merged (failed: {})", names.join(", "));
    }

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| output::default_output_path(config.output_dir.as_deref(), now));
    output::write_outputs(&report, &output_path, args.line_map.as_deref()).await?;

    tracing::info!(
        path = %output_path.display(),
        entries = report.entry_count(),
        gaps = report.gap_count(),
        failed = report.failures.len(),
        "merged document written"
    );

    Ok(RunOutcome {
        output_path,
        line_map_path: args.line_map.clone(),
        report,
    })
}
