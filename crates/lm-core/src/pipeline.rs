//! The merge pipeline: validate configuration, parse each file, merge, and
//! render.
//!
//! Configuration problems abort before any file is touched. A file that
//! cannot be read or decoded is reported as a [`FileFailure`] and left out;
//! the others are still merged.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::color::{Palette, PaletteSet};
use crate::config::{LineMapping, MergerConfig};
use crate::error::{FileFailure, MergeError, MergeResult};
use crate::line_map::LineMap;
use crate::merge::{self, MergeOptions};
use crate::parser::EntryParser;
use crate::render::{self, RenderOptions};
use crate::source::LogSource;
use crate::time_format::TimeFormat;
use crate::types::{FileInfo, MergeItem, PrefixStyle, SourceFile, Theme, file_name_of};

/// Files that parsed, and the ones that did not, both in selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSources {
    pub files: Vec<FileInfo>,
    pub failures: Vec<FileFailure>,
}

/// Result of one merge invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeReport {
    pub files: Vec<FileInfo>,
    pub failures: Vec<FileFailure>,
    pub items: Vec<MergeItem>,
    pub text: String,
    pub line_map: LineMap,
}

/// What a viewer shows for one output line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineDescription {
    pub line: usize,
    pub file: String,
    pub color: String,
    /// Entries parsed from that file.
    pub entry_count: usize,
}

impl MergeReport {
    pub fn entry_count(&self) -> usize {
        self.items.iter().filter(|i| i.as_entry().is_some()).count()
    }

    pub fn gap_count(&self) -> usize {
        self.items.iter().filter(|i| i.as_gap().is_some()).count()
    }

    /// Origin of output line `line`, if it is mapped.
    pub fn describe_line(&self, line: usize) -> Option<LineDescription> {
        let origin = self.line_map.get(line)?;
        let entry_count = self
            .files
            .iter()
            .find(|f| f.file_index == origin.file_index)
            .map(|f| f.entries.len())
            .unwrap_or_default();
        Some(LineDescription {
            line,
            file: origin.file.clone(),
            color: origin.color.clone(),
            entry_count,
        })
    }

    /// Switch every file and mapped line to `palette`.
    ///
    /// The document text is left as rendered.
    pub fn recolor(&mut self, palette: &Palette) {
        for file in &mut self.files {
            file.recolor(palette);
        }
        self.line_map = self.line_map.recolored(palette);
    }
}

/// A validated merge configuration, ready to run.
#[derive(Debug, Clone)]
pub struct LogMerger {
    parser: EntryParser,
    palettes: PaletteSet,
    merge_options: MergeOptions,
    show_file_prefix: bool,
    prefix_style: PrefixStyle,
    line_mapping: LineMapping,
}

impl LogMerger {
    /// Validate `config`. Fails on an empty palette, a regex that does not
    /// compile or has no capture group, or a non-finite gap threshold.
    pub fn from_config(config: &MergerConfig) -> MergeResult<Self> {
        let palettes = PaletteSet::new(
            config.color_palette.clone(),
            config.dark_color_palette.clone(),
        )?;
        let parser = EntryParser::new(&config.time_regex, TimeFormat::new(&config.time_format))?;
        let gap_threshold_ms = config.gap_threshold_ms().ok_or_else(|| {
            MergeError::Config(format!(
                "time gap threshold must be a finite number, got {}",
                config.time_gap_threshold_seconds
            ))
        })?;

        Ok(Self {
            parser,
            palettes,
            merge_options: MergeOptions {
                show_time_gaps: config.show_time_gaps,
                gap_threshold_ms,
                invalid_timestamps: config.invalid_timestamps,
            },
            show_file_prefix: config.show_file_prefix,
            prefix_style: config.file_prefix_type,
            line_mapping: config.line_mapping,
        })
    }

    /// Replace the entry parser, e.g. to pin the reference year.
    pub fn with_parser(mut self, parser: EntryParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn palettes(&self) -> &PaletteSet {
        &self.palettes
    }

    /// Parse one file at selection position `file_index`.
    pub fn parse_source(
        &self,
        source: &SourceFile,
        file_index: usize,
        palette: &Palette,
    ) -> Result<FileInfo, FileFailure> {
        let entries = self.parser.parse(&source.bytes, &source.filename, file_index)?;
        Ok(FileInfo::new(&source.filename, file_index, palette).with_entries(entries))
    }

    /// Parse every source on the current thread.
    pub fn parse_sources(&self, sources: &[SourceFile], theme: Theme) -> ParsedSources {
        let palette = self.palettes.for_theme(theme);
        let mut parsed = ParsedSources::default();
        for (index, source) in sources.iter().enumerate() {
            match self.parse_source(source, index, palette) {
                Ok(file) => parsed.files.push(file),
                Err(failure) => {
                    tracing::warn!(file = %failure.file, error = %failure.message, "skipping file");
                    parsed.failures.push(failure);
                }
            }
        }
        parsed
    }

    /// Parse every source on tokio's blocking pool.
    ///
    /// Results are collected in selection order regardless of completion
    /// order; a panicking parse becomes a failure for that file only.
    pub async fn parse_sources_parallel(
        &self,
        sources: Vec<SourceFile>,
        theme: Theme,
    ) -> ParsedSources {
        let indexed = sources.into_iter().enumerate().collect();
        let mut parsed = ParsedSources::default();
        for (_, result) in self.parse_indexed(indexed, theme).await {
            match result {
                Ok(file) => parsed.files.push(file),
                Err(failure) => parsed.failures.push(failure),
            }
        }
        parsed
    }

    async fn parse_indexed(
        &self,
        sources: Vec<(usize, SourceFile)>,
        theme: Theme,
    ) -> Vec<(usize, Result<FileInfo, FileFailure>)> {
        let palette = self.palettes.for_theme(theme).clone();

        let handles: Vec<_> = sources
            .into_iter()
            .map(|(index, source)| {
                let merger = self.clone();
                let palette = palette.clone();
                let filename = source.filename.clone();
                let handle = tokio::task::spawn_blocking(move || {
                    merger.parse_source(&source, index, &palette)
                });
                (index, filename, handle)
            })
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for (index, filename, handle) in handles {
            let result = handle.await.unwrap_or_else(|e| {
                Err(FileFailure::new(filename, format!("parse task failed: {e}")))
            });
            if let Err(failure) = &result {
                tracing::warn!(file = %failure.file, error = %failure.message, "skipping file");
            }
            results.push((index, result));
        }
        results
    }

    /// Merge parsed files and render the document.
    pub fn merge_and_render(
        &self,
        parsed: ParsedSources,
        generated_at: NaiveDateTime,
    ) -> MergeReport {
        let items = merge::merge_files(&parsed.files, &self.merge_options);
        let rendered = render::render(
            &parsed.files,
            &items,
            &RenderOptions {
                show_file_prefix: self.show_file_prefix,
                prefix_style: self.prefix_style,
                show_time_gaps: self.merge_options.show_time_gaps,
                line_mapping: self.line_mapping,
                generated_at,
            },
        );

        tracing::info!(
            files = parsed.files.len(),
            failed = parsed.failures.len(),
            items = items.len(),
            "merged log files"
        );

        MergeReport {
            files: parsed.files,
            failures: parsed.failures,
            items,
            text: rendered.text,
            line_map: rendered.line_map,
        }
    }

    /// Parse, merge, and render on the current thread.
    pub fn run(
        &self,
        sources: &[SourceFile],
        theme: Theme,
        generated_at: NaiveDateTime,
    ) -> MergeReport {
        let parsed = self.parse_sources(sources, theme);
        self.merge_and_render(parsed, generated_at)
    }

    /// Parse in parallel, then merge and render.
    pub async fn run_parallel(
        &self,
        sources: Vec<SourceFile>,
        theme: Theme,
        generated_at: NaiveDateTime,
    ) -> MergeReport {
        let parsed = self.parse_sources_parallel(sources, theme).await;
        self.merge_and_render(parsed, generated_at)
    }

    /// Read `paths` through `source`, then run in parallel.
    ///
    /// Unreadable paths are reported as failures at their selection position.
    pub async fn run_from_source(
        &self,
        source: &dyn LogSource,
        paths: &[String],
        theme: Theme,
        generated_at: NaiveDateTime,
    ) -> MergeReport {
        let mut readable = Vec::with_capacity(paths.len());
        let mut read_failures = Vec::new();

        for (index, path) in paths.iter().enumerate() {
            let filename = file_name_of(std::path::Path::new(path));
            match source.read_bytes(path).await {
                Ok(bytes) => readable.push((index, SourceFile::new(filename, bytes))),
                Err(e) => {
                    tracing::warn!(path = %path, error = %e, "cannot read log file");
                    read_failures.push((index, FileFailure::new(filename, e.to_string())));
                }
            }
        }

        // Readable files keep their original selection index.
        let mut parsed = ParsedSources::default();
        let mut failures = read_failures;
        for (index, result) in self.parse_indexed(readable, theme).await {
            match result {
                Ok(file) => parsed.files.push(file),
                Err(failure) => failures.push((index, failure)),
            }
        }
        failures.sort_by_key(|(index, _)| *index);
        parsed.failures = failures.into_iter().map(|(_, f)| f).collect();

        self.merge_and_render(parsed, generated_at)
    }
}
