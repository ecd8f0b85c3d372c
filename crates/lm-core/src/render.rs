//! Renders the merged sequence into the annotated document and builds the
//! line map alongside it.
//!
//! Layout (zero-based lines):
//!
//! ```text
//! 0      # Log Merger - merged log file
//! 1      # Generated: 2024-01-15 12:00:00
//! 2      # Source files:
//! 3      #
//! 4      # Color legend:
//! 5+i    # ■ <file i> (<color>) - prefix: [<prefix>]
//! 5+n    #
//! 6+n..  entries and gap markers
//! ```

use chrono::NaiveDateTime;
use std::collections::HashMap;

use crate::config::LineMapping;
use crate::line_map::{LineMap, LineOrigin};
use crate::types::{FileInfo, MergeItem, PrefixStyle};

/// Fixed lines before the per-file legend.
pub const HEADER_BASE_LINES: usize = 5;

/// Lines emitted for each gap marker.
pub const GAP_LINES: usize = 3;

/// Rendering switches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub show_file_prefix: bool,
    pub prefix_style: PrefixStyle,
    pub show_time_gaps: bool,
    pub line_mapping: LineMapping,
    /// Shown in the header; supplied by the caller so output is reproducible.
    pub generated_at: NaiveDateTime,
}

/// The merged document and its line map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    pub line_map: LineMap,
}

/// Total header length for `file_count` files; content starts here.
pub fn header_line_count(file_count: usize) -> usize {
    HEADER_BASE_LINES + file_count + 1
}

/// Bracketed marker for `filename`, including the trailing space.
pub fn file_prefix(filename: &str, style: PrefixStyle) -> String {
    match style {
        PrefixStyle::Full => format!("[{filename}] "),
        PrefixStyle::Short => format!("[{}] ", strip_extension(filename)),
        PrefixStyle::Initial => {
            let initials: String = filename
                .split(|c: char| !c.is_ascii_alphanumeric())
                .filter_map(|token| token.chars().next())
                .map(|c| c.to_ascii_uppercase())
                .collect();
            format!("[{initials}] ")
        }
    }
}

/// Drop the last `.ext`, where `ext` is non-empty and has no `.` or `/`.
fn strip_extension(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(dot) if dot + 1 < filename.len() && !filename[dot + 1..].contains('/') => {
            &filename[..dot]
        }
        _ => filename,
    }
}

struct FileStyle<'a> {
    filename: &'a str,
    color: &'a str,
    prefix: String,
}

/// Render `items` under a header describing `files`.
pub fn render(files: &[FileInfo], items: &[MergeItem], options: &RenderOptions) -> Rendered {
    let styles: HashMap<usize, FileStyle<'_>> = files
        .iter()
        .map(|f| {
            let prefix = if options.show_file_prefix {
                file_prefix(&f.filename, options.prefix_style)
            } else {
                String::new()
            };
            let style = FileStyle {
                filename: &f.filename,
                color: &f.color,
                prefix,
            };
            (f.file_index, style)
        })
        .collect();

    let mut text = String::new();
    let mut line_map = LineMap::new();

    text.push_str("# Log Merger - merged log file\n");
    text.push_str(&format!(
        "# Generated: {}\n",
        options.generated_at.format("%Y-%m-%d %H:%M:%S")
    ));
    text.push_str("# Source files:\n");
    text.push_str("#\n");
    text.push_str("# Color legend:\n");

    for (i, file) in files.iter().enumerate() {
        let mut legend = format!("# ■ {} ({})", file.filename, file.color);
        if options.show_file_prefix {
            if let Some(style) = styles.get(&file.file_index) {
                legend.push_str(&format!(" - prefix: {}", style.prefix.trim_end()));
            }
        }
        legend.push('\n');
        text.push_str(&legend);

        line_map.insert(
            HEADER_BASE_LINES + i,
            LineOrigin {
                file: file.filename.clone(),
                color: file.color.clone(),
                file_index: file.file_index,
            },
        );
    }
    text.push_str("#\n");

    let header_lines = header_line_count(files.len());
    let mut content_line = 0usize;

    for item in items {
        match item {
            MergeItem::Gap(gap) => {
                if !options.show_time_gaps {
                    continue;
                }
                text.push_str(&format!("\n--- {} ---\n\n", gap.formatted_duration));
                content_line += GAP_LINES;
            }
            MergeItem::Entry(entry) => {
                let style = styles.get(&entry.file_index);
                let prefix = style.map(|s| s.prefix.as_str()).unwrap_or_default();
                text.push_str(prefix);
                text.push_str(&entry.content);
                text.push('\n');

                let physical_lines = entry.line_count();
                let Some(style) = style else {
                    content_line += match options.line_mapping {
                        LineMapping::FirstLine => 1,
                        LineMapping::PhysicalLines => physical_lines,
                    };
                    continue;
                };

                let origin = LineOrigin {
                    file: style.filename.to_string(),
                    color: style.color.to_string(),
                    file_index: entry.file_index,
                };
                match options.line_mapping {
                    LineMapping::FirstLine => {
                        line_map.insert(header_lines + content_line, origin);
                        content_line += 1;
                    }
                    LineMapping::PhysicalLines => {
                        for offset in 0..physical_lines {
                            line_map.insert(header_lines + content_line + offset, origin.clone());
                        }
                        content_line += physical_lines;
                    }
                }
            }
        }
    }

    tracing::debug!(
        files = files.len(),
        items = items.len(),
        mapped_lines = line_map.len(),
        "rendered merged document"
    );

    Rendered { text, line_map }
}
