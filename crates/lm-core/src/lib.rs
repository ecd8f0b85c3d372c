//! Chronological log merging for Log Merger.
//!
//! Parses timestamped log files into (possibly multi-line) entries, merges
//! them into one time-ordered stream with detected time gaps, and renders an
//! annotated document together with a line → source-file map that callers use
//! for per-file highlighting.

pub mod color;
pub mod config;
pub mod error;
pub mod line_map;
pub mod merge;
pub mod mock;
pub mod parser;
pub mod pipeline;
pub mod render;
pub mod source;
pub mod time_format;
pub mod types;

// Re-export key types for convenience
pub use color::{Palette, PaletteSet};
pub use config::{LineMapping, MergerConfig};
pub use error::{FileFailure, MergeError, MergeResult};
pub use line_map::{HighlightGroup, LineMap, LineOrigin};
pub use merge::{InvalidTimestampPolicy, MergeOptions};
pub use mock::MockLogSource;
pub use parser::EntryParser;
pub use pipeline::{LineDescription, LogMerger, MergeReport, ParsedSources};
pub use render::{RenderOptions, Rendered};
pub use source::{FileLogSource, LogSource};
pub use time_format::TimeFormat;
pub use types::{FileInfo, GapMarker, LogEntry, MergeItem, PrefixStyle, SourceFile, Theme};
