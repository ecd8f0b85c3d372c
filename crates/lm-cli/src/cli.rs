//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use lm_core::Theme;

/// Merge timestamped log files into one chronologically ordered document.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "log-merger")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Log files to merge, in selection order (fixes their colors)
    #[arg(required = true, value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output path (default: logmerger_<timestamp>.log in the output dir)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Also write the line map as JSON
    #[arg(long, value_name = "PATH")]
    pub line_map: Option<PathBuf>,

    /// Palette to use: light or dark (overrides config)
    #[arg(long, value_name = "THEME")]
    pub theme: Option<Theme>,

    /// Print the source file of output line N (zero-based)
    #[arg(long, value_name = "N")]
    pub describe_line: Option<usize>,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,
}
