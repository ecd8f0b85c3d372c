//! CLI configuration, loadable from TOML with an environment override.

use std::path::{Path, PathBuf};

use anyhow::Context;
use lm_core::{MergerConfig, Theme};
use serde::Deserialize;

/// Environment variable overriding the configured theme.
pub const THEME_ENV: &str = "LOG_MERGER_THEME";

/// Top-level configuration for the `log-merger` binary.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AppConfig {
    /// Merge options; keys live at the top level of the file.
    #[serde(flatten)]
    pub merger: MergerConfig,
    /// Palette used when `--theme` is not given.
    #[serde(default)]
    pub theme: Theme,
    /// Directory for generated output. Defaults to the OS temp dir.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    /// Load `path` when given, otherwise start from defaults; then apply
    /// environment overrides.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Apply `LOG_MERGER_THEME` if set.
    pub fn apply_env(&mut self) -> anyhow::Result<()> {
        self.apply_theme_override(std::env::var(THEME_ENV).ok().as_deref())
    }

    fn apply_theme_override(&mut self, value: Option<&str>) -> anyhow::Result<()> {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            self.theme = value
                .trim()
                .parse()
                .map_err(|e: String| anyhow::anyhow!("{THEME_ENV}: {e}"))?;
        }
        Ok(())
    }
}
