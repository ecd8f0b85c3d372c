//! Palette handling and per-file color assignment.
//!
//! A file's palette slot is its selection index, wrapped modulo the palette
//! length. Switching between the light and dark palette swaps the colors but
//! never the slots.

use serde::Serialize;

use crate::error::{MergeError, MergeResult};
use crate::types::Theme;

/// A non-empty ordered list of color values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Palette {
    colors: Vec<String>,
}

impl Palette {
    pub fn new(colors: Vec<String>) -> MergeResult<Self> {
        if colors.is_empty() {
            return Err(MergeError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    /// Color for the file at selection position `index`.
    pub fn color_for(&self, index: usize) -> &str {
        &self.colors[index % self.colors.len()]
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }
}

/// Light palette plus an optional dark alternative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteSet {
    pub light: Palette,
    pub dark: Option<Palette>,
}

impl PaletteSet {
    pub fn new(light: Vec<String>, dark: Option<Vec<String>>) -> MergeResult<Self> {
        let light = Palette::new(light)?;
        let dark = dark.map(Palette::new).transpose()?;
        Ok(Self { light, dark })
    }

    /// Palette for `theme`; dark falls back to light when none is set.
    pub fn for_theme(&self, theme: Theme) -> &Palette {
        match theme {
            Theme::Light => &self.light,
            Theme::Dark => self.dark.as_ref().unwrap_or(&self.light),
        }
    }
}
