//! Output line → source file mapping.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::color::Palette;

/// Origin of one rendered line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineOrigin {
    pub file: String,
    pub color: String,
    #[serde(skip)]
    pub file_index: usize,
}

/// Lines of one file sharing a highlight color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightGroup {
    pub file: String,
    pub color: String,
    pub lines: Vec<usize>,
}

/// Zero-based absolute output line → origin.
///
/// Built once by the renderer; lines inside gap markers and separators are
/// never present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LineMap {
    lines: BTreeMap<usize, LineOrigin>,
}

impl LineMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, line: usize, origin: LineOrigin) {
        self.lines.insert(line, origin);
    }

    pub fn get(&self, line: usize) -> Option<&LineOrigin> {
        self.lines.get(&line)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Mapped lines in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &LineOrigin)> {
        self.lines.iter().map(|(line, origin)| (*line, origin))
    }

    pub fn lines_for_file(&self, file_index: usize) -> Vec<usize> {
        self.iter()
            .filter(|(_, origin)| origin.file_index == file_index)
            .map(|(line, _)| line)
            .collect()
    }

    /// The same mapping with colors taken from `palette`.
    ///
    /// Each line keeps its file and the file keeps its palette slot.
    pub fn recolored(&self, palette: &Palette) -> LineMap {
        let lines = self
            .lines
            .iter()
            .map(|(line, origin)| {
                let recolored = LineOrigin {
                    color: palette.color_for(origin.file_index).to_string(),
                    ..origin.clone()
                };
                (*line, recolored)
            })
            .collect();
        LineMap { lines }
    }

    /// Lines grouped per file, files ordered by first appearance.
    ///
    /// Header lines come first in the document, so this is selection order.
    pub fn highlight_groups(&self) -> Vec<HighlightGroup> {
        let mut groups: Vec<(usize, HighlightGroup)> = Vec::new();
        for (line, origin) in self.iter() {
            match groups.iter_mut().find(|(index, _)| *index == origin.file_index) {
                Some((_, group)) => group.lines.push(line),
                None => groups.push((
                    origin.file_index,
                    HighlightGroup {
                        file: origin.file.clone(),
                        color: origin.color.clone(),
                        lines: vec![line],
                    },
                )),
            }
        }
        groups.into_iter().map(|(_, group)| group).collect()
    }
}
