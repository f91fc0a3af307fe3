//! Source texts and line/column recovery.
//!
//! Every parsed unit (a file, an `exec` string, an `eval` expression)
//! keeps its [`SourceText`] so that a failing node can be reported with a
//! 1-based line and column long after parsing finished.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::Span;

/// Pre-computed line starts for O(log L) line lookup.
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    /// `offsets[i]` is the byte offset where line `i + 1` starts.
    offsets: Vec<u32>,
}

impl LineOffsetTable {
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        for (i, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                offsets.push(u32::try_from(i + 1).unwrap_or(u32::MAX));
            }
        }
        LineOffsetTable { offsets }
    }

    /// 1-based line containing `offset`.
    #[inline]
    pub fn line_from_offset(&self, offset: u32) -> u32 {
        let line_idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        u32::try_from(line_idx).unwrap_or(u32::MAX - 1) + 1
    }

    /// 1-based (line, column). Columns count characters, not bytes.
    pub fn offset_to_line_col(&self, source: &str, offset: u32) -> (u32, u32) {
        let line = self.line_from_offset(offset);
        let line_start = self
            .offsets
            .get((line - 1) as usize)
            .copied()
            .unwrap_or(0) as usize;
        let end = (offset as usize).min(source.len());
        let col = source
            .get(line_start..end)
            .map_or(0, |prefix| prefix.chars().count());
        (line, u32::try_from(col).unwrap_or(u32::MAX - 1) + 1)
    }

    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }
}

/// A named source text.
#[derive(Debug)]
pub struct SourceText {
    text: Rc<str>,
    path: Option<PathBuf>,
    lines: LineOffsetTable,
}

impl SourceText {
    pub fn new(text: impl Into<Rc<str>>) -> Self {
        let text = text.into();
        let lines = LineOffsetTable::build(&text);
        SourceText {
            text,
            path: None,
            lines,
        }
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Display name used in diagnostics.
    pub fn name(&self) -> String {
        self.path
            .as_ref()
            .map_or_else(|| "<source>".to_owned(), |p| p.display().to_string())
    }

    /// Text covered by `span`, or the empty string if it is out of range.
    pub fn slice(&self, span: Span) -> &str {
        self.text.get(span.to_range()).unwrap_or("")
    }

    /// 1-based (line, column) of the start of `span`.
    pub fn line_col(&self, span: Span) -> (u32, u32) {
        self.lines.offset_to_line_col(&self.text, span.start)
    }
}

#[cfg(test)]
mod tests;
