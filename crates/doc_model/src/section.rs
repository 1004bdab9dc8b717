//! Documentation sections
//!
//! A section is one titled chunk of generated documentation. Sections are
//! read-only input to the export pipeline and are rendered in the order the
//! caller supplies them.

use crate::Block;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// One documentation section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Section title (may be blank; see [`Section::display_title`])
    #[serde(default)]
    pub title: String,
    /// Raw markdown-like content; `None` when the section has not been written yet
    #[serde(default)]
    pub content: Option<String>,
}

impl Section {
    /// Create a section with a title and no content
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: None,
        }
    }

    /// Set the section content
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Title to render for the section at `index` (0-based).
    ///
    /// Blank titles fall back to `Section N` with a 1-based number.
    pub fn display_title(&self, index: usize) -> Cow<'_, str> {
        if self.title.trim().is_empty() {
            Cow::Owned(format!("Section {}", index + 1))
        } else {
            Cow::Borrowed(self.title.as_str())
        }
    }

    /// Whether the section has any non-whitespace content
    pub fn has_content(&self) -> bool {
        self.content
            .as_deref()
            .is_some_and(|content| !content.trim().is_empty())
    }

    /// Iterate over the raw content lines, with `\r\n` normalized to `\n`
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        content_lines(self.content.as_deref().unwrap_or(""))
    }

    /// Iterate over the classified blocks of the section content
    pub fn blocks(&self) -> impl Iterator<Item = Block<'_>> {
        self.lines().map(Block::classify)
    }
}

/// Split raw content into lines.
///
/// A `\r` directly before a `\n` is dropped, so CRLF and LF input produce the
/// same lines. An empty string yields a single empty line.
pub fn content_lines(content: &str) -> impl Iterator<Item = &str> {
    content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}
