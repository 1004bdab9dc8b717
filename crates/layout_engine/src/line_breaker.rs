//! Greedy line wrapping
//!
//! Text is split on whitespace and words are appended to the current line
//! while the line still fits. Widths are always measured on the full
//! candidate line (`current + " " + word`), never summed per word, so any
//! [`TextMeasurer`] may be plugged in.

use crate::TextStyle;
use text_engine::{StandardFont, TextMeasurer};

/// Wrap `text` into lines no wider than `max_width` points.
///
/// Empty or whitespace-only input yields a single `" "` line so that callers
/// always have something to draw. A word wider than `max_width` on its own is
/// kept whole on its own line; it is never split.
pub fn wrap_text<M: TextMeasurer + ?Sized>(
    text: &str,
    font: StandardFont,
    size: f32,
    max_width: f32,
    measurer: &M,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate = format!("{current} {word}");
        if measurer.measure(&candidate, font, size) > max_width {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current = candidate;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(" ".to_string());
    }
    lines
}

/// Line wrapper bound to a measurer
#[derive(Debug, Clone, Copy)]
pub struct LineBreaker<'m, M: TextMeasurer + ?Sized> {
    measurer: &'m M,
}

impl<'m, M: TextMeasurer + ?Sized> LineBreaker<'m, M> {
    pub fn new(measurer: &'m M) -> Self {
        Self { measurer }
    }

    /// The measurer used for wrapping
    pub fn measurer(&self) -> &'m M {
        self.measurer
    }

    /// Wrap text set in `style`
    pub fn wrap(&self, text: &str, style: &TextStyle, max_width: f32) -> Vec<String> {
        wrap_text(text, style.font, style.size, max_width, self.measurer)
    }

    /// Measured width of a single line set in `style`
    pub fn width(&self, text: &str, style: &TextStyle) -> f32 {
        self.measurer.measure(text, style.font, style.size)
    }
}
