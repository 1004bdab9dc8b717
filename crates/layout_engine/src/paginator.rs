//! Pagination
//!
//! The [`Paginator`] owns the output [`Canvas`] and a single vertical
//! [`Cursor`]. Coordinates are PDF user space: the origin is the bottom-left
//! corner of the page and `y` is the baseline of the next line, so the cursor
//! starts at `page_height - margin` and moves down.
//!
//! Before every draw the cursor satisfies `margin <= y <= page_height -
//! margin`. When a line would not fit above the bottom margin a new page is
//! appended and the cursor returns to the top. Pages are only ever appended;
//! nothing is drawn on a page once a newer page exists.

use crate::{LayoutConfig, Rgb, TextStyle};
use text_engine::StandardFont;

/// One line of text placed on a page
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub font: StandardFont,
    /// Font size in points
    pub size: f32,
    /// Left edge of the text
    pub x: f32,
    /// Baseline, measured from the bottom of the page
    pub y: f32,
    pub color: Rgb,
}

/// A fixed-size page holding lines in draw order
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Zero-based page index
    pub index: usize,
    pub width: f32,
    pub height: f32,
    lines: Vec<PlacedLine>,
}

impl Page {
    pub fn new(index: usize, width: f32, height: f32) -> Self {
        Self {
            index,
            width,
            height,
            lines: Vec::new(),
        }
    }

    /// Lines in the order they were drawn
    pub fn lines(&self) -> &[PlacedLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// The paginated output of a layout run
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    pages: Vec<Page>,
}

impl Canvas {
    /// Create a canvas with one empty page
    pub fn new(page_width: f32, page_height: f32) -> Self {
        Self {
            pages: vec![Page::new(0, page_width, page_height)],
        }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All placed lines across pages, in draw order
    pub fn lines(&self) -> impl Iterator<Item = &PlacedLine> {
        self.pages.iter().flat_map(|page| page.lines.iter())
    }

    /// The text of every placed line, in draw order
    pub fn texts(&self) -> Vec<&str> {
        self.lines().map(|line| line.text.as_str()).collect()
    }

    pub fn into_pages(self) -> Vec<Page> {
        self.pages
    }

    fn push_page(&mut self) -> usize {
        let last = &self.pages[self.pages.len() - 1];
        let page = Page::new(self.pages.len(), last.width, last.height);
        self.pages.push(page);
        self.pages.len() - 1
    }

    fn last_page_mut(&mut self) -> &mut Page {
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }
}

/// Vertical drawing position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    /// Index of the page being drawn on
    pub page_index: usize,
    /// Baseline of the next line
    pub y: f32,
}

/// Places lines onto pages, breaking pages as needed
#[derive(Debug, Clone)]
pub struct Paginator {
    canvas: Canvas,
    cursor: Cursor,
    page_height: f32,
    margin: f32,
    color: Rgb,
}

impl Paginator {
    /// Start a canvas with one page and the cursor at the top margin
    pub fn new(page_width: f32, page_height: f32, margin: f32) -> Self {
        Self {
            canvas: Canvas::new(page_width, page_height),
            cursor: Cursor {
                page_index: 0,
                y: page_height - margin,
            },
            page_height,
            margin,
            color: Rgb::default(),
        }
    }

    /// Start a canvas using the page geometry and text colour of `config`
    pub fn from_config(config: &LayoutConfig) -> Self {
        Self::new(config.page_width, config.page_height, config.margin).with_color(config.text_color)
    }

    /// Set the colour of subsequently drawn lines
    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    /// Baseline of the first line on a page
    pub fn top(&self) -> f32 {
        self.page_height - self.margin
    }

    /// Space left above the bottom margin
    pub fn remaining(&self) -> f32 {
        self.cursor.y - self.margin
    }

    pub fn page_count(&self) -> usize {
        self.canvas.page_count()
    }

    /// Move the cursor to a fresh page
    pub fn new_page(&mut self) {
        self.cursor.page_index = self.canvas.push_page();
        self.cursor.y = self.top();
    }

    /// Start a new page if fewer than `needed` points remain.
    ///
    /// Returns whether a page break happened.
    pub fn ensure_space(&mut self, needed: f32) -> bool {
        if self.remaining() < needed {
            self.new_page();
            true
        } else {
            false
        }
    }

    /// Draw one line at `indent` from the left margin and move down by
    /// `line_height`
    pub fn draw_line(
        &mut self,
        text: impl Into<String>,
        font: StandardFont,
        size: f32,
        indent: f32,
        line_height: f32,
    ) {
        self.ensure_space(line_height);
        let line = PlacedLine {
            text: text.into(),
            font,
            size,
            x: self.margin + indent,
            y: self.cursor.y,
            color: self.color,
        };
        self.canvas.last_page_mut().lines.push(line);
        self.cursor.y -= line_height;
    }

    /// Draw one line set in `style`
    pub fn draw_styled(&mut self, text: impl Into<String>, style: &TextStyle, indent: f32) {
        self.draw_line(text, style.font, style.size, indent, style.line_height);
    }

    /// Move down by `amount` without drawing.
    ///
    /// A gap that would cross the bottom margin starts a new page instead;
    /// the gap itself is dropped at the page break.
    pub fn advance(&mut self, amount: f32) {
        if self.cursor.y - amount < self.margin {
            self.new_page();
        } else {
            self.cursor.y -= amount;
        }
    }

    /// Finish layout and take the canvas
    pub fn finish(self) -> Canvas {
        self.canvas
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a4() -> Paginator {
        Paginator::from_config(&LayoutConfig::default())
    }

    #[test]
    fn test_starts_at_top_margin() {
        let paginator = a4();
        let cursor = paginator.cursor();
        assert_eq!(cursor.page_index, 0);
        assert!((cursor.y - 791.89).abs() < 1e-3);
        assert_eq!(paginator.page_count(), 1);
    }

    #[test]
    fn test_draw_places_at_margin_and_moves_down() {
        let mut paginator = a4();
        paginator.draw_line("Hello", StandardFont::Helvetica, 12.0, 14.0, 16.0);
        assert!((paginator.cursor().y - 775.89).abs() < 1e-3);

        let canvas = paginator.finish();
        let line = &canvas.pages()[0].lines()[0];
        assert_eq!(line.text, "Hello");
        assert_eq!(line.x, 64.0);
        assert!((line.y - 791.89).abs() < 1e-3);
        assert_eq!(line.color, Rgb::SLATE);
    }

    #[test]
    fn test_pagination_trigger() {
        let mut paginator = a4();
        paginator.cursor.y = 60.0;
        paginator.draw_line("next", StandardFont::Helvetica, 12.0, 0.0, 16.0);

        let cursor = paginator.cursor();
        assert_eq!(cursor.page_index, 1);
        assert!((cursor.y - (791.89 - 16.0)).abs() < 1e-3);

        let canvas = paginator.finish();
        assert_eq!(canvas.page_count(), 2);
        assert!(canvas.pages()[0].is_empty());
        let line = &canvas.pages()[1].lines()[0];
        assert!((line.y - 791.89).abs() < 1e-3);
    }

    #[test]
    fn test_exact_fit_does_not_break() {
        let mut paginator = a4();
        paginator.cursor.y = 66.0;
        paginator.draw_line("fits", StandardFont::Helvetica, 12.0, 0.0, 16.0);
        assert_eq!(paginator.page_count(), 1);
        assert_eq!(paginator.cursor().y, 50.0);
    }

    #[test]
    fn test_advance_within_page() {
        let mut paginator = a4();
        let before = paginator.cursor().y;
        paginator.advance(12.0);
        assert!((before - paginator.cursor().y - 12.0).abs() < 1e-4);
        assert_eq!(paginator.page_count(), 1);
    }

    #[test]
    fn test_advance_past_margin_breaks_page() {
        let mut paginator = a4();
        paginator.cursor.y = 55.0;
        paginator.advance(8.0);
        assert_eq!(paginator.cursor().page_index, 1);
        assert!((paginator.cursor().y - 791.89).abs() < 1e-3);
    }

    #[test]
    fn test_pages_are_monotonic() {
        let mut paginator = a4();
        for i in 0..200 {
            paginator.draw_line(format!("line {i}"), StandardFont::Helvetica, 12.0, 0.0, 16.0);
        }
        let canvas = paginator.finish();
        assert!(canvas.page_count() > 1);

        let mut last = (0, f32::INFINITY);
        for (index, page) in canvas.pages().iter().enumerate() {
            assert_eq!(page.index, index);
            for line in page.lines() {
                assert!(line.y >= 50.0 && line.y <= 791.9);
                if index == last.0 {
                    assert!(line.y < last.1);
                }
                last = (index, line.y);
            }
        }
        let texts = canvas.texts();
        assert_eq!(texts.len(), 200);
        assert_eq!(texts[199], "line 199");
    }
}
