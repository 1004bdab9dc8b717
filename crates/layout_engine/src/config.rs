//! Page and typography configuration
//!
//! All numeric layout parameters are collected in [`LayoutConfig`]. The
//! defaults reproduce the house style of exported manuals: A4 pages, a 50pt
//! margin on every side, Helvetica body text and Helvetica-Bold titles.

use crate::{LayoutError, Result};
use doc_model::HeadingLevel;
use serde::{Deserialize, Serialize};
use text_engine::StandardFont;

/// Standard page sizes
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PageSize {
    /// US Letter (8.5" x 11")
    Letter,
    /// A4 (210mm x 297mm)
    #[default]
    A4,
    /// Legal (8.5" x 14")
    Legal,
    /// Custom size in points
    Custom { width: f32, height: f32 },
}

impl PageSize {
    /// Get the width and height in points
    pub fn dimensions(&self) -> (f32, f32) {
        match self {
            PageSize::Letter => (612.0, 792.0),
            PageSize::A4 => (595.28, 841.89),
            PageSize::Legal => (612.0, 1008.0),
            PageSize::Custom { width, height } => (*width, *height),
        }
    }
}

/// RGB fill colour, components in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Near-black slate used for all manual text
    pub const SLATE: Rgb = Rgb::new(0.07, 0.09, 0.15);

    fn is_valid(&self) -> bool {
        [self.r, self.g, self.b]
            .iter()
            .all(|c| (0.0..=1.0).contains(c))
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Rgb::SLATE
    }
}

/// Font, size and line height for one kind of line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub font: StandardFont,
    /// Font size in points
    pub size: f32,
    /// Distance the cursor moves after the line, in points
    pub line_height: f32,
}

impl TextStyle {
    pub const fn new(font: StandardFont, size: f32, line_height: f32) -> Self {
        Self {
            font,
            size,
            line_height,
        }
    }

    /// Regular weight style
    pub const fn regular(size: f32, line_height: f32) -> Self {
        Self::new(StandardFont::Helvetica, size, line_height)
    }

    /// Bold weight style
    pub const fn bold(size: f32, line_height: f32) -> Self {
        Self::new(StandardFont::HelveticaBold, size, line_height)
    }

    fn check(&self, name: &'static str, content_height: f32) -> Result<()> {
        if !(self.size.is_finite() && self.size > 0.0) {
            return Err(LayoutError::InvalidTextStyle {
                name,
                reason: format!("font size must be positive, got {}", self.size),
            });
        }
        if !(self.line_height.is_finite() && self.line_height > 0.0) {
            return Err(LayoutError::InvalidTextStyle {
                name,
                reason: format!("line height must be positive, got {}", self.line_height),
            });
        }
        if self.line_height > content_height {
            return Err(LayoutError::InvalidTextStyle {
                name,
                reason: format!(
                    "line height {} exceeds the content height {}",
                    self.line_height, content_height
                ),
            });
        }
        Ok(())
    }
}

/// Layout parameters for exported manuals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    /// Page width in points
    pub page_width: f32,
    /// Page height in points
    pub page_height: f32,
    /// Margin on all four sides
    pub margin: f32,

    /// `"{project} Documentation"` line at the top of the first page
    pub document_title: TextStyle,
    /// Section titles
    pub section_title: TextStyle,
    pub heading1: TextStyle,
    pub heading2: TextStyle,
    pub heading3: TextStyle,
    /// Paragraphs and list items
    pub body: TextStyle,

    /// Space after the document title
    pub document_title_gap: f32,
    /// Space between consecutive sections
    pub section_gap: f32,
    /// Space between a section title and its content
    pub section_title_gap: f32,
    /// Space consumed by a blank content line
    pub blank_line_advance: f32,

    /// Indent of bullet items from the left margin
    pub bullet_indent: f32,
    /// Indent of ordered items from the left margin
    pub ordered_indent: f32,
    /// Marker drawn before the first line of a bullet item
    pub bullet_marker: String,

    pub text_color: Rgb,

    /// Text drawn when a manual has no sections
    pub empty_manual_text: String,
    /// Text drawn for a section without content
    pub empty_section_text: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::a4()
    }
}

impl LayoutConfig {
    /// Default manual layout on A4
    pub fn a4() -> Self {
        let (page_width, page_height) = PageSize::A4.dimensions();
        Self {
            page_width,
            page_height,
            margin: 50.0,
            document_title: TextStyle::bold(20.0, 26.0),
            section_title: TextStyle::bold(16.0, 22.0),
            heading1: TextStyle::bold(18.0, 24.0),
            heading2: TextStyle::bold(15.0, 21.0),
            heading3: TextStyle::bold(14.0, 20.0),
            body: TextStyle::regular(12.0, 16.0),
            document_title_gap: 10.0,
            section_gap: 12.0,
            section_title_gap: 6.0,
            blank_line_advance: 8.0,
            bullet_indent: 14.0,
            ordered_indent: 20.0,
            bullet_marker: "\u{2022} ".to_string(),
            text_color: Rgb::SLATE,
            empty_manual_text: "No documentation sections available yet.".to_string(),
            empty_section_text: "No content yet.".to_string(),
        }
    }

    /// Use a different page size, keeping everything else
    pub fn with_page_size(mut self, size: PageSize) -> Self {
        let (width, height) = size.dimensions();
        self.page_width = width;
        self.page_height = height;
        self
    }

    /// Set the margin on all sides
    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// Width between the left and right margins
    pub fn content_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    /// Height between the top and bottom margins
    pub fn content_height(&self) -> f32 {
        self.page_height - 2.0 * self.margin
    }

    /// Baseline of the first line on a fresh page
    pub fn top(&self) -> f32 {
        self.page_height - self.margin
    }

    /// Style for a content heading
    pub fn heading_style(&self, level: HeadingLevel) -> &TextStyle {
        match level {
            HeadingLevel::H1 => &self.heading1,
            HeadingLevel::H2 => &self.heading2,
            HeadingLevel::H3 => &self.heading3,
        }
    }

    /// Check that the configuration leaves room to lay out text
    pub fn validate(&self) -> Result<()> {
        let dims = [self.page_width, self.page_height];
        if dims.iter().any(|d| !(d.is_finite() && *d > 0.0)) {
            return Err(LayoutError::InvalidPageSetup(format!(
                "page size must be positive, got {}x{}",
                self.page_width, self.page_height
            )));
        }
        if !(self.margin.is_finite() && self.margin >= 0.0) {
            return Err(LayoutError::InvalidPageSetup(format!(
                "margin must be non-negative, got {}",
                self.margin
            )));
        }
        let widest_indent = self.bullet_indent.max(self.ordered_indent);
        if self.content_width() <= widest_indent {
            return Err(LayoutError::InvalidPageSetup(format!(
                "content width {} leaves no room after a {} indent",
                self.content_width(),
                widest_indent
            )));
        }
        if self.content_height() <= 0.0 {
            return Err(LayoutError::InvalidPageSetup(format!(
                "margins leave no content height on a {}pt page",
                self.page_height
            )));
        }

        let gaps = [
            self.document_title_gap,
            self.section_gap,
            self.section_title_gap,
            self.blank_line_advance,
            self.bullet_indent,
            self.ordered_indent,
        ];
        if gaps.iter().any(|g| !(g.is_finite() && *g >= 0.0)) {
            return Err(LayoutError::InvalidPageSetup(
                "gaps and indents must be non-negative".to_string(),
            ));
        }
        if !self.text_color.is_valid() {
            return Err(LayoutError::InvalidPageSetup(
                "text colour components must be within 0..=1".to_string(),
            ));
        }

        let content_height = self.content_height();
        self.document_title.check("documentTitle", content_height)?;
        self.section_title.check("sectionTitle", content_height)?;
        self.heading1.check("heading1", content_height)?;
        self.heading2.check("heading2", content_height)?;
        self.heading3.check("heading3", content_height)?;
        self.body.check("body", content_height)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LayoutConfig::default();
        assert_eq!(config.page_width, 595.28);
        assert_eq!(config.page_height, 841.89);
        assert_eq!(config.margin, 50.0);
        assert_eq!(config.body, TextStyle::regular(12.0, 16.0));
        assert_eq!(config.heading2, TextStyle::bold(15.0, 21.0));
        assert_eq!(config.heading3, TextStyle::bold(14.0, 20.0));
        assert_eq!(config.text_color, Rgb::new(0.07, 0.09, 0.15));
        assert!((config.content_width() - 495.28).abs() < 1e-3);
        assert!((config.top() - 791.89).abs() < 1e-3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_heading_styles() {
        let config = LayoutConfig::default();
        assert_eq!(config.heading_style(HeadingLevel::H1).size, 18.0);
        assert_eq!(config.heading_style(HeadingLevel::H2).size, 15.0);
        assert_eq!(config.heading_style(HeadingLevel::H3).size, 14.0);
    }

    #[test]
    fn test_page_sizes() {
        assert_eq!(PageSize::Letter.dimensions(), (612.0, 792.0));
        let config = LayoutConfig::default().with_page_size(PageSize::Letter);
        assert_eq!(config.page_width, 612.0);
        assert_eq!(config.margin, 50.0);
    }

    #[test]
    fn test_validate_rejects_oversized_margin() {
        let config = LayoutConfig::default().with_margin(290.0);
        assert!(matches!(
            config.validate(),
            Err(LayoutError::InvalidPageSetup(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_style() {
        let mut config = LayoutConfig::default();
        config.body.line_height = 0.0;
        assert!(matches!(
            config.validate(),
            Err(LayoutError::InvalidTextStyle { name: "body", .. })
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: LayoutConfig =
            serde_json::from_str(r#"{"margin": 36, "body": {"font": "Helvetica", "size": 11, "lineHeight": 15}}"#)
                .unwrap();
        assert_eq!(config.margin, 36.0);
        assert_eq!(config.body.size, 11.0);
        assert_eq!(config.section_title, TextStyle::bold(16.0, 22.0));
        assert_eq!(config.empty_section_text, "No content yet.");
    }
}
