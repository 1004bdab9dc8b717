//! Page rendering
//!
//! Turns the placed lines of a laid-out page into a content stream. Layout
//! coordinates are already in PDF user space (origin bottom-left, `y` on the
//! baseline), so positions are written through unchanged.

use super::content::ContentStream;
use super::fonts::FontRegistry;
use layout_engine::{Page, Rgb};

/// Renders pages and tracks the fonts they use
#[derive(Debug, Default)]
pub struct PdfRenderer {
    fonts: FontRegistry,
}

impl PdfRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fonts used by every page rendered so far
    pub fn fonts(&self) -> &FontRegistry {
        &self.fonts
    }

    /// Render one page to a content stream.
    ///
    /// The page is drawn inside a saved graphics state (`q` ... `Q`). Font and
    /// colour operators are only emitted when they change. A page without
    /// lines yields an empty stream.
    pub fn render_page(&mut self, page: &Page) -> ContentStream {
        let mut content = ContentStream::new();
        if page.is_empty() {
            return content;
        }

        content.save_state().begin_text();
        let mut current_font: Option<(String, f32)> = None;
        let mut current_color: Option<Rgb> = None;

        for line in page.lines() {
            let resource = self.fonts.resource_name(line.font).to_string();
            let font_changed = match &current_font {
                Some((name, size)) => *name != resource || *size != line.size,
                None => true,
            };
            if font_changed {
                content.set_font(&resource, line.size as f64);
                current_font = Some((resource, line.size));
            }

            if current_color != Some(line.color) {
                let Rgb { r, g, b } = line.color;
                content.set_fill_rgb(r as f64, g as f64, b as f64);
                current_color = Some(line.color);
            }

            content
                .set_text_position(line.x as f64, line.y as f64)
                .show_text(&line.text);
        }

        content.end_text().restore_state();
        content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layout_engine::Paginator;
    use text_engine::StandardFont;

    fn page_with(lines: &[(&str, StandardFont, f32)]) -> Page {
        let mut paginator = Paginator::new(595.28, 841.89, 50.0);
        for (text, font, size) in lines {
            paginator.draw_line(*text, *font, *size, 0.0, 16.0);
        }
        paginator.finish().into_pages().remove(0)
    }

    #[test]
    fn test_empty_page() {
        let page = Page::new(0, 595.28, 841.89);
        let mut renderer = PdfRenderer::new();
        assert!(renderer.render_page(&page).is_empty());
        assert!(renderer.fonts().is_empty());
    }

    #[test]
    fn test_font_switches_only_on_change() {
        let page = page_with(&[
            ("Title", StandardFont::HelveticaBold, 16.0),
            ("one", StandardFont::Helvetica, 12.0),
            ("two", StandardFont::Helvetica, 12.0),
        ]);
        let mut renderer = PdfRenderer::new();
        let content = renderer.render_page(&page);
        let text = String::from_utf8_lossy(content.as_bytes()).into_owned();

        assert_eq!(text.matches(" Tf").count(), 2);
        assert_eq!(text.matches(" rg").count(), 1);
        assert!(text.contains("/F1 16 Tf"));
        assert!(text.contains("/F2 12 Tf"));
        assert!(text.contains("1 0 0 1 50 791.89 Tm\n(Title) Tj"));
        assert!(text.starts_with("q\nBT\n"));
        assert!(text.ends_with("ET\nQ\n"));
        assert_eq!(renderer.fonts().len(), 2);
    }

    #[test]
    fn test_page_state_is_balanced() {
        let page = page_with(&[
            ("one", StandardFont::Helvetica, 12.0),
            ("two", StandardFont::HelveticaBold, 14.0),
        ]);
        let content = PdfRenderer::new().render_page(&page);
        let text = String::from_utf8_lossy(content.as_bytes()).into_owned();
        let ops: Vec<&str> = text.lines().filter(|l| *l == "q" || *l == "Q").collect();
        assert_eq!(ops, vec!["q", "Q"]);
        assert!(text.find("q\n").unwrap() < text.find("BT\n").unwrap());
        assert!(text.rfind("ET\n").unwrap() < text.rfind("Q\n").unwrap());
    }

    #[test]
    fn test_draw_order_preserved() {
        let page = page_with(&[
            ("first", StandardFont::Helvetica, 12.0),
            ("second", StandardFont::Helvetica, 12.0),
        ]);
        let content = PdfRenderer::new().render_page(&page);
        let text = String::from_utf8_lossy(content.as_bytes()).into_owned();
        let first = text.find("(first)").unwrap();
        let second = text.find("(second)").unwrap();
        assert!(first < second);
    }
}
