//! Section formatting
//!
//! Drives the paginator over a manual: an optional document title, then each
//! section's title followed by its content blocks, in input order.

use crate::{Canvas, LayoutConfig, LineBreaker, Paginator, Result, TextStyle};
use doc_model::{Block, Manual, Section};
use text_engine::TextMeasurer;

/// Lays documentation sections out onto pages
pub struct DocumentFormatter<'a, M: TextMeasurer + ?Sized> {
    config: &'a LayoutConfig,
    breaker: LineBreaker<'a, M>,
}

impl<'a, M: TextMeasurer + ?Sized> DocumentFormatter<'a, M> {
    /// Create a formatter, validating the layout configuration
    pub fn new(config: &'a LayoutConfig, measurer: &'a M) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            breaker: LineBreaker::new(measurer),
        })
    }

    pub fn config(&self) -> &LayoutConfig {
        self.config
    }

    /// Lay out a manual, titled after its project name
    pub fn format_manual(&self, manual: &Manual) -> Canvas {
        self.format(manual.project_name.as_deref(), &manual.sections)
    }

    /// Lay out `sections` in order.
    ///
    /// When `title` is given a `"{title} Documentation"` line heads the first
    /// page. With no sections a single placeholder paragraph is drawn.
    pub fn format(&self, title: Option<&str>, sections: &[Section]) -> Canvas {
        let config = self.config;
        let mut paginator = Paginator::from_config(config);

        if let Some(title) = title.map(str::trim).filter(|t| !t.is_empty()) {
            paginator.draw_styled(format!("{title} Documentation"), &config.document_title, 0.0);
            paginator.advance(config.document_title_gap);
        }

        if sections.is_empty() {
            self.draw_paragraph(&mut paginator, &config.empty_manual_text);
        }

        for (index, section) in sections.iter().enumerate() {
            if index > 0 {
                paginator.advance(config.section_gap);
            }
            self.format_section(&mut paginator, index, section);
        }

        paginator.finish()
    }

    fn format_section(&self, paginator: &mut Paginator, index: usize, section: &Section) {
        let config = self.config;
        paginator.draw_styled(section.display_title(index), &config.section_title, 0.0);
        paginator.advance(config.section_title_gap);

        if !section.has_content() {
            self.draw_paragraph(paginator, &config.empty_section_text);
            return;
        }

        for block in section.blocks() {
            self.format_block(paginator, block);
        }
    }

    fn format_block(&self, paginator: &mut Paginator, block: Block<'_>) {
        let config = self.config;
        match block {
            Block::Heading { level, text } => {
                paginator.draw_styled(text, config.heading_style(level), 0.0);
            }
            Block::BulletItem { text } => {
                let continuation = " ".repeat(config.bullet_marker.chars().count());
                self.draw_list_item(
                    paginator,
                    text,
                    &config.bullet_marker,
                    &continuation,
                    config.bullet_indent,
                );
            }
            Block::OrderedItem { index, text } => {
                self.draw_list_item(
                    paginator,
                    text,
                    &format!("{index}. "),
                    "   ",
                    config.ordered_indent,
                );
            }
            Block::BlankLine => paginator.advance(config.blank_line_advance),
            Block::Paragraph { text } => self.draw_paragraph(paginator, text),
        }
    }

    fn draw_paragraph(&self, paginator: &mut Paginator, text: &str) {
        let body = &self.config.body;
        for line in self.breaker.wrap(text, body, self.config.content_width()) {
            paginator.draw_styled(line, body, 0.0);
        }
    }

    /// Wrap a list item at the indented width; the first line carries
    /// `marker`, later lines `continuation`
    fn draw_list_item(
        &self,
        paginator: &mut Paginator,
        text: &str,
        marker: &str,
        continuation: &str,
        indent: f32,
    ) {
        let body: &TextStyle = &self.config.body;
        let max_width = self.config.content_width() - indent;
        for (i, line) in self.breaker.wrap(text, body, max_width).into_iter().enumerate() {
            let prefix = if i == 0 { marker } else { continuation };
            paginator.draw_styled(format!("{prefix}{line}"), body, indent);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use text_engine::{StandardFont, StandardMetrics};

    fn format(title: Option<&str>, sections: &[Section]) -> Canvas {
        let config = LayoutConfig::default();
        let metrics = StandardMetrics::new();
        DocumentFormatter::new(&config, &metrics)
            .unwrap()
            .format(title, sections)
    }

    #[test]
    fn test_empty_sections_placeholder() {
        let canvas = format(None, &[]);
        assert_eq!(canvas.page_count(), 1);
        assert_eq!(canvas.texts(), vec!["No documentation sections available yet."]);
        let line = canvas.lines().next().unwrap();
        assert_eq!(line.font, StandardFont::Helvetica);
        assert_eq!(line.size, 12.0);
    }

    #[test]
    fn test_section_ordering() {
        let sections = vec![
            Section::new("Alpha").with_content("first"),
            Section::new("Beta").with_content("second"),
            Section::new("Gamma").with_content("third"),
        ];
        let canvas = format(None, &sections);
        assert_eq!(
            canvas.texts(),
            vec!["Alpha", "first", "Beta", "second", "Gamma", "third"]
        );

        let ys: Vec<f32> = canvas.lines().map(|l| l.y).collect();
        assert!(ys.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn test_section_spacing() {
        let sections = vec![
            Section::new("Alpha").with_content("first"),
            Section::new("Beta").with_content("second"),
        ];
        let canvas = format(None, &sections);
        let ys: Vec<f32> = canvas.lines().map(|l| l.y).collect();
        // title 22 + gap 6
        assert!((ys[0] - ys[1] - 28.0).abs() < 1e-3);
        // body 16 + section gap 12
        assert!((ys[1] - ys[2] - 28.0).abs() < 1e-3);
    }

    #[test]
    fn test_document_title() {
        let canvas = format(Some("Acme"), &[Section::new("Intro").with_content("hi")]);
        let lines: Vec<_> = canvas.lines().collect();
        assert_eq!(lines[0].text, "Acme Documentation");
        assert_eq!(lines[0].font, StandardFont::HelveticaBold);
        assert_eq!(lines[0].size, 20.0);
        // title line 26 + gap 10
        assert!((lines[0].y - lines[1].y - 36.0).abs() < 1e-3);
    }

    #[test]
    fn test_blank_title_falls_back_to_number() {
        let canvas = format(None, &[Section::new("A"), Section::new("  ")]);
        assert_eq!(
            canvas.texts(),
            vec!["A", "No content yet.", "Section 2", "No content yet."]
        );
    }

    #[test]
    fn test_bullet_indentation() {
        let canvas = format(None, &[Section::new("List").with_content("- apples")]);
        let item = canvas.lines().nth(1).unwrap();
        assert_eq!(item.text, "\u{2022} apples");
        assert_eq!(item.x, 64.0);
        assert_eq!(item.font, StandardFont::Helvetica);
    }

    #[test]
    fn test_bullet_continuation_lines() {
        let long = "word ".repeat(120);
        let canvas = format(None, &[Section::new("List").with_content(format!("- {long}"))]);
        let items: Vec<_> = canvas.lines().skip(1).collect();
        assert!(items.len() > 1);
        assert!(items[0].text.starts_with("\u{2022} word"));
        for item in &items[1..] {
            assert!(item.text.starts_with("  word"));
            assert_eq!(item.x, 64.0);
        }
    }

    #[test]
    fn test_ordered_numeral_fidelity() {
        let canvas = format(
            None,
            &[Section::new("Steps").with_content("7. do thing\n1. then this")],
        );
        let texts = canvas.texts();
        assert_eq!(texts[1], "7. do thing");
        assert_eq!(texts[2], "1. then this");
        assert_eq!(canvas.lines().nth(1).unwrap().x, 70.0);
    }

    #[test]
    fn test_headings_use_bold_sizes() {
        let canvas = format(
            None,
            &[Section::new("H").with_content("# One\n## Two\n### Three\n#### Four")],
        );
        let sizes: Vec<(String, f32)> = canvas
            .lines()
            .skip(1)
            .map(|l| (l.text.clone(), l.size))
            .collect();
        assert_eq!(
            sizes,
            vec![
                ("One".to_string(), 18.0),
                ("Two".to_string(), 15.0),
                ("Three".to_string(), 14.0),
                ("Four".to_string(), 14.0),
            ]
        );
        assert!(canvas.lines().all(|l| l.font == StandardFont::HelveticaBold));
    }

    #[test]
    fn test_blank_line_advances_without_drawing() {
        let canvas = format(None, &[Section::new("S").with_content("a\n\nb")]);
        let lines: Vec<_> = canvas.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!((lines[1].y - lines[2].y - 24.0).abs() < 1e-3);
    }

    #[test]
    fn test_long_manual_spans_pages() {
        let content = (0..120)
            .map(|i| format!("Paragraph number {i} of the operations guide."))
            .collect::<Vec<_>>()
            .join("\n");
        let canvas = format(Some("Ops"), &[Section::new("Runbook").with_content(content)]);
        assert!(canvas.page_count() >= 3);
        for page in canvas.pages() {
            for line in page.lines() {
                assert!(line.y >= 50.0 - 1e-3);
            }
        }
        assert_eq!(canvas.texts().last(), Some(&"Paragraph number 119 of the operations guide."));
    }

    #[test]
    fn test_wrapped_lines_fit_content_width() {
        let config = LayoutConfig::default();
        let metrics = StandardMetrics::new();
        let text = "Deployment requires the service account token to be rotated every ninety days. ".repeat(10);
        let canvas = DocumentFormatter::new(&config, &metrics)
            .unwrap()
            .format(None, &[Section::new("Ops").with_content(text)]);
        for line in canvas.lines().skip(1) {
            assert!(metrics.measure(&line.text, line.font, line.size) <= config.content_width());
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = LayoutConfig::default().with_margin(400.0);
        let metrics = StandardMetrics::new();
        assert!(DocumentFormatter::new(&config, &metrics).is_err());
    }
}
