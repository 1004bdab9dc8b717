//! Block classification for markdown-like content lines
//!
//! Each content line is classified on its own into one [`Block`]. Markers are
//! prefix-ambiguous (`#` is a prefix of `##`, which is a prefix of `###`), so
//! the patterns are tested in a fixed order, longest heading marker first:
//!
//! 1. `###` (or more) + whitespace → heading level 3
//! 2. `##` + whitespace → heading level 2
//! 3. `#` + whitespace → heading level 1
//! 4. `-` + whitespace → bullet item
//! 5. digits + `.` + whitespace → ordered item (numeral kept verbatim)
//! 6. empty or whitespace-only → blank line
//! 7. anything else → paragraph
//!
//! "Whitespace" after a marker is any Unicode whitespace, the same set
//! `str::trim` strips.
//!
//! Classification is total: every string maps to exactly one block.

use regex_lite::Regex;
use std::sync::OnceLock;

/// Heading levels recognised in section content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HeadingLevel {
    /// `# heading`
    H1,
    /// `## heading`
    H2,
    /// `### heading`
    H3,
}

impl HeadingLevel {
    /// Numeric level (1-3)
    pub fn level(&self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }
}

/// A classified content line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block<'a> {
    /// Heading with its marker removed
    Heading { level: HeadingLevel, text: &'a str },
    /// `- item` with the marker removed
    BulletItem { text: &'a str },
    /// `7. item`; `index` is the numeral exactly as written
    OrderedItem { index: &'a str, text: &'a str },
    /// Empty or whitespace-only line
    BlankLine,
    /// Any other line, trimmed
    Paragraph { text: &'a str },
}

struct Patterns {
    heading: Regex,
    bullet: Regex,
    ordered: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        heading: Regex::new(r"^#+").expect("heading pattern"),
        bullet: Regex::new(r"^-").expect("bullet pattern"),
        ordered: Regex::new(r"^(\d+)\.").expect("ordered pattern"),
    })
}

/// Text after a marker ending at `end`, if the marker is followed by whitespace
fn after_marker(line: &str, end: usize) -> Option<&str> {
    let rest = &line[end..];
    rest.starts_with(char::is_whitespace).then(|| rest.trim_start())
}

impl<'a> Block<'a> {
    /// Classify a single content line.
    ///
    /// Leading and trailing whitespace is ignored.
    pub fn classify(line: &'a str) -> Block<'a> {
        let line = line.trim();
        let patterns = patterns();

        if let Some(marker) = patterns.heading.find(line) {
            if let Some(text) = after_marker(line, marker.end()) {
                let level = match marker.len() {
                    1 => HeadingLevel::H1,
                    2 => HeadingLevel::H2,
                    _ => HeadingLevel::H3,
                };
                return Block::Heading { level, text };
            }
        }

        if let Some(marker) = patterns.bullet.find(line) {
            if let Some(text) = after_marker(line, marker.end()) {
                return Block::BulletItem { text };
            }
        }

        if let Some(caps) = patterns.ordered.captures(line) {
            if let (Some(index), Some(marker)) = (caps.get(1), caps.get(0)) {
                if let Some(text) = after_marker(line, marker.end()) {
                    return Block::OrderedItem {
                        index: index.as_str(),
                        text,
                    };
                }
            }
        }

        if line.is_empty() {
            return Block::BlankLine;
        }

        Block::Paragraph { text: line }
    }

    /// The text carried by the block, if any
    pub fn text(&self) -> Option<&'a str> {
        match *self {
            Block::Heading { text, .. }
            | Block::BulletItem { text }
            | Block::OrderedItem { text, .. }
            | Block::Paragraph { text } => Some(text),
            Block::BlankLine => None,
        }
    }

    /// Whether this is a heading block
    pub fn is_heading(&self) -> bool {
        matches!(self, Block::Heading { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_heading_precedence() {
        assert_eq!(
            Block::classify("### Heading"),
            Block::Heading {
                level: HeadingLevel::H3,
                text: "Heading"
            }
        );
        assert_eq!(
            Block::classify("## Heading"),
            Block::Heading {
                level: HeadingLevel::H2,
                text: "Heading"
            }
        );
        assert_eq!(
            Block::classify("# Heading"),
            Block::Heading {
                level: HeadingLevel::H1,
                text: "Heading"
            }
        );
    }

    #[test]
    fn test_deep_heading_is_level_three() {
        assert_eq!(
            Block::classify("##### Deep"),
            Block::Heading {
                level: HeadingLevel::H3,
                text: "Deep"
            }
        );
    }

    #[test]
    fn test_marker_without_space_is_paragraph() {
        assert_eq!(
            Block::classify("#hashtag"),
            Block::Paragraph { text: "#hashtag" }
        );
        assert_eq!(Block::classify("-dash"), Block::Paragraph { text: "-dash" });
        assert_eq!(Block::classify("3.14"), Block::Paragraph { text: "3.14" });
        // a bare marker is trimmed down to the marker itself
        assert_eq!(Block::classify("###   "), Block::Paragraph { text: "###" });
    }

    #[test]
    fn test_unicode_whitespace_after_marker() {
        assert_eq!(
            Block::classify("#\u{00A0}Title"),
            Block::Heading {
                level: HeadingLevel::H1,
                text: "Title"
            }
        );
        assert_eq!(
            Block::classify("###\u{2003}Deep"),
            Block::Heading {
                level: HeadingLevel::H3,
                text: "Deep"
            }
        );
        assert_eq!(
            Block::classify("-\u{2003}item"),
            Block::BulletItem { text: "item" }
        );
        assert_eq!(
            Block::classify("3.\u{3000}step"),
            Block::OrderedItem {
                index: "3",
                text: "step"
            }
        );
    }

    #[test]
    fn test_bullet() {
        assert_eq!(
            Block::classify("  - item one  "),
            Block::BulletItem { text: "item one" }
        );
    }

    #[test]
    fn test_ordered_numeral_kept() {
        assert_eq!(
            Block::classify("7. do thing"),
            Block::OrderedItem {
                index: "7",
                text: "do thing"
            }
        );
        assert_eq!(
            Block::classify("042.\tpadded"),
            Block::OrderedItem {
                index: "042",
                text: "padded"
            }
        );
    }

    #[test]
    fn test_blank() {
        assert_eq!(Block::classify(""), Block::BlankLine);
        assert_eq!(Block::classify(" \t "), Block::BlankLine);
        assert_eq!(Block::BlankLine.text(), None);
    }

    #[test]
    fn test_paragraph_trimmed() {
        let block = Block::classify("   Plain text here.  ");
        assert_eq!(block, Block::Paragraph { text: "Plain text here." });
        assert!(!block.is_heading());
    }

    #[test]
    fn test_heading_level_numbers() {
        assert_eq!(HeadingLevel::H1.level(), 1);
        assert_eq!(HeadingLevel::H2.level(), 2);
        assert_eq!(HeadingLevel::H3.level(), 3);
    }

    proptest! {
        #[test]
        fn classify_is_total(line in "\\PC*") {
            let block = Block::classify(&line);
            prop_assert_eq!(block == Block::BlankLine, line.trim().is_empty());
        }

        #[test]
        fn block_text_is_substring_of_line(line in "[#\\- 0-9.a-z]{0,40}") {
            if let Some(text) = Block::classify(&line).text() {
                prop_assert!(line.contains(text));
            }
        }
    }
}
