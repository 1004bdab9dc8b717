//! Glyph advance widths and text measurement
//!
//! Widths are the Adobe AFM advances for the standard Helvetica faces, in
//! 1/1000 em, indexed by WinAnsi code. Kerning is not applied: text is drawn
//! with `Tj` and no kerning adjustments, so the unkerned sum is exactly the
//! drawn width.

use crate::{encode_char, StandardFont};

/// Units per em of the AFM tables
pub const UNITS_PER_EM: f32 = 1000.0;

/// First WinAnsi code covered by the tables
const FIRST_CHAR: u8 = 32;

#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 224] = [
    // 32..=47
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 48..=63
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    // 64..=79
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    // 80..=95
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    // 96..=111
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    // 112..=127
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, 0,
    // 128..=143
    556, 0, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0,
    // 144..=159
    0, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 0, 500, 667,
    // 160..=175
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    // 176..=191
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    // 192..=207
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    // 208..=223
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    // 224..=239
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
    // 240..=255
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 224] = [
    // 32..=47
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    // 48..=63
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    // 64..=79
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    // 80..=95
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    // 96..=111
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    // 112..=127
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, 0,
    // 128..=143
    556, 0, 278, 556, 500, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0,
    // 144..=159
    0, 278, 278, 500, 500, 350, 556, 1000, 333, 1000, 556, 333, 944, 0, 500, 667,
    // 160..=175
    278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    // 176..=191
    400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    // 192..=207
    722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    // 208..=223
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    // 224..=239
    556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278,
    // 240..=255
    611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556,
];

/// Measures the rendered width of text.
///
/// Implementations must be pure: the same text, font and size always give
/// the same finite, non-negative width, and the empty string measures `0`.
pub trait TextMeasurer {
    /// Width of `text` in points when set in `font` at `size` points
    fn measure(&self, text: &str, font: StandardFont, size: f32) -> f32;
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure(&self, text: &str, font: StandardFont, size: f32) -> f32 {
        (**self).measure(text, font, size)
    }
}

/// Measurer backed by the built-in standard font metrics
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardMetrics;

impl StandardMetrics {
    /// Create a measurer
    pub fn new() -> Self {
        Self
    }

    /// Advance width of a WinAnsi code in 1/1000 em.
    ///
    /// Codes without a glyph (controls and the unassigned WinAnsi slots)
    /// measure 0.
    pub fn glyph_width(font: StandardFont, code: u8) -> u16 {
        if code < FIRST_CHAR {
            return 0;
        }
        let table = match font {
            StandardFont::Helvetica => &HELVETICA_WIDTHS,
            StandardFont::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
        };
        table[(code - FIRST_CHAR) as usize]
    }

    /// Width of `text` in 1/1000 em units, after WinAnsi substitution
    pub fn text_units(text: &str, font: StandardFont) -> u64 {
        text.chars()
            .map(|ch| u64::from(Self::glyph_width(font, encode_char(ch))))
            .sum()
    }
}

impl TextMeasurer for StandardMetrics {
    fn measure(&self, text: &str, font: StandardFont, size: f32) -> f32 {
        let size = size.max(0.0);
        if size == 0.0 || !size.is_finite() {
            return 0.0;
        }
        Self::text_units(text, font) as f32 * size / UNITS_PER_EM
    }
}
