//! PDF Content Stream Generation
//!
//! Builder for page content streams. Only the operators needed for placed
//! text are provided:
//!
//! - `q`/`Q`: save/restore graphics state
//! - `rg`: set RGB fill colour
//! - `BT`/`ET`: begin/end text object
//! - `Tf`: set font and size
//! - `Tm`: set text matrix (absolute positioning)
//! - `Tj`: show a string

use super::objects::{format_real, write_literal};
use text_engine::encode_win_ansi;

/// Content stream builder
#[derive(Debug, Default)]
pub struct ContentStream {
    data: Vec<u8>,
}

impl ContentStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Save the graphics state (q)
    pub fn save_state(&mut self) -> &mut Self {
        self.op("q")
    }

    /// Restore the graphics state (Q)
    pub fn restore_state(&mut self) -> &mut Self {
        self.op("Q")
    }

    /// Set the fill colour (rg)
    pub fn set_fill_rgb(&mut self, r: f64, g: f64, b: f64) -> &mut Self {
        let line = format!("{} {} {} rg", format_real(r), format_real(g), format_real(b));
        self.op(&line)
    }

    /// Begin a text object (BT)
    pub fn begin_text(&mut self) -> &mut Self {
        self.op("BT")
    }

    /// End a text object (ET)
    pub fn end_text(&mut self) -> &mut Self {
        self.op("ET")
    }

    /// Select a font resource and size (Tf)
    pub fn set_font(&mut self, resource: &str, size: f64) -> &mut Self {
        let line = format!("/{} {} Tf", resource, format_real(size));
        self.op(&line)
    }

    /// Place the text origin at `(x, y)` with an identity matrix (Tm)
    pub fn set_text_position(&mut self, x: f64, y: f64) -> &mut Self {
        let line = format!("1 0 0 1 {} {} Tm", format_real(x), format_real(y));
        self.op(&line)
    }

    /// Show a string (Tj), WinAnsi-encoded
    pub fn show_text(&mut self, text: &str) -> &mut Self {
        write_literal(&mut self.data, &encode_win_ansi(text));
        self.op(" Tj")
    }

    fn op(&mut self, line: &str) -> &mut Self {
        self.data.extend_from_slice(line.as_bytes());
        self.data.push(b'\n');
        self
    }
}
