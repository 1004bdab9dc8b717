//! Text Engine - Standard fonts, encoding, and text measurement
//!
//! Manuals are typeset with the PDF standard Helvetica faces, which every
//! viewer ships, so no font files are loaded or embedded. Glyph advances come
//! from the Adobe font metrics compiled into this crate.
//!
//! # Modules
//!
//! - `font`: Standard font identities
//! - `encoding`: WinAnsi encoding of text for PDF output
//! - `metrics`: Glyph advance tables and the text measurer

mod encoding;
mod error;
mod font;
mod metrics;

pub use encoding::*;
pub use error::*;
pub use font::*;
pub use metrics::*;
