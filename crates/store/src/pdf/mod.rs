//! PDF Export Module
//!
//! Serializes a laid-out [`Canvas`](layout_engine::Canvas) to a PDF file.
//!
//! # Architecture
//!
//! - `objects`: PDF object model and serializer
//! - `content`: Content stream operators for placed text
//! - `fonts`: Standard Type1 font resources
//! - `document`: Catalog, page tree and info dictionary
//! - `renderer`: Converts layout pages to content streams
//! - `writer`: File structure, cross-reference table and compression
//! - `options`: PDF export configuration
//! - `api`: Public API for PDF export

mod api;
mod content;
mod document;
mod fonts;
mod objects;
mod options;
mod renderer;
mod writer;

pub use api::*;
pub use document::PdfVersion;
pub use options::*;
pub use writer::{validate_canvas, PdfError};

#[cfg(test)]
mod tests;
