//! Layout Engine - Line wrapping, pagination, and block formatting
//!
//! This crate lays documentation sections out onto fixed-size pages. The
//! pipeline runs in one direction: sections are classified into blocks,
//! block text is wrapped against measured glyph widths, and the wrapped lines
//! are placed through a single cursor that starts a new page whenever the
//! next line would cross the bottom margin.

mod config;
mod error;
mod formatter;
mod line_breaker;
mod paginator;

pub use config::*;
pub use error::*;
pub use formatter::*;
pub use line_breaker::*;
pub use paginator::*;
