//! Document Model - Documentation sections and block classification
//!
//! This crate provides the input model for manual export: an ordered list of
//! documentation sections, each carrying raw markdown-like content, and the
//! classifier that turns one content line into a typed block.

mod block;
mod error;
mod manual;
mod section;

pub use block::*;
pub use error::*;
pub use manual::*;
pub use section::*;
