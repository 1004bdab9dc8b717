//! Error types for layout engine

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Invalid page setup: {0}")]
    InvalidPageSetup(String),

    #[error("Invalid text style '{name}': {reason}")]
    InvalidTextStyle { name: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, LayoutError>;
