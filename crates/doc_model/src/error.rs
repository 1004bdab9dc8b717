//! Error types for document model operations

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocModelError {
    #[error("Invalid manual JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Invalid manual: {0}")]
    InvalidManual(String),
}

pub type Result<T> = std::result::Result<T, DocModelError>;
