//! Error types for storage and export operations

use crate::pdf::PdfError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Layout error: {0}")]
    Layout(#[from] layout_engine::LayoutError),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Machine-readable artifact storage failure codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StorageErrorCode {
    UploadFailed,
    DownloadFailed,
    SignedUrlFailed,
    DeleteFailed,
    InvalidBucket,
    FileTooLarge,
}

impl StorageErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageErrorCode::UploadFailed => "UPLOAD_FAILED",
            StorageErrorCode::DownloadFailed => "DOWNLOAD_FAILED",
            StorageErrorCode::SignedUrlFailed => "SIGNED_URL_FAILED",
            StorageErrorCode::DeleteFailed => "DELETE_FAILED",
            StorageErrorCode::InvalidBucket => "INVALID_BUCKET",
            StorageErrorCode::FileTooLarge => "FILE_TOO_LARGE",
        }
    }
}

/// Failure reported by an artifact store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct StorageError {
    pub code: StorageErrorCode,
    pub message: String,
}

impl StorageError {
    pub fn new(code: StorageErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn upload_failed(reason: impl std::fmt::Display) -> Self {
        Self::new(StorageErrorCode::UploadFailed, format!("Upload failed: {reason}"))
    }

    pub fn download_failed(reason: impl std::fmt::Display) -> Self {
        Self::new(StorageErrorCode::DownloadFailed, format!("Download failed: {reason}"))
    }

    pub fn signed_url_failed(reason: impl std::fmt::Display) -> Self {
        Self::new(
            StorageErrorCode::SignedUrlFailed,
            format!("Failed to create signed URL: {reason}"),
        )
    }

    pub fn delete_failed(reason: impl std::fmt::Display) -> Self {
        Self::new(StorageErrorCode::DeleteFailed, format!("Delete failed: {reason}"))
    }

    pub fn invalid_bucket(bucket: &str) -> Self {
        Self::new(StorageErrorCode::InvalidBucket, format!("Invalid bucket: {bucket}"))
    }

    pub fn file_too_large(limit: u64) -> Self {
        Self::new(
            StorageErrorCode::FileTooLarge,
            format!("File too large. Max size: {limit} bytes"),
        )
    }
}

/// Failure reported by the session or document repository backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct RepositoryError(pub String);

impl RepositoryError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// User-facing export failure, mapped onto an HTTP-style status and a stable
/// error code
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("{message}")]
    BadRequest { code: &'static str, message: String },

    #[error("Project not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("{message}")]
    Storage {
        code: StorageErrorCode,
        message: String,
    },

    #[error("PDF generation failed: {0}")]
    Render(#[from] PdfError),
}

impl ExportError {
    pub fn missing_project_id() -> Self {
        ExportError::BadRequest {
            code: "MISSING_PROJECT_ID",
            message: "Missing projectId".to_string(),
        }
    }

    pub fn status(&self) -> u16 {
        match self {
            ExportError::Unauthorized => 401,
            ExportError::BadRequest { .. } => 400,
            ExportError::NotFound => 404,
            ExportError::Database(_) | ExportError::Storage { .. } | ExportError::Render(_) => 500,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ExportError::Unauthorized => "AUTH_REQUIRED",
            ExportError::BadRequest { code, .. } => *code,
            ExportError::NotFound => "NOT_FOUND",
            ExportError::Database(_) => "DATABASE_ERROR",
            ExportError::Storage { code, .. } => code.as_str(),
            ExportError::Render(_) => "PDF_RENDER_FAILED",
        }
    }

    /// JSON body returned to the caller
    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.to_string(),
            code: self.code().to_string(),
        }
    }
}

impl From<StorageError> for ExportError {
    fn from(err: StorageError) -> Self {
        ExportError::Storage {
            code: err.code,
            message: err.message,
        }
    }
}

impl From<RepositoryError> for ExportError {
    fn from(err: RepositoryError) -> Self {
        ExportError::Database(err.0)
    }
}

/// Serialized form of an [`ExportError`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: String,
}
