//! PDF Export Options

use super::document::PdfVersion;
use serde::{Deserialize, Serialize};

/// Options for PDF export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfExportOptions {
    /// Document title
    #[serde(default)]
    pub title: Option<String>,
    /// Document author
    #[serde(default)]
    pub author: Option<String>,
    /// Document subject
    #[serde(default)]
    pub subject: Option<String>,
    /// Document keywords
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Whether to Flate-compress content streams
    #[serde(default = "default_compress")]
    pub compress: bool,
    #[serde(default)]
    pub pdf_version: PdfVersion,
}

fn default_compress() -> bool {
    true
}

impl Default for PdfExportOptions {
    fn default() -> Self {
        Self {
            title: None,
            author: None,
            subject: None,
            keywords: Vec::new(),
            compress: true,
            pdf_version: PdfVersion::default(),
        }
    }
}

impl PdfExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keywords.push(keyword.into());
        self
    }

    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    pub fn with_version(mut self, version: PdfVersion) -> Self {
        self.pdf_version = version;
        self
    }
}
