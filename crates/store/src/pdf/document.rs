//! PDF Document Structure
//!
//! Catalog, page tree and document information dictionaries.

use super::objects::{PdfDictionary, PdfObject};
use serde::{Deserialize, Serialize};
use text_engine::encode_win_ansi;

/// PDF version written in the file header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PdfVersion {
    #[default]
    #[serde(rename = "1.4")]
    V1_4,
    #[serde(rename = "1.5")]
    V1_5,
    #[serde(rename = "1.7")]
    V1_7,
}

impl PdfVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            PdfVersion::V1_4 => "1.4",
            PdfVersion::V1_5 => "1.5",
            PdfVersion::V1_7 => "1.7",
        }
    }
}

/// Document information dictionary contents
#[derive(Debug, Clone, Default)]
pub struct DocumentInfo {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub keywords: Vec<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    /// PDF date string (`D:YYYYMMDDHHmmSS+00'00'`)
    pub creation_date: Option<String>,
}

impl DocumentInfo {
    pub fn new() -> Self {
        Self {
            creator: Some("repodocs".to_string()),
            producer: Some(concat!("repodocs ", env!("CARGO_PKG_VERSION")).to_string()),
            ..Default::default()
        }
    }

    pub fn to_dictionary(&self) -> PdfDictionary {
        let mut dict = PdfDictionary::new();
        let mut text = |key: &str, value: &str| {
            dict.insert(key, PdfObject::string(encode_win_ansi(value)));
        };

        if let Some(title) = &self.title {
            text("Title", title);
        }
        if let Some(author) = &self.author {
            text("Author", author);
        }
        if let Some(subject) = &self.subject {
            text("Subject", subject);
        }
        if !self.keywords.is_empty() {
            text("Keywords", &self.keywords.join(", "));
        }
        if let Some(creator) = &self.creator {
            text("Creator", creator);
        }
        if let Some(producer) = &self.producer {
            text("Producer", producer);
        }
        if let Some(date) = &self.creation_date {
            text("CreationDate", date);
        }
        dict
    }
}

/// Format a timestamp as a PDF date string
pub fn pdf_date(time: chrono::DateTime<chrono::Utc>) -> String {
    time.format("D:%Y%m%d%H%M%S+00'00'").to_string()
}

/// Document catalog pointing at the page tree
pub fn create_catalog(pages_ref: u32) -> PdfDictionary {
    let mut catalog = PdfDictionary::typed("Catalog");
    catalog.insert("Pages", PdfObject::Reference(pages_ref));
    catalog
}

/// Flat page tree over `page_refs`
pub fn create_pages(page_refs: &[u32]) -> PdfDictionary {
    let mut pages = PdfDictionary::typed("Pages");
    let kids = page_refs.iter().map(|r| PdfObject::Reference(*r)).collect::<Vec<_>>();
    pages.insert("Kids", kids);
    pages.insert("Count", page_refs.len());
    pages
}
