//! PDF font resources
//!
//! Manuals only use standard Type1 faces, which viewers supply themselves, so
//! a font resource is just a small dictionary naming the base font. Each face
//! is registered once per document under a resource name (`F1`, `F2`, ...)
//! assigned in order of first use.

use super::objects::{PdfDictionary, PdfObject};
use text_engine::StandardFont;

/// A font registered in the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontResource {
    /// Resource name used with `Tf`
    pub name: String,
    pub font: StandardFont,
}

/// Assigns resource names to the fonts used by a document
#[derive(Debug, Default)]
pub struct FontRegistry {
    fonts: Vec<FontResource>,
}

impl FontRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resource name for `font`, registering it on first use
    pub fn resource_name(&mut self, font: StandardFont) -> &str {
        let index = match self.fonts.iter().position(|r| r.font == font) {
            Some(index) => index,
            None => {
                self.fonts.push(FontResource {
                    name: format!("F{}", self.fonts.len() + 1),
                    font,
                });
                self.fonts.len() - 1
            }
        };
        &self.fonts[index].name
    }

    /// Registered fonts in registration order
    pub fn fonts(&self) -> &[FontResource] {
        &self.fonts
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

/// Font dictionary for a standard Type1 face
pub fn standard_font_dict(font: StandardFont) -> PdfDictionary {
    let mut dict = PdfDictionary::typed("Font");
    dict.insert("Subtype", PdfObject::name("Type1"));
    dict.insert("BaseFont", PdfObject::name(font.pdf_name()));
    dict.insert("Encoding", PdfObject::name(font.encoding()));
    dict
}
