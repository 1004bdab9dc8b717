//! Standard font identities

use crate::TextError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Font weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontWeight {
    Normal,
    Bold,
}

/// Standard PDF fonts used for manuals.
///
/// These belong to the standard 14 set, so a PDF only needs to name them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StandardFont {
    /// Helvetica (body text)
    Helvetica,
    /// Helvetica Bold (titles and headings)
    HelveticaBold,
}

impl StandardFont {
    /// All supported faces
    pub const ALL: [StandardFont; 2] = [StandardFont::Helvetica, StandardFont::HelveticaBold];

    /// The PDF base font name
    pub fn pdf_name(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Font encoding written into the font dictionary
    pub fn encoding(&self) -> &'static str {
        "WinAnsiEncoding"
    }

    /// Weight of this face
    pub fn weight(&self) -> FontWeight {
        match self {
            StandardFont::Helvetica => FontWeight::Normal,
            StandardFont::HelveticaBold => FontWeight::Bold,
        }
    }

    /// Pick the face for a weight
    pub fn for_weight(weight: FontWeight) -> Self {
        match weight {
            FontWeight::Normal => StandardFont::Helvetica,
            FontWeight::Bold => StandardFont::HelveticaBold,
        }
    }
}

impl fmt::Display for StandardFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pdf_name())
    }
}

impl FromStr for StandardFont {
    type Err = TextError;

    /// Parse a PDF base font name, case-insensitively
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        StandardFont::ALL
            .into_iter()
            .find(|font| font.pdf_name().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| TextError::FontNotFound(name.to_string()))
    }
}

impl TryFrom<String> for StandardFont {
    type Error = TextError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

impl From<StandardFont> for String {
    fn from(font: StandardFont) -> Self {
        font.pdf_name().to_string()
    }
}
