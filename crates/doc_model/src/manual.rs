//! Manual input files
//!
//! A manual is a project name plus its ordered sections, as exchanged in JSON
//! by the command-line front end.

use crate::{DocModelError, Result, Section};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A project manual: optional project name and ordered sections
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manual {
    /// Project name, used for the document title line
    #[serde(default)]
    pub project_name: Option<String>,
    /// Sections in render order
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Manual {
    /// Create an empty manual for a project
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: Some(project_name.into()),
            sections: Vec::new(),
        }
    }

    /// Append a section
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Parse a manual from JSON.
    ///
    /// Accepts either a manual object (`{"projectName": ..., "sections": [...]}`)
    /// or a bare array of sections.
    pub fn from_json(json: &str) -> Result<Self> {
        match serde_json::from_str::<Value>(json)? {
            value @ Value::Object(_) => Ok(serde_json::from_value(value)?),
            value @ Value::Array(_) => Ok(Self {
                project_name: None,
                sections: serde_json::from_value(value)?,
            }),
            other => Err(DocModelError::InvalidManual(format!(
                "expected an object or an array of sections, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Serialize the manual to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
