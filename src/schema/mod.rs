//! Structured-extraction schemas
//!
//! An [`ExtractionSchema`] is the declarative field list sent to the crawl service
//! when the caller wants structured data rather than the rendered document.
//! [`SchemaComposer`] holds the user's in-progress field drafts and derives the
//! schema from them after every edit.

mod composer;

pub use composer::{derive_schema, SchemaComposer};

use crate::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Label given to schemas built from field drafts
pub const CUSTOM_SCHEMA_NAME: &str = "Custom Extraction";

/// Base selector used when none is given
pub const DEFAULT_BASE_SELECTOR: &str = "body";

/// How the value of a matched element is extracted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Text content of the element
    #[default]
    Text,

    /// Inner HTML of the element
    Html,

    /// An attribute value of the element
    #[serde(alias = "attr")]
    Attribute,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Html => "html",
            Self::Attribute => "attribute",
        }
    }

    /// Parses a type coming from free-form input
    ///
    /// A blank value means "unset" and yields `None`; the composer later
    /// normalizes unset types to [`FieldType::Text`].
    pub fn parse_optional(value: &str) -> Result<Option<Self>, ValidationError> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(None);
        }
        value.parse().map(Some)
    }
}

impl FromStr for FieldType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "html" => Ok(Self::Html),
            "attribute" | "attr" => Ok(Self::Attribute),
            other => Err(ValidationError::UnknownFieldType(other.to_string())),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One field of a composed schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaField {
    pub name: String,
    pub selector: String,
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
}

/// A field as the user is editing it; the type may still be unset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldDraft {
    pub name: String,
    pub selector: String,
    pub field_type: Option<FieldType>,
}

impl FieldDraft {
    pub fn new(
        name: impl Into<String>,
        selector: impl Into<String>,
        field_type: Option<FieldType>,
    ) -> Self {
        Self {
            name: name.into(),
            selector: selector.into(),
            field_type,
        }
    }

    /// Builds a draft from raw input, validating the type string
    pub fn parse(name: &str, selector: &str, field_type: &str) -> Result<Self, ValidationError> {
        Ok(Self::new(name, selector, FieldType::parse_optional(field_type)?))
    }

    /// Finalizes the draft, defaulting an unset type to text
    pub fn to_field(&self) -> SchemaField {
        SchemaField {
            name: self.name.clone(),
            selector: self.selector.clone(),
            field_type: self.field_type.unwrap_or_default(),
        }
    }
}

impl From<&SchemaField> for FieldDraft {
    fn from(field: &SchemaField) -> Self {
        Self::new(field.name.clone(), field.selector.clone(), Some(field.field_type))
    }
}

/// Declarative description of the structured data to extract from a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionSchema {
    pub name: String,
    #[serde(default = "default_base_selector")]
    pub base_selector: String,
    #[serde(default)]
    pub fields: Vec<SchemaField>,
}

impl ExtractionSchema {
    /// Builds the custom schema wrapping the given fields
    pub fn custom(fields: Vec<SchemaField>) -> Self {
        Self {
            name: CUSTOM_SCHEMA_NAME.to_string(),
            base_selector: DEFAULT_BASE_SELECTOR.to_string(),
            fields,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Form the schema takes inside a request: a schema without fields is no schema
    pub fn collapse(self) -> Option<Self> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

fn default_base_selector() -> String {
    DEFAULT_BASE_SELECTOR.to_string()
}
