//! View mode policy
//!
//! A result can be shown as the raw rendered document (markdown) or as
//! structured data (JSON). The default depends on whether the request carried
//! a natural-language instruction; the user may switch at any time.

use crate::client::CrawlResult;
use crate::request::CrawlRequest;
use std::fmt;
use std::str::FromStr;

/// Placeholder shown in raw mode when the service returned no markdown
pub const EMPTY_MARKDOWN_PLACEHOLDER: &str = "No markdown returned.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewMode {
    /// Extracted / structured payload as JSON
    Structured,

    /// The document's markdown rendering
    Raw,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Structured => "structured",
            Self::Raw => "raw",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "structured" | "json" => Ok(Self::Structured),
            "raw" | "markdown" => Ok(Self::Raw),
            other => Err(format!("unknown view mode '{}'", other)),
        }
    }
}

/// Default mode for a result produced by `request`
pub fn default_mode(request: &CrawlRequest) -> ViewMode {
    if request.has_instruction() {
        ViewMode::Structured
    } else {
        ViewMode::Raw
    }
}

/// Text shown for `result` in the given mode
///
/// Structured mode prefers `extracted_content` and falls back to the whole
/// result envelope.
pub fn render(result: &CrawlResult, mode: ViewMode) -> String {
    match mode {
        ViewMode::Raw => {
            if result.markdown.is_empty() {
                EMPTY_MARKDOWN_PLACEHOLDER.to_string()
            } else {
                result.markdown.clone()
            }
        }
        ViewMode::Structured => {
            let rendered = match &result.extracted_content {
                Some(content) => serde_json::to_string_pretty(content),
                None => serde_json::to_string_pretty(result),
            };
            rendered.unwrap_or_else(|e| format!("<unrenderable result: {}>", e))
        }
    }
}
