//! Crawl request model
//!
//! This module defines the request sent to the crawl service and the two
//! configuration layers it is composed from:
//! - `RequestDefaults`: the fixed baseline (usually from the `[defaults]` config section)
//! - `RequestOverrides`: per-session settings the user changed explicitly

mod compose;

pub use compose::compose;

use crate::schema::ExtractionSchema;
use crate::ValidationError;
use serde::{Deserialize, Serialize};

/// Configuration for one crawl attempt
///
/// Built by [`compose`]; treated as immutable once handed to the crawl service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlRequest {
    pub url: String,

    /// Natural-language extraction directive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,

    pub screenshot: bool,
    pub bypass_cache: bool,
    pub smart_mode: bool,
    pub word_count_threshold: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css_selector: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extraction_schema: Option<ExtractionSchema>,
}

impl CrawlRequest {
    /// Checks the request can be submitted
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.trim().is_empty() {
            return Err(ValidationError::EmptyUrl);
        }
        Ok(())
    }

    /// Returns true if the request carries a non-blank instruction
    pub fn has_instruction(&self) -> bool {
        self.instruction
            .as_deref()
            .map(|i| !i.trim().is_empty())
            .unwrap_or(false)
    }
}

/// Baseline values used for every field the user did not override
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDefaults {
    pub screenshot: bool,
    pub bypass_cache: bool,
    pub smart_mode: bool,
    pub word_count_threshold: u32,
    pub css_selector: Option<String>,
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            screenshot: true,
            bypass_cache: true,
            smart_mode: true,
            word_count_threshold: 10,
            css_selector: None,
        }
    }
}

/// Settings explicitly chosen by the user; `None` means "not set"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOverrides {
    pub screenshot: Option<bool>,
    pub bypass_cache: Option<bool>,
    pub smart_mode: Option<bool>,
    pub word_count_threshold: Option<u32>,
    pub css_selector: Option<String>,
    pub extraction_schema: Option<ExtractionSchema>,
}

impl RequestOverrides {
    /// Overrides reproducing every setting of a previously sent request
    pub fn from_request(request: &CrawlRequest) -> Self {
        Self {
            screenshot: Some(request.screenshot),
            bypass_cache: Some(request.bypass_cache),
            smart_mode: Some(request.smart_mode),
            word_count_threshold: Some(request.word_count_threshold),
            css_selector: request.css_selector.clone(),
            extraction_schema: request.extraction_schema.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(url: &str) -> CrawlRequest {
        compose(&RequestDefaults::default(), &RequestOverrides::default(), url, None).unwrap()
    }

    #[test]
    fn test_validate() {
        assert!(request("https://example.com").validate().is_ok());

        let mut blank = request("https://example.com");
        blank.url = "  ".to_string();
        assert_eq!(blank.validate(), Err(ValidationError::EmptyUrl));
    }

    #[test]
    fn test_has_instruction() {
        let mut req = request("https://example.com");
        assert!(!req.has_instruction());

        req.instruction = Some("   ".to_string());
        assert!(!req.has_instruction());

        req.instruction = Some("List all prices".to_string());
        assert!(req.has_instruction());
    }

    #[test]
    fn test_wire_format_omits_absent_fields() {
        let json = serde_json::to_value(request("https://example.com")).unwrap();

        assert_eq!(json["url"], "https://example.com");
        assert_eq!(json["screenshot"], true);
        assert_eq!(json["bypass_cache"], true);
        assert_eq!(json["smart_mode"], true);
        assert_eq!(json["word_count_threshold"], 10);
        assert!(json.get("instruction").is_none());
        assert!(json.get("css_selector").is_none());
        assert!(json.get("extraction_schema").is_none());
    }

    #[test]
    fn test_overrides_from_request() {
        let mut req = request("https://example.com");
        req.screenshot = false;
        req.css_selector = Some("main".to_string());

        let overrides = RequestOverrides::from_request(&req);
        assert_eq!(overrides.screenshot, Some(false));
        assert_eq!(overrides.word_count_threshold, Some(10));
        assert_eq!(overrides.css_selector.as_deref(), Some("main"));
    }
}
