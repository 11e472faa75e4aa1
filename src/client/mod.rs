//! Crawl service client
//!
//! This module contains the contract with the remote crawl service:
//! - `CrawlResult`: the response envelope
//! - `CrawlService`: the trait the session drives
//! - `HttpCrawlClient`: the reqwest-backed implementation

mod http;

pub use http::{build_http_client, HttpCrawlClient, CRAWL_PATH};

use crate::request::CrawlRequest;
use crate::ExternalCallError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::future::Future;

/// Media type assumed for screenshots that arrive without a data-URI prefix
pub const DEFAULT_SCREENSHOT_PREFIX: &str = "data:image/png;base64,";

/// Generic message shown when the service reports failure without details
pub const GENERIC_CRAWL_FAILURE: &str = "Crawl failed";

/// Outcome of one crawl attempt as reported by the service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrawlResult {
    #[serde(default)]
    pub markdown: String,

    #[serde(default)]
    pub html: Option<String>,

    /// Raw base64, or already a `data:image/...` URI
    #[serde(default)]
    pub screenshot_base64: Option<String>,

    #[serde(default)]
    pub metadata: Map<String, Value>,

    /// Structured payload produced by an instruction or extraction schema
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_content: Option<Value>,

    pub success: bool,

    #[serde(default)]
    pub error_message: Option<String>,
}

impl CrawlResult {
    /// Screenshot as a displayable data URI
    ///
    /// Payloads already carrying a `data:image` prefix are returned unchanged;
    /// bare base64 is assumed to be PNG.
    pub fn screenshot_data_uri(&self) -> Option<String> {
        let raw = self.screenshot_base64.as_deref()?;
        if raw.is_empty() {
            return None;
        }
        if raw.starts_with("data:image") {
            Some(raw.to_string())
        } else {
            Some(format!("{}{}", DEFAULT_SCREENSHOT_PREFIX, raw))
        }
    }

    /// Message to show for an unsuccessful result
    pub fn failure_message(&self) -> String {
        self.error_message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(GENERIC_CRAWL_FAILURE)
            .to_string()
    }
}

/// The external crawl interface
///
/// Implementations send one request and return the service's envelope, or an
/// [`ExternalCallError`] when the call itself fails.
pub trait CrawlService {
    fn crawl(
        &self,
        request: &CrawlRequest,
    ) -> impl Future<Output = Result<CrawlResult, ExternalCallError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screenshot_prefixed_when_bare() {
        let result = CrawlResult {
            screenshot_base64: Some("iVBORw0KGgo=".to_string()),
            ..CrawlResult::default()
        };
        assert_eq!(
            result.screenshot_data_uri().as_deref(),
            Some("data:image/png;base64,iVBORw0KGgo=")
        );
    }

    #[test]
    fn test_screenshot_kept_when_prefixed() {
        let result = CrawlResult {
            screenshot_base64: Some("data:image/jpeg;base64,/9j/4AAQ".to_string()),
            ..CrawlResult::default()
        };
        assert_eq!(
            result.screenshot_data_uri().as_deref(),
            Some("data:image/jpeg;base64,/9j/4AAQ")
        );
    }

    #[test]
    fn test_screenshot_absent() {
        assert_eq!(CrawlResult::default().screenshot_data_uri(), None);

        let empty = CrawlResult {
            screenshot_base64: Some(String::new()),
            ..CrawlResult::default()
        };
        assert_eq!(empty.screenshot_data_uri(), None);
    }

    #[test]
    fn test_failure_message() {
        let mut result = CrawlResult::default();
        assert_eq!(result.failure_message(), "Crawl failed");

        result.error_message = Some("DNS lookup failed".to_string());
        assert_eq!(result.failure_message(), "DNS lookup failed");
    }

    #[test]
    fn test_decode_minimal_envelope() {
        let result: CrawlResult =
            serde_json::from_str(r##"{"success":true,"markdown":"# Hello"}"##).unwrap();
        assert!(result.success);
        assert_eq!(result.markdown, "# Hello");
        assert!(result.metadata.is_empty());
        assert_eq!(result.html, None);

        let result: CrawlResult = serde_json::from_str(r#"{"success":false}"#).unwrap();
        assert_eq!(result.markdown, "");
    }
}
