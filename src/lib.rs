//! Crawl Studio: a client-side session and history layer for a remote crawl service
//!
//! This crate composes crawl requests from layered configuration, drives a
//! single-flight request lifecycle against the crawl service, persists successful
//! results into a capacity-bounded history, and builds structured-extraction
//! schemas that are folded into the request.

pub mod client;
pub mod config;
pub mod history;
pub mod request;
pub mod schema;
pub mod session;
pub mod view;

use thiserror::Error;

/// Main error type for Crawl Studio operations
#[derive(Debug, Error)]
pub enum StudioError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Crawl service error: {0}")]
    External(#[from] ExternalCallError),

    #[error("Storage error: {0}")]
    Storage(#[from] history::StorageError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Input rejected before anything is sent to the crawl service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("URL must not be empty")]
    EmptyUrl,

    #[error("Field index {index} out of range (schema has {len} fields)")]
    FieldIndex { index: usize, len: usize },

    #[error("Unknown field type: {0}")]
    UnknownFieldType(String),
}

/// Failures of the crawl call itself (transport, status or envelope)
#[derive(Debug, Error)]
pub enum ExternalCallError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Crawl service returned HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Malformed response from {url}: {message}")]
    Malformed { url: String, message: String },
}

/// Result type alias for Crawl Studio operations
pub type Result<T> = std::result::Result<T, StudioError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use client::{CrawlResult, CrawlService, HttpCrawlClient};
pub use config::Config;
pub use history::{HistoryCache, HistoryEntry, HISTORY_LIMIT};
pub use request::{compose, CrawlRequest, RequestDefaults, RequestOverrides};
pub use schema::{ExtractionSchema, FieldType, SchemaComposer, SchemaField};
pub use session::{Editor, SessionController, SessionState};
pub use view::{default_mode, ViewMode};
