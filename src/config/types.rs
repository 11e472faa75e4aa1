use serde::Deserialize;

/// Main configuration structure for Crawl Studio
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

/// Crawl service connection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the crawl service
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Whole-request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Request defaults applied under every user override
#[derive(Debug, Clone, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_true")]
    pub screenshot: bool,

    #[serde(rename = "bypass-cache", default = "default_true")]
    pub bypass_cache: bool,

    /// Strip navigation, ads and other boilerplate service-side
    #[serde(rename = "smart-mode", default = "default_true")]
    pub smart_mode: bool,

    /// Minimum words a content block needs to be kept
    #[serde(rename = "word-count-threshold", default = "default_word_count_threshold")]
    pub word_count_threshold: u32,

    #[serde(rename = "css-selector", default)]
    pub css_selector: Option<String>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            screenshot: true,
            bypass_cache: true,
            smart_mode: true,
            word_count_threshold: default_word_count_threshold(),
            css_selector: None,
        }
    }
}

/// History persistence configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryConfig {
    /// Path to the SQLite database holding the history slot
    #[serde(rename = "database-path", default = "default_database_path")]
    pub database_path: String,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_endpoint() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_true() -> bool {
    true
}

fn default_word_count_threshold() -> u32 {
    10
}

fn default_database_path() -> String {
    "./crawl-history.db".to_string()
}
