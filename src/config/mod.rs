//! Configuration module for Crawl Studio
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use crawl_studio::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawl-studio.toml")).unwrap();
//! println!("Crawl service: {}", config.service.endpoint);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, DefaultsConfig, HistoryConfig, ServiceConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;

use crate::request::RequestDefaults;

impl From<&DefaultsConfig> for RequestDefaults {
    fn from(config: &DefaultsConfig) -> Self {
        Self {
            screenshot: config.screenshot,
            bypass_cache: config.bypass_cache,
            smart_mode: config.smart_mode,
            word_count_threshold: config.word_count_threshold,
            css_selector: config.css_selector.clone(),
        }
    }
}

impl Config {
    /// Request defaults described by the `[defaults]` section
    pub fn request_defaults(&self) -> RequestDefaults {
        RequestDefaults::from(&self.defaults)
    }
}
