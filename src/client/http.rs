//! HTTP crawl client
//!
//! Sends crawl requests to the service as JSON and classifies failures:
//! - transport errors and timeouts
//! - non-success HTTP statuses
//! - bodies that do not decode as a crawl result

use crate::client::{CrawlResult, CrawlService};
use crate::config::ServiceConfig;
use crate::request::CrawlRequest;
use crate::ExternalCallError;
use reqwest::Client;
use std::time::Duration;

/// Path of the crawl endpoint below the service base URL
pub const CRAWL_PATH: &str = "/api/v1/crawl";

/// Builds an HTTP client for talking to the crawl service
///
/// # Arguments
///
/// * `config` - The crawl service configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &ServiceConfig) -> Result<Client, reqwest::Error> {
    let user_agent = format!("crawl-studio/{}", env!("CARGO_PKG_VERSION"));

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .build()
}

/// Crawl service reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpCrawlClient {
    client: Client,
    endpoint: String,
}

impl HttpCrawlClient {
    /// Creates a client for the configured service
    pub fn new(config: &ServiceConfig) -> crate::Result<Self> {
        Ok(Self::with_client(build_http_client(config)?, &config.endpoint))
    }

    /// Creates a client reusing an existing reqwest client
    pub fn with_client(client: Client, base_url: &str) -> Self {
        let endpoint = format!("{}{}", base_url.trim_end_matches('/'), CRAWL_PATH);
        Self { client, endpoint }
    }

    /// Full URL of the crawl endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send(&self, request: &CrawlRequest) -> Result<CrawlResult, ExternalCallError> {
        tracing::debug!("POST {} for {}", self.endpoint, request.url);

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExternalCallError::Status {
                url: self.endpoint.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| self.classify(e))?;

        serde_json::from_str(&body).map_err(|e| ExternalCallError::Malformed {
            url: self.endpoint.clone(),
            message: e.to_string(),
        })
    }

    fn classify(&self, error: reqwest::Error) -> ExternalCallError {
        if error.is_timeout() {
            ExternalCallError::Timeout {
                url: self.endpoint.clone(),
            }
        } else {
            ExternalCallError::Http {
                url: self.endpoint.clone(),
                source: error,
            }
        }
    }
}

impl CrawlService for HttpCrawlClient {
    async fn crawl(&self, request: &CrawlRequest) -> Result<CrawlResult, ExternalCallError> {
        self.send(request).await
    }
}
