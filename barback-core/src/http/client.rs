//! HTTP client trait and implementations.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::CatalogError;

use super::host_of;
use super::rate_limiter::RateLimiter;

/// Trait for HTTP clients, enabling mockability in tests.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// GET a URL and return the body as text. Non-2xx responses are errors.
    async fn get_text(&self, url: &str) -> Result<String, CatalogError>;
}

/// Configuration for ReqwestClient.
#[derive(Clone)]
pub struct ReqwestClientBuilder {
    rate_limit_ms: u64,
    timeout: Duration,
    user_agent: String,
}

impl Default for ReqwestClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReqwestClientBuilder {
    pub fn new() -> Self {
        Self {
            rate_limit_ms: 0,
            timeout: Duration::from_secs(30),
            user_agent: format!("barback/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Minimum delay between requests to the same host. 0 disables rate limiting.
    pub fn rate_limit_ms(mut self, ms: u64) -> Self {
        self.rate_limit_ms = ms;
        self
    }

    /// Per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }

    pub fn build(self) -> Result<ReqwestClient, CatalogError> {
        let inner = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .build()?;

        Ok(ReqwestClient {
            inner: Arc::new(inner),
            rate_limiter: RateLimiter::new(Duration::from_millis(self.rate_limit_ms)),
        })
    }
}

/// Production HTTP client with per-host rate limiting.
pub struct ReqwestClient {
    /// Shared reqwest client for connection pooling.
    inner: Arc<reqwest::Client>,
    rate_limiter: RateLimiter,
}

impl ReqwestClient {
    pub fn new() -> Result<Self, CatalogError> {
        ReqwestClientBuilder::new().build()
    }

    pub fn builder() -> ReqwestClientBuilder {
        ReqwestClientBuilder::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get_text(&self, url: &str) -> Result<String, CatalogError> {
        let parsed = reqwest::Url::parse(url).map_err(|e| CatalogError::InvalidUrl(e.to_string()))?;

        if let Some(host) = host_of(url) {
            self.rate_limiter.wait(&host).await;
        }

        tracing::debug!(url, "network: fetching");
        let response = self.inner.get(parsed).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(url, status = %status, "network: request failed");
            return Err(CatalogError::Upstream {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        tracing::debug!(url, status = %status, bytes = body.len(), "network: fetched");
        Ok(body)
    }
}

/// Mock response for testing.
#[derive(Clone)]
pub enum MockResponse {
    Body(String),
    Status(u16),
    NetworkError(String),
}

/// Mock HTTP client for testing. Records every requested URL.
pub struct MockClient {
    responses: HashMap<String, MockResponse>,
    requests: Mutex<Vec<String>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_response(mut self, url: &str, response: MockResponse) -> Self {
        self.responses.insert(url.to_string(), response);
        self
    }

    pub fn with_body(self, url: &str, body: &str) -> Self {
        self.with_response(url, MockResponse::Body(body.to_string()))
    }

    pub fn with_status(self, url: &str, status: u16) -> Self {
        self.with_response(url, MockResponse::Status(status))
    }

    pub fn with_network_error(self, url: &str, error: &str) -> Self {
        self.with_response(url, MockResponse::NetworkError(error.to_string()))
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

impl Default for MockClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for MockClient {
    async fn get_text(&self, url: &str) -> Result<String, CatalogError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }

        match self.responses.get(url) {
            Some(MockResponse::Body(body)) => Ok(body.clone()),
            Some(MockResponse::Status(status)) => Err(CatalogError::Upstream { status: *status }),
            Some(MockResponse::NetworkError(e)) => Err(CatalogError::Network(e.clone())),
            None => Err(CatalogError::Upstream { status: 404 }),
        }
    }
}
