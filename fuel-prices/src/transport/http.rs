//! HTTP transport.
//!
//! Limits concurrent requests with a semaphore and applies a per-request
//! timeout. Retry and backoff are left to callers.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tracing::debug;

use super::error::TransportError;
use super::{Request, Response, ResponseShape, Transport};

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for an HTTP transport.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Base URL requests are resolved against
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl HttpConfig {
    /// Create a new config for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Transport over HTTP(S) using `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl HttpTransport {
    pub fn new(config: HttpConfig) -> Result<Self, TransportError> {
        if config.max_concurrent == 0 {
            return Err(TransportError::NotConfigured(
                "max_concurrent must be at least 1".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("fuel-prices/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Full URL for a request path.
    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Transport for HttpTransport {
    async fn send(
        &self,
        request: Request,
        shape: ResponseShape,
    ) -> Result<Response, TransportError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| TransportError::NotConfigured("semaphore closed".to_string()))?;

        let url = self.url(&request.path);
        debug!(%url, "sending request");

        let response = self.http.get(&url).query(&request.query).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(TransportError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TransportError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let bytes = response.bytes().await?;
        Response::decode(bytes.to_vec(), shape)
    }
}
