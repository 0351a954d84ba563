//! HTTP client for the quote and groups pages
//!
//! Anonymous GET requests only: no cookie store, no credentials. Every
//! request is bounded by the configured timeout and can be abandoned early
//! through a cancellation token.

use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{
    Client,
    header::{HeaderMap, HeaderValue, USER_AGENT},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::infrastructure::config::defaults;

/// The two upstream pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    Quote,
    Groups,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quote => f.write_str("quote"),
            Self::Groups => f.write_str("groups"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("{endpoint} fetch failed with status {status}: {url}")]
    Status {
        endpoint: Endpoint,
        status: u16,
        url: String,
    },

    #[error("{endpoint} fetch timed out: {url}")]
    Timeout { endpoint: Endpoint, url: String },

    #[error("{endpoint} fetch failed: {message} ({url})")]
    Network {
        endpoint: Endpoint,
        message: String,
        url: String,
    },

    #[error("{endpoint} fetch cancelled: {url}")]
    Cancelled { endpoint: Endpoint, url: String },
}

impl FetchError {
    pub const fn endpoint(&self) -> Endpoint {
        match self {
            Self::Status { endpoint, .. }
            | Self::Timeout { endpoint, .. }
            | Self::Network { endpoint, .. }
            | Self::Cancelled { endpoint, .. } => *endpoint,
        }
    }

    /// HTTP status as text, or `timeout` / `network` / `cancelled`
    pub fn code(&self) -> String {
        match self {
            Self::Status { status, .. } => status.to_string(),
            Self::Timeout { .. } => "timeout".to_string(),
            Self::Network { .. } => "network".to_string(),
            Self::Cancelled { .. } => "cancelled".to_string(),
        }
    }

    fn from_reqwest(endpoint: Endpoint, url: &str, error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout {
                endpoint,
                url: url.to_string(),
            }
        } else if let Some(status) = error.status() {
            Self::Status {
                endpoint,
                status: status.as_u16(),
                url: url.to_string(),
            }
        } else {
            Self::Network {
                endpoint,
                message: error.to_string(),
                url: url.to_string(),
            }
        }
    }
}

/// Source of page bodies for the query pipeline
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// GET `url` and return its body as text; non-2xx is an error
    async fn fetch_text(
        &self,
        endpoint: Endpoint,
        url: &str,
        cancellation_token: &CancellationToken,
    ) -> Result<String, FetchError>;
}

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpClientConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub follow_redirects: bool,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::USER_AGENT.to_string(),
            timeout_seconds: defaults::REQUEST_TIMEOUT_SECONDS,
            follow_redirects: true,
        }
    }
}

/// `reqwest`-backed page fetcher
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration
    pub fn new(config: &HttpClientConfig) -> Result<Self> {
        anyhow::ensure!(config.timeout_seconds > 0, "Request timeout must be greater than 0");

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).context("Invalid user agent")?,
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .redirect(if config.follow_redirects {
                reqwest::redirect::Policy::limited(10)
            } else {
                reqwest::redirect::Policy::none()
            })
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpClient {
    async fn fetch_text(
        &self,
        endpoint: Endpoint,
        url: &str,
        cancellation_token: &CancellationToken,
    ) -> Result<String, FetchError> {
        let cancelled = || FetchError::Cancelled {
            endpoint,
            url: url.to_string(),
        };

        if cancellation_token.is_cancelled() {
            return Err(cancelled());
        }

        tracing::info!("Fetching {} page: {}", endpoint, url);

        let response = tokio::select! {
            result = self.client.get(url).send() => {
                result.map_err(|e| FetchError::from_reqwest(endpoint, url, &e))?
            },
            () = cancellation_token.cancelled() => {
                tracing::warn!("🛑 {} request cancelled: {}", endpoint, url);
                return Err(cancelled());
            }
        };

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                endpoint,
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let text = tokio::select! {
            result = response.text() => {
                result.map_err(|e| FetchError::from_reqwest(endpoint, url, &e))?
            },
            () = cancellation_token.cancelled() => {
                tracing::warn!("🛑 {} body read cancelled: {}", endpoint, url);
                return Err(cancelled());
            }
        };

        tracing::debug!("Fetched {} page: {} ({} chars)", endpoint, url, text.len());
        Ok(text)
    }
}
