//! HTTP fetcher backed by reqwest

use super::{Fetch, FetchResponse, TransportError};
use crate::error::{ResolverError, Result};
use reqwest::Client;
use std::time::Duration;

/// Client settings for [`HttpFetcher`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpOptions {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: concat!("asset-resolver/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Fetches asset bytes over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a new fetcher
    pub fn new(options: &HttpOptions) -> Result<Self> {
        let client = Client::builder()
            .timeout(options.timeout)
            .user_agent(options.user_agent.as_str())
            .build()
            .map_err(|e| ResolverError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

fn classify(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout
    } else if error.is_connect() {
        TransportError::Connect(error.to_string())
    } else {
        TransportError::Request(error.to_string())
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> std::result::Result<FetchResponse, TransportError> {
        let response = self.client.get(url).send().await.map_err(classify)?;
        let status = response.status().as_u16();

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout
            } else {
                TransportError::Body(e.to_string())
            }
        })?;

        log::trace!("GET {} -> {} ({} bytes)", url, status, body.len());
        Ok(FetchResponse::new(status, body.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_fetcher_creation() {
        let fetcher = HttpFetcher::new(&HttpOptions::default());
        assert!(fetcher.is_ok());
    }

    #[test]
    fn test_default_user_agent() {
        let options = HttpOptions::default();
        assert!(options.user_agent.starts_with("asset-resolver/"));
        assert_eq!(options.timeout, Duration::from_secs(30));
    }
}
