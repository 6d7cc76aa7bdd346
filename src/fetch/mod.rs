//! Network fetch capability used by the resolver
//!
//! The resolver only needs one operation: GET a URL and hand back the
//! status and the untouched body bytes. Anything that goes wrong before a
//! status is known is a [`TransportError`].

#[cfg(feature = "async")]
pub mod http;

#[cfg(feature = "async")]
pub use http::{HttpFetcher, HttpOptions};

use std::future::Future;
use thiserror::Error;

/// Errors raised below the HTTP layer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Request timed out")]
    Timeout,

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Failed to read response body: {0}")]
    Body(String),
}

/// A received HTTP response with its raw body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl FetchResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Status in `[200, 300)`
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

/// Issues one GET request per call
///
/// Implementations must return the body as raw bytes, without any text
/// decoding, and must report non-2xx statuses as responses rather than
/// errors.
pub trait Fetch: Send + Sync {
    fn fetch(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<FetchResponse, TransportError>> + Send;
}
