//! HTTP Client port

use std::future::Future;
use std::pin::Pin;

use apicheck_domain::{OutgoingRequest, ResponseSpec};
use thiserror::Error;

/// Future returned by [`HttpClient::execute`].
pub type ResponseFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ResponseSpec, HttpClientError>> + Send + 'a>>;

/// Port for executing HTTP requests.
///
/// This trait abstracts the HTTP client implementation, allowing
/// the application layer to be independent of specific HTTP libraries.
pub trait HttpClient: Send + Sync {
    /// Builds and sends one request and returns the response.
    ///
    /// # Errors
    ///
    /// Returns a construction error (see [`HttpClientError::is_construction`])
    /// when the request cannot be built, and a transport error when the
    /// round trip fails.
    fn execute(&self, request: &OutgoingRequest) -> ResponseFuture<'_>;
}

/// Errors reported by an [`HttpClient`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HttpClientError {
    /// The method token is not a valid HTTP method.
    #[error("invalid HTTP method: {0}")]
    InvalidMethod(String),

    /// The URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request could not be assembled (e.g. an invalid header value).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Nothing is listening on the target address.
    #[error("connection refused: {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// The connection could not be established or was dropped.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The response body could not be read.
    #[error("failed to read response body: {0}")]
    Body(String),

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

impl HttpClientError {
    /// Returns true if the request was rejected before anything was sent.
    #[must_use]
    pub const fn is_construction(&self) -> bool {
        matches!(
            self,
            Self::InvalidMethod(_) | Self::InvalidUrl(_) | Self::InvalidRequest(_)
        )
    }
}
