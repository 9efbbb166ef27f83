//! The concrete request handed to the transport.

/// A resolved request: absolute URL, encoded body and optional headers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutgoingRequest {
    /// HTTP method token
    pub method: String,
    /// Absolute URL
    pub url: String,
    /// Value for the `Content-Type` header
    pub content_type: Option<String>,
    /// Token for the `Authorization: Bearer` header
    pub bearer_token: Option<String>,
    /// Encoded body bytes
    pub body: Option<Vec<u8>>,
}

impl OutgoingRequest {
    /// Creates a request without headers or body.
    #[must_use]
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            ..Self::default()
        }
    }
}
