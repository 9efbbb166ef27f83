//! Test request specification type

use serde::Serialize;

use super::{HttpMethod, JsonBody};

/// Description of one API test: what to send and which status to expect.
///
/// The expected status is a constructor argument, so a spec cannot exist
/// without one.
#[derive(Debug, Clone)]
pub struct TestRequestSpec {
    /// Free-text label shown in the report
    pub description: String,
    /// Appended verbatim after the target path (e.g. `/42` or `?page=2`)
    pub path_suffix: Option<String>,
    /// Structured body, sent as JSON
    pub body: Option<JsonBody>,
    /// Target path relative to the server base URL
    pub path: String,
    /// HTTP method token
    pub method: String,
    /// Value for the `Content-Type` header
    pub content_type: Option<String>,
    /// Token for the `Authorization: Bearer` header
    pub bearer_token: Option<String>,
    /// Status code the response must carry to pass
    pub expected_status: u16,
}

impl TestRequestSpec {
    /// Creates a spec with no body, headers or path suffix.
    #[must_use]
    pub fn new(
        description: impl Into<String>,
        method: impl Into<String>,
        path: impl Into<String>,
        expected_status: u16,
    ) -> Self {
        Self {
            description: description.into(),
            path_suffix: None,
            body: None,
            path: path.into(),
            method: method.into(),
            content_type: None,
            bearer_token: None,
            expected_status,
        }
    }

    /// Creates a GET spec.
    #[must_use]
    pub fn get(
        description: impl Into<String>,
        path: impl Into<String>,
        expected_status: u16,
    ) -> Self {
        Self::new(description, HttpMethod::Get, path, expected_status)
    }

    /// Creates a POST spec.
    #[must_use]
    pub fn post(
        description: impl Into<String>,
        path: impl Into<String>,
        expected_status: u16,
    ) -> Self {
        Self::new(description, HttpMethod::Post, path, expected_status)
    }

    /// Creates a PUT spec.
    #[must_use]
    pub fn put(
        description: impl Into<String>,
        path: impl Into<String>,
        expected_status: u16,
    ) -> Self {
        Self::new(description, HttpMethod::Put, path, expected_status)
    }

    /// Creates a DELETE spec.
    #[must_use]
    pub fn delete(
        description: impl Into<String>,
        path: impl Into<String>,
        expected_status: u16,
    ) -> Self {
        Self::new(description, HttpMethod::Delete, path, expected_status)
    }

    /// Sets the path suffix (builder pattern).
    #[must_use]
    pub fn with_path_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.path_suffix = Some(suffix.into());
        self
    }

    /// Sets the JSON body (builder pattern).
    #[must_use]
    pub fn with_body<T>(mut self, value: T) -> Self
    where
        T: Serialize + Send + Sync + 'static,
    {
        self.body = Some(JsonBody::new(value));
        self
    }

    /// Sets the `Content-Type` header (builder pattern).
    ///
    /// Accepts a [`ContentType`](super::ContentType) or any string.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Sets the bearer token (builder pattern).
    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Resolves the full URL against the server base URL.
    #[must_use]
    pub fn target_url(&self, base_url: &str) -> String {
        let suffix = self.path_suffix.as_deref().unwrap_or_default();
        format!("{base_url}{}{suffix}", self.path)
    }
}
