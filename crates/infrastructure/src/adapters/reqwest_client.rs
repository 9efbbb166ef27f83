//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest library.
//! Request construction happens eagerly so that a malformed request is
//! reported before anything is sent.

use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::time::Instant;

use apicheck_application::ports::{HttpClient, HttpClientError, ResponseFuture};
use apicheck_domain::{OutgoingRequest, ResponseSpec};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Url};

/// User agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("apicheck/", env!("CARGO_PKG_VERSION"));

/// Maximum number of redirects followed before giving up.
const MAX_REDIRECTS: usize = 10;

/// HTTP client implementation using reqwest.
///
/// Idle connections are not pooled: every test opens a fresh connection, and
/// the test server never has to wait on keep-alive sockets when it shuts down.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Creates a new HTTP client with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, HttpClientError> {
        Self::with_user_agent(DEFAULT_USER_AGENT)
    }

    /// Creates a new HTTP client sending the given user agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn with_user_agent(user_agent: &str) -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self { client })
    }

    /// Creates a new HTTP client with a custom reqwest client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Builds a reqwest request from the outgoing request.
    fn build_request(
        &self,
        request: &OutgoingRequest,
    ) -> Result<reqwest::Request, HttpClientError> {
        let method = Method::from_bytes(request.method.as_bytes())
            .map_err(|_| HttpClientError::InvalidMethod(request.method.clone()))?;
        let url = Url::parse(&request.url)
            .map_err(|e| HttpClientError::InvalidUrl(format!("{e}: {}", request.url)))?;

        let mut builder = self.client.request(method, url);

        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }
        if let Some(content_type) = &request.content_type {
            builder = builder.header(CONTENT_TYPE, content_type.as_str());
        }
        if let Some(token) = &request.bearer_token {
            builder = builder.bearer_auth(token);
        }

        builder
            .build()
            .map_err(|e| HttpClientError::InvalidRequest(error_chain(&e)))
    }

    /// Maps reqwest send errors to `HttpClientError`.
    fn map_error(error: &reqwest::Error) -> HttpClientError {
        let message = error_chain(error);

        if error.is_connect() {
            if message.to_lowercase().contains("refused") {
                let url = error.url();
                return HttpClientError::ConnectionRefused {
                    host: url
                        .and_then(Url::host_str)
                        .unwrap_or("unknown")
                        .to_string(),
                    port: url.and_then(Url::port_or_known_default).unwrap_or(80),
                };
            }
            return HttpClientError::ConnectionFailed(message);
        }

        if error.is_redirect() {
            return HttpClientError::Other(format!(
                "too many redirects (max {MAX_REDIRECTS}): {message}"
            ));
        }

        HttpClientError::Other(message)
    }
}

/// Joins an error with all of its sources, outermost first.
fn error_chain(error: &dyn StdError) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}

impl HttpClient for ReqwestHttpClient {
    fn execute(&self, request: &OutgoingRequest) -> ResponseFuture<'_> {
        let prepared = self.build_request(request);

        Box::pin(async move {
            let request = prepared?;

            let start = Instant::now();
            let response = self
                .client
                .execute(request)
                .await
                .map_err(|e| Self::map_error(&e))?;

            let status = response.status().as_u16();
            let headers: BTreeMap<String, String> = response
                .headers()
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("<binary>").to_string()))
                .collect();

            let body = response
                .bytes()
                .await
                .map_err(|e| HttpClientError::Body(error_chain(&e)))?;

            Ok(ResponseSpec::new(status, headers, &body, start.elapsed()))
        })
    }
}
