//! Run Test Use Case
//!
//! Turns one [`TestRequestSpec`] into a [`TestOutcome`]: encode the body,
//! build and send the request, time the round trip and compare the status.
//! Every failure is folded into the outcome; nothing is returned as `Err`.

use std::sync::Arc;
use std::time::Instant;

use apicheck_domain::{OutgoingRequest, TestError, TestOutcome, TestRequestSpec};
use tracing::debug;

use crate::ports::HttpClient;

/// Use case for executing one API test.
///
/// # Example
///
/// ```ignore
/// let runner = RunTest::new(Arc::new(ReqwestHttpClient::new()?));
/// let outcome = runner
///     .run("http://127.0.0.1:4000", &TestRequestSpec::get("Ping", "/ping", 200))
///     .await;
/// assert!(outcome.is_passed());
/// ```
pub struct RunTest<C: HttpClient> {
    client: Arc<C>,
}

impl<C: HttpClient> RunTest<C> {
    /// Creates a new `RunTest` use case with the given HTTP client.
    pub const fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Returns the underlying client.
    #[must_use]
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Executes `spec` against the server at `base_url`.
    pub async fn run(&self, base_url: &str, spec: &TestRequestSpec) -> TestOutcome {
        let url = spec.target_url(base_url);
        debug!(method = %spec.method, %url, "dispatching test request");

        let body = match spec.body.as_ref().map(|body| body.encode()).transpose() {
            Ok(body) => body,
            Err(e) => return TestOutcome::not_sent(TestError::Serialization(e.to_string())),
        };

        let request = OutgoingRequest {
            method: spec.method.clone(),
            url,
            content_type: spec.content_type.clone(),
            bearer_token: spec.bearer_token.clone(),
            body,
        };

        let started = Instant::now();
        let result = self.client.execute(&request).await;
        let elapsed = started.elapsed();

        match result {
            Err(e) if e.is_construction() => {
                TestOutcome::not_sent(TestError::RequestConstruction(e.to_string()))
            }
            Err(e) => TestOutcome::failed_after(TestError::Transport(e.to_string()), elapsed),
            Ok(response) if response.status == spec.expected_status => {
                TestOutcome::passed(elapsed)
            }
            Ok(response) => TestOutcome::failed_after(
                TestError::StatusMismatch {
                    expected: spec.expected_status,
                    response: Box::new(response),
                },
                elapsed,
            ),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::ports::{HttpClientError, ResponseFuture};
    use apicheck_domain::{ContentType, ResponseSpec};
    use pretty_assertions::assert_eq;
    use std::collections::{BTreeMap, HashMap};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Mock HTTP client that records every request it is asked to send.
    struct MockHttpClient {
        response: Result<ResponseSpec, HttpClientError>,
        sent: Mutex<Vec<OutgoingRequest>>,
    }

    impl MockHttpClient {
        fn status(status: u16) -> Self {
            Self {
                response: Ok(ResponseSpec::new(
                    status,
                    BTreeMap::new(),
                    b"OK",
                    Duration::from_millis(5),
                )),
                sent: Mutex::new(Vec::new()),
            }
        }

        fn error(err: HttpClientError) -> Self {
            Self {
                response: Err(err),
                sent: Mutex::new(Vec::new()),
            }
        }

        fn sent(&self) -> Vec<OutgoingRequest> {
            self.sent.lock().expect("lock should not be poisoned").clone()
        }
    }

    impl HttpClient for MockHttpClient {
        fn execute(&self, request: &OutgoingRequest) -> ResponseFuture<'_> {
            self.sent
                .lock()
                .expect("lock should not be poisoned")
                .push(request.clone());
            let result = self.response.clone();
            Box::pin(async move { result })
        }
    }

    const BASE: &str = "http://127.0.0.1:4000";

    #[tokio::test]
    async fn test_status_match_passes() {
        let runner = RunTest::new(Arc::new(MockHttpClient::status(200)));

        let outcome = runner.run(BASE, &TestRequestSpec::get("Ping", "/ping", 200)).await;

        assert!(outcome.is_passed());
        let sent = runner.client().sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0], OutgoingRequest::new("GET", "http://127.0.0.1:4000/ping"));
    }

    #[tokio::test]
    async fn test_status_mismatch_carries_response() {
        let runner = RunTest::new(Arc::new(MockHttpClient::status(200)));
        let spec = TestRequestSpec::post("Echo", "/echo", 201).with_body(sample_body());

        let outcome = runner.run(BASE, &spec).await;

        match outcome {
            TestOutcome::Failed {
                error: TestError::StatusMismatch { expected, response },
                elapsed,
            } => {
                assert_eq!(expected, 201);
                assert_eq!(response.status, 200);
                assert_eq!(response.body, "OK");
                assert!(elapsed.is_some());
            }
            other => panic!("expected a status mismatch, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_serialization_failure_never_sends() {
        let runner = RunTest::new(Arc::new(MockHttpClient::status(200)));
        let mut bad = HashMap::new();
        bad.insert((1, 2), "tuple keys");
        let spec = TestRequestSpec::post("Bad body", "/echo", 200).with_body(bad);

        let outcome = runner.run(BASE, &spec).await;

        match outcome {
            TestOutcome::Failed {
                error: TestError::Serialization(message),
                elapsed,
            } => {
                assert!(message.contains("key must be a string"));
                assert_eq!(elapsed, None);
            }
            other => panic!("expected a serialization failure, got {other:?}"),
        }
        assert!(runner.client().sent().is_empty());
    }

    #[tokio::test]
    async fn test_construction_error_has_no_elapsed() {
        let runner = RunTest::new(Arc::new(MockHttpClient::error(
            HttpClientError::InvalidMethod("GE T".into()),
        )));

        let outcome = runner
            .run(BASE, &TestRequestSpec::new("Bad verb", "GE T", "/ping", 200))
            .await;

        assert_eq!(
            outcome,
            TestOutcome::not_sent(TestError::RequestConstruction(
                "invalid HTTP method: GE T".into()
            ))
        );
    }

    #[tokio::test]
    async fn test_transport_error_keeps_elapsed() {
        let runner = RunTest::new(Arc::new(MockHttpClient::error(
            HttpClientError::ConnectionRefused {
                host: "127.0.0.1".into(),
                port: 4000,
            },
        )));

        let outcome = runner.run(BASE, &TestRequestSpec::get("Down", "/ping", 200)).await;

        match outcome {
            TestOutcome::Failed {
                error: TestError::Transport(message),
                elapsed,
            } => {
                assert_eq!(message, "connection refused: 127.0.0.1:4000");
                assert!(elapsed.is_some());
            }
            other => panic!("expected a transport failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_headers_body_and_suffix_are_forwarded() {
        let runner = RunTest::new(Arc::new(MockHttpClient::status(204)));
        let spec = TestRequestSpec::put("Update", "/users", 204)
            .with_path_suffix("/42")
            .with_body(sample_body())
            .with_content_type(ContentType::Json)
            .with_bearer_token("token-123");

        let outcome = runner.run(BASE, &spec).await;
        assert!(outcome.is_passed());

        let sent = runner.client().sent();
        assert_eq!(
            sent[0],
            OutgoingRequest {
                method: "PUT".into(),
                url: "http://127.0.0.1:4000/users/42".into(),
                content_type: Some("application/json".into()),
                bearer_token: Some("token-123".into()),
                body: Some(br#"{"a":1}"#.to_vec()),
            }
        );
    }

    fn sample_body() -> BTreeMap<&'static str, i32> {
        BTreeMap::from([("a", 1)])
    }
}
