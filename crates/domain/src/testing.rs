//! Test results and the per-session result log.
//!
//! The log is the accounting half of the harness: every executed spec is
//! recorded exactly once, numbered from 1 without gaps, and counted as either
//! passed or failed.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::response::ResponseSpec;

/// Why a test failed. Exactly one kind is recorded per failed result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TestError {
    /// The request body could not be serialized; nothing was sent.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The HTTP request could not be built; nothing was sent.
    #[error("request construction error: {0}")]
    RequestConstruction(String),

    /// The request was sent but the round trip failed.
    #[error("transport error: {0}")]
    Transport(String),

    /// A response arrived with an unexpected status.
    #[error("expected status {expected}, got {response}")]
    StatusMismatch {
        /// Status the test expected.
        expected: u16,
        /// The full response that was received.
        response: Box<ResponseSpec>,
    },
}

impl TestError {
    /// Short machine-friendly name of the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Serialization(_) => "serialization",
            Self::RequestConstruction(_) => "request_construction",
            Self::Transport(_) => "transport",
            Self::StatusMismatch { .. } => "status_mismatch",
        }
    }

    /// Returns the received response for status mismatches.
    #[must_use]
    pub fn response(&self) -> Option<&ResponseSpec> {
        match self {
            Self::StatusMismatch { response, .. } => Some(response),
            _ => None,
        }
    }
}

/// Outcome of one test, before the session numbers it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestOutcome {
    /// The response carried the expected status.
    Passed {
        /// Round-trip time.
        elapsed: Duration,
    },
    /// The test failed.
    Failed {
        /// The failure.
        error: TestError,
        /// Round-trip time; absent when no request was sent.
        elapsed: Option<Duration>,
    },
}

impl TestOutcome {
    /// Creates a passed outcome.
    #[must_use]
    pub const fn passed(elapsed: Duration) -> Self {
        Self::Passed { elapsed }
    }

    /// Creates a failed outcome for a request that was never sent.
    #[must_use]
    pub const fn not_sent(error: TestError) -> Self {
        Self::Failed {
            error,
            elapsed: None,
        }
    }

    /// Creates a failed outcome for a request that was sent.
    #[must_use]
    pub const fn failed_after(error: TestError, elapsed: Duration) -> Self {
        Self::Failed {
            error,
            elapsed: Some(elapsed),
        }
    }

    /// Returns true if the test passed.
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed { .. })
    }
}

/// One recorded test. Never changed after the log creates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestResult {
    /// 1-based position in the run.
    pub sequence: u64,
    /// Whether the test passed.
    pub passed: bool,
    /// Label copied from the test request.
    pub description: String,
    /// Failure detail, absent for passed tests.
    pub error: Option<TestError>,
    /// Round-trip time, absent when the request could not be built.
    pub elapsed: Option<Duration>,
}

/// Counts for a finished or in-progress run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RunSummary {
    /// Number of recorded tests.
    pub total: u64,
    /// Number of passed tests.
    pub passed: u64,
    /// Number of failed tests.
    pub failed: u64,
}

impl RunSummary {
    /// Check if all tests passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Get pass rate as percentage.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.passed as f64 / self.total as f64) * 100.0
        }
    }
}

/// Append-only log of test results with running counters.
#[derive(Debug, Clone, Default)]
pub struct TestLog {
    summary: RunSummary,
    results: BTreeMap<u64, TestResult>,
}

impl TestLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an outcome under the next sequence number.
    pub fn record(&mut self, description: impl Into<String>, outcome: TestOutcome) -> &TestResult {
        self.summary.total += 1;
        let sequence = self.summary.total;

        let (passed, error, elapsed) = match outcome {
            TestOutcome::Passed { elapsed } => {
                self.summary.passed += 1;
                (true, None, Some(elapsed))
            }
            TestOutcome::Failed { error, elapsed } => {
                self.summary.failed += 1;
                (false, Some(error), elapsed)
            }
        };

        self.results.entry(sequence).or_insert(TestResult {
            sequence,
            passed,
            description: description.into(),
            error,
            elapsed,
        })
    }

    /// Total number of recorded tests.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.summary.total
    }

    /// Number of passed tests.
    #[must_use]
    pub const fn passed(&self) -> u64 {
        self.summary.passed
    }

    /// Number of failed tests.
    #[must_use]
    pub const fn failed(&self) -> u64 {
        self.summary.failed
    }

    /// Current counts.
    #[must_use]
    pub const fn summary(&self) -> RunSummary {
        self.summary
    }

    /// Looks up a result by sequence number.
    #[must_use]
    pub fn get(&self, sequence: u64) -> Option<&TestResult> {
        self.results.get(&sequence)
    }

    /// Results in sequence order.
    pub fn results(&self) -> impl Iterator<Item = &TestResult> {
        self.results.values()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap as Map;

    fn mismatch(expected: u16, actual: u16) -> TestError {
        TestError::StatusMismatch {
            expected,
            response: Box::new(ResponseSpec::new(
                actual,
                Map::new(),
                b"",
                Duration::from_millis(3),
            )),
        }
    }

    #[test]
    fn test_sequence_numbers_have_no_gaps() {
        let mut log = TestLog::new();
        log.record("a", TestOutcome::passed(Duration::from_millis(1)));
        log.record("b", TestOutcome::not_sent(TestError::Serialization("bad".into())));
        log.record("c", TestOutcome::failed_after(mismatch(201, 200), Duration::from_millis(2)));
        log.record("d", TestOutcome::passed(Duration::ZERO));

        let sequences: Vec<u64> = log.results().map(|r| r.sequence).collect();
        assert_eq!(sequences, vec![1, 2, 3, 4]);
        assert_eq!(log.total(), 4);
        assert_eq!(log.passed(), 2);
        assert_eq!(log.failed(), 2);
        assert_eq!(log.passed() + log.failed(), log.total());
    }

    #[test]
    fn test_record_passed() {
        let mut log = TestLog::new();
        let result = log.record("ping", TestOutcome::passed(Duration::from_millis(5))).clone();

        assert_eq!(
            result,
            TestResult {
                sequence: 1,
                passed: true,
                description: "ping".to_string(),
                error: None,
                elapsed: Some(Duration::from_millis(5)),
            }
        );
    }

    #[test]
    fn test_record_not_sent_has_no_elapsed() {
        let mut log = TestLog::new();
        let result = log.record(
            "bad body",
            TestOutcome::not_sent(TestError::Serialization("key must be a string".into())),
        );

        assert!(!result.passed);
        assert!(result.elapsed.is_none());
        assert_eq!(result.error.as_ref().map(TestError::kind), Some("serialization"));
    }

    #[test]
    fn test_mismatch_carries_response() {
        let error = mismatch(201, 200);
        assert_eq!(error.response().map(|r| r.status), Some(200));
        assert_eq!(error.to_string(), "expected status 201, got 200 OK");
        assert_eq!(TestError::Transport("refused".into()).response(), None);
    }

    #[test]
    fn test_summary() {
        let mut log = TestLog::new();
        assert!(log.is_empty());
        assert!(log.summary().all_passed());
        assert_eq!(log.summary().pass_rate(), 100.0);

        log.record("ok", TestOutcome::passed(Duration::ZERO));
        log.record("ko", TestOutcome::not_sent(TestError::RequestConstruction("x".into())));

        let summary = log.summary();
        assert!(!summary.all_passed());
        assert_eq!(summary.pass_rate(), 50.0);
        assert_eq!(log.get(2).map(|r| r.description.as_str()), Some("ko"));
        assert!(log.get(3).is_none());
    }
}
