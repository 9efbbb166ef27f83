//! Machine-readable JSON report.
//!
//! Output is pretty-printed with 2-space indentation and a trailing newline
//! so that reports checked into CI artifacts diff cleanly.

use std::time::Duration;

use apicheck_application::Clock;
use apicheck_domain::{ResponseSpec, RunSummary, TestError, TestLog, TestResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use uuid::Uuid;

/// Error type for report rendering.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[derive(Serialize)]
struct JsonReport<'a> {
    session_id: Uuid,
    generated_at: DateTime<Utc>,
    summary: RunSummary,
    results: Vec<JsonResult<'a>>,
}

#[derive(Serialize)]
struct JsonResult<'a> {
    sequence: u64,
    passed: bool,
    description: &'a str,
    elapsed_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonError<'a>>,
}

#[derive(Serialize)]
struct JsonError<'a> {
    kind: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    response: Option<&'a ResponseSpec>,
}

impl<'a> From<&'a TestResult> for JsonResult<'a> {
    fn from(result: &'a TestResult) -> Self {
        Self {
            sequence: result.sequence,
            passed: result.passed,
            description: &result.description,
            elapsed_ms: result.elapsed.map(duration_ms),
            error: result.error.as_ref().map(JsonError::from),
        }
    }
}

impl<'a> From<&'a TestError> for JsonError<'a> {
    fn from(error: &'a TestError) -> Self {
        Self {
            kind: error.kind(),
            message: error.to_string(),
            response: error.response(),
        }
    }
}

fn duration_ms(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}

/// Renders the log as a JSON document stamped with `clock`.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json(
    log: &TestLog,
    session_id: Uuid,
    clock: &impl Clock,
) -> Result<String, ReportError> {
    let report = JsonReport {
        session_id,
        generated_at: clock.now(),
        summary: log.summary(),
        results: log.results().map(JsonResult::from).collect(),
    };

    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    report.serialize(&mut serializer)?;

    let mut json = String::from_utf8(buffer)?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use apicheck_domain::TestOutcome;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use std::collections::BTreeMap;

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn clock() -> FixedClock {
        FixedClock(
            Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5)
                .single()
                .expect("valid timestamp"),
        )
    }

    #[test]
    fn test_document_shape() {
        let mut log = TestLog::new();
        log.record("Ping", TestOutcome::passed(Duration::from_millis(4)));
        log.record(
            "Echo",
            TestOutcome::failed_after(
                TestError::StatusMismatch {
                    expected: 201,
                    response: Box::new(ResponseSpec::new(
                        200,
                        BTreeMap::new(),
                        b"ok",
                        Duration::from_millis(2),
                    )),
                },
                Duration::from_millis(3),
            ),
        );
        log.record(
            "Bad body",
            TestOutcome::not_sent(TestError::Serialization("key must be a string".into())),
        );

        let id = Uuid::nil();
        let json = render_json(&log, id, &clock()).expect("report should render");
        assert!(json.ends_with("}\n"));
        assert!(json.contains("\n  \"session_id\""));

        let value: Value = serde_json::from_str(&json).expect("report should be valid JSON");
        assert_eq!(value["session_id"], json!(id.to_string()));
        assert_eq!(value["generated_at"], json!("2026-01-02T03:04:05Z"));
        assert_eq!(value["summary"], json!({"total": 3, "passed": 1, "failed": 2}));

        assert_eq!(value["results"][0]["elapsed_ms"], json!(4.0));
        assert!(value["results"][0].get("error").is_none());

        let mismatch = &value["results"][1]["error"];
        assert_eq!(mismatch["kind"], json!("status_mismatch"));
        assert_eq!(mismatch["response"]["status"], json!(200));
        assert_eq!(mismatch["response"]["body"], json!("ok"));

        assert_eq!(value["results"][2]["elapsed_ms"], Value::Null);
        assert_eq!(value["results"][2]["error"]["kind"], json!("serialization"));
        assert!(value["results"][2]["error"].get("response").is_none());
    }
}
