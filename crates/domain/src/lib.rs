//! Apicheck Domain - Core harness types
//!
//! This crate defines what a test sends, what it receives and how results
//! are recorded. All types here are pure Rust with no I/O dependencies.

pub mod error;
pub mod request;
pub mod response;
pub mod testing;

pub use error::{DomainError, DomainResult};
pub use request::{ContentType, HttpMethod, JsonBody, OutgoingRequest, TestRequestSpec};
pub use response::{ResponseSpec, StatusCode};
pub use testing::{RunSummary, TestError, TestLog, TestOutcome, TestResult};
