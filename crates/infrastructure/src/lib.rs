//! Apicheck Infrastructure - Adapters and the test session
//!
//! This crate provides the concrete HTTP client behind the application
//! ports, the in-process axum server tests run against, and the
//! [`TestSession`] that ties them together.

pub mod adapters;
pub mod config;
pub mod error;
pub mod report;
pub mod server;
pub mod session;

pub use adapters::{DEFAULT_USER_AGENT, ReqwestHttpClient, SystemClock};
pub use config::{ConfigError, HarnessConfig};
pub use error::{HarnessError, HarnessResult};
pub use report::{ReportError, exit_code, finish, format_elapsed, render_json, render_table};
pub use server::{RouteTable, TestServer};
pub use session::TestSession;
