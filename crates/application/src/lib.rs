//! Apicheck Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for the HTTP transport and the clock)
//! - The `RunTest` use case that executes and classifies one API test

pub mod ports;
pub mod run_test;

pub use ports::{Clock, HttpClient, HttpClientError, ResponseFuture};
pub use run_test::RunTest;
