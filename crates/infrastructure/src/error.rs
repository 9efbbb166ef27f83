//! Harness error types

use std::io;
use std::net::IpAddr;

use apicheck_application::HttpClientError;
use thiserror::Error;

use crate::config::ConfigError;

/// Fatal errors that prevent a test session from starting.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The async runtime backing the session could not be created.
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] io::Error),

    /// No local port could be bound for the test server.
    #[error("failed to bind test server on {host}: {source}")]
    Bind {
        /// Host the server tried to bind.
        host: IpAddr,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The HTTP client could not be created.
    #[error("failed to create HTTP client: {0}")]
    Client(#[from] HttpClientError),

    /// The configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for session operations.
pub type HarnessResult<T> = Result<T, HarnessError>;
