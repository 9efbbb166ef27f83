//! Harness configuration.
//!
//! Values come from the process environment:
//!
//! | variable | meaning | default |
//! |---|---|---|
//! | `APICHECK_HOST` | address the test server binds to | `127.0.0.1` |
//! | `APICHECK_USER_AGENT` | user agent sent with every request | `apicheck/<version>` |
//! | `APICHECK_COLOR` | `true`/`false`, colorize the printed report | `true` |
//! | `NO_COLOR` | any non-empty value disables colors | unset |

use std::net::{AddrParseError, IpAddr, Ipv4Addr};

use thiserror::Error;

use crate::adapters::DEFAULT_USER_AGENT;

/// Environment variable for the bind host.
pub const HOST_VAR: &str = "APICHECK_HOST";
/// Environment variable for the user agent.
pub const USER_AGENT_VAR: &str = "APICHECK_USER_AGENT";
/// Environment variable toggling report colors.
pub const COLOR_VAR: &str = "APICHECK_COLOR";
/// Conventional variable that disables colored output.
pub const NO_COLOR_VAR: &str = "NO_COLOR";

/// Errors raised while reading configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The bind host is not an IP address.
    #[error("{var} must be an IP address, got `{value}`: {source}")]
    InvalidHost {
        /// Variable name.
        var: &'static str,
        /// Offending value.
        value: String,
        /// Parser error.
        #[source]
        source: AddrParseError,
    },

    /// A boolean flag has an unrecognized value.
    #[error("{var} must be `true` or `false`, got `{value}`")]
    InvalidFlag {
        /// Variable name.
        var: &'static str,
        /// Offending value.
        value: String,
    },
}

/// Settings for a test session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Address the test server binds to; the port is always ephemeral.
    pub bind_host: IpAddr,
    /// User agent sent with every request.
    pub user_agent: String,
    /// Whether the printed report uses ANSI colors.
    pub color: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            bind_host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            color: true,
        }
    }
}

impl HarnessConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = non_empty(lookup(HOST_VAR)) {
            config.bind_host = value
                .parse()
                .map_err(|source| ConfigError::InvalidHost {
                    var: HOST_VAR,
                    value: value.clone(),
                    source,
                })?;
        }

        if let Some(value) = non_empty(lookup(USER_AGENT_VAR)) {
            config.user_agent = value;
        }

        if let Some(value) = non_empty(lookup(COLOR_VAR)) {
            config.color = parse_flag(COLOR_VAR, &value)?;
        }

        if non_empty(lookup(NO_COLOR_VAR)).is_some() {
            config.color = false;
        }

        Ok(config)
    }

    /// Sets the bind host (builder pattern).
    #[must_use]
    pub const fn with_bind_host(mut self, host: IpAddr) -> Self {
        self.bind_host = host;
        self
    }

    /// Sets whether the report is colorized (builder pattern).
    #[must_use]
    pub const fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_flag(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            var,
            value: value.to_string(),
        }),
    }
}
