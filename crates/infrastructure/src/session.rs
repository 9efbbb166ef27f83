//! Test session: the ephemeral server, the runner and the result log for one
//! test run.
//!
//! The API is synchronous. The session owns a small tokio runtime, serves its
//! routes on it and blocks on each round trip, so it must not be driven from
//! inside another async runtime. There is no request timeout: a handler that
//! never answers blocks [`TestSession::run`] indefinitely.

use std::sync::Arc;

use apicheck_application::RunTest;
use apicheck_domain::{RunSummary, TestLog, TestRequestSpec, TestResult};
use axum::Router;
use axum::routing::MethodRouter;
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::adapters::{ReqwestHttpClient, SystemClock};
use crate::config::HarnessConfig;
use crate::error::{HarnessError, HarnessResult};
use crate::report::{self, ReportError};
use crate::server::{RouteTable, TestServer};

/// One test run against an in-process server.
///
/// # Example
///
/// ```no_run
/// use apicheck_domain::TestRequestSpec;
/// use apicheck_infrastructure::TestSession;
/// use axum::routing::get;
///
/// let mut session = TestSession::create()?;
/// session.route("/ping", get(|| async { "pong" }));
/// session.run(TestRequestSpec::get("Ping", "/ping", 200));
/// session.report(true);
/// # Ok::<(), apicheck_infrastructure::HarnessError>(())
/// ```
pub struct TestSession {
    id: Uuid,
    config: HarnessConfig,
    server: TestServer,
    runner: RunTest<ReqwestHttpClient>,
    log: TestLog,
    // Declared last: the server must be dropped while the runtime is alive.
    runtime: Runtime,
}

impl TestSession {
    /// Starts a session with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime, the HTTP client or the server cannot
    /// be started.
    pub fn create() -> HarnessResult<Self> {
        Self::create_with(HarnessConfig::default())
    }

    /// Starts a session with the configuration read from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the session
    /// cannot be started.
    pub fn from_env() -> HarnessResult<Self> {
        Self::create_with(HarnessConfig::from_env()?)
    }

    /// Starts a session with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime, the HTTP client or the server cannot
    /// be started.
    pub fn create_with(config: HarnessConfig) -> HarnessResult<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("apicheck-server")
            .enable_all()
            .build()
            .map_err(HarnessError::Runtime)?;

        let client = ReqwestHttpClient::with_user_agent(&config.user_agent)?;
        let server = runtime.block_on(TestServer::start(config.bind_host, RouteTable::new()))?;

        let id = Uuid::now_v7();
        info!(session = %id, base_url = server.base_url(), "test session started");

        Ok(Self {
            id,
            config,
            server,
            runner: RunTest::new(Arc::new(client)),
            log: TestLog::new(),
            runtime,
        })
    }

    /// Registers a handler on the server's routing table.
    ///
    /// # Panics
    ///
    /// Panics if `path` is invalid or overlaps an existing route.
    pub fn route(&self, path: &str, method_router: MethodRouter) -> &Self {
        self.server.routes().route(path, method_router);
        self
    }

    /// Merges an existing router into the server's routing table.
    ///
    /// # Panics
    ///
    /// Panics on overlapping routes.
    pub fn merge(&self, router: Router) -> &Self {
        self.server.routes().merge(router);
        self
    }

    /// Executes one test and records its result.
    ///
    /// Never fails: every problem ends up in the recorded result.
    pub fn run(&mut self, spec: TestRequestSpec) {
        let outcome = self
            .runtime
            .block_on(self.runner.run(self.server.base_url(), &spec));

        let result = self.log.record(spec.description, outcome);
        match &result.error {
            Some(error) => warn!(
                sequence = result.sequence,
                description = %result.description,
                kind = error.kind(),
                %error,
                "test failed"
            ),
            None => debug!(
                sequence = result.sequence,
                description = %result.description,
                elapsed = ?result.elapsed,
                "test passed"
            ),
        }
    }

    /// Shuts the server down and waits for it to stop.
    ///
    /// Calling it again is a no-op.
    pub fn close(&mut self) {
        let Some(task) = self.server.shutdown() else {
            debug!(session = %self.id, "test session already closed");
            return;
        };

        if let Err(e) = self.runtime.block_on(task) {
            warn!(session = %self.id, error = %e, "test server task ended abnormally");
        }
        info!(session = %self.id, summary = ?self.log.summary(), "test session closed");
    }

    /// Returns true once [`close`](Self::close) has run.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        !self.server.is_running()
    }

    /// Prints the report and optionally exits the process; see [`report::report`].
    pub fn report(self, exit_on_finish: bool) -> RunSummary {
        report::report(self, exit_on_finish)
    }

    /// Renders the results as a JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be serialized.
    pub fn json_report(&self) -> Result<String, ReportError> {
        report::render_json(&self.log, self.id, &SystemClock::new())
    }

    /// Session identifier, used in logs and the JSON report.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Base URL of the test server.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.server.base_url()
    }

    /// Configuration the session was created with.
    #[must_use]
    pub const fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// The result log.
    #[must_use]
    pub const fn log(&self) -> &TestLog {
        &self.log
    }

    /// Results in sequence order.
    pub fn results(&self) -> impl Iterator<Item = &TestResult> {
        self.log.results()
    }

    /// Number of executed tests.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.log.total()
    }

    /// Number of passed tests.
    #[must_use]
    pub const fn passed(&self) -> u64 {
        self.log.passed()
    }

    /// Number of failed tests.
    #[must_use]
    pub const fn failed(&self) -> u64 {
        self.log.failed()
    }

    /// Current counts.
    #[must_use]
    pub const fn summary(&self) -> RunSummary {
        self.log.summary()
    }
}
