//! End-of-run reporting.

mod json;
mod table;

pub use json::{ReportError, render_json};
pub use table::{format_elapsed, render_table};

use apicheck_domain::{RunSummary, TestLog};
use tracing::info;

use crate::session::TestSession;

/// Closes the session, prints the result table and returns the counts.
///
/// The server is shut down before anything is printed. With
/// `exit_on_finish` the process then exits with [`exit_code`].
pub fn report(mut session: TestSession, exit_on_finish: bool) -> RunSummary {
    session.close();

    println!("{}", render_table(session.log(), session.config().color));

    let summary = session.summary();
    info!(
        session = %session.id(),
        total = summary.total,
        passed = summary.passed,
        failed = summary.failed,
        "test run finished"
    );

    if exit_on_finish {
        let code = exit_code(session.log());
        drop(session);
        finish(code);
    }
    summary
}

/// Process exit code for a run: 1 if any test failed, otherwise 0.
#[must_use]
pub const fn exit_code(log: &TestLog) -> i32 {
    if log.failed() > 0 { 1 } else { 0 }
}

/// Terminates the process with `code`.
pub fn finish(code: i32) -> ! {
    std::process::exit(code)
}
