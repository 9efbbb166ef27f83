//! Human-readable result table.

use std::time::Duration;

use apicheck_domain::{TestLog, TestResult};
use colored::{Color, Colorize};

const RULE_TOP: &str = "┌──────┬──────────┬─────────────────┬────────────────────────────────►";
const RULE_MID: &str = "├──────┼──────────┼─────────────────┼────────────────────────────────►";
const RULE_BOTTOM: &str = "└──────┴──────────┴─────────────────┴────────────────────────────────►";

/// Renders every result in sequence order followed by the totals.
#[must_use]
pub fn render_table(log: &TestLog, color: bool) -> String {
    let mut lines = vec![
        String::new(),
        "API Test Result:".to_string(),
        String::new(),
        RULE_TOP.to_string(),
        format!("│ {:<4} │ {:<8} │ {:<15} │ {}", "No", "Status", "Time", "Description"),
        RULE_MID.to_string(),
    ];

    lines.extend(log.results().map(|result| render_row(result, color)));

    lines.push(RULE_BOTTOM.to_string());
    lines.push(String::new());

    let summary = log.summary();
    let total = summary.total;
    lines.push(format!(
        "{:<40} : {}",
        "Total API test cases",
        paint(&total.to_string(), Color::Cyan, color)
    ));
    lines.push(format!(
        "{:<40} : {}",
        "Passed API test cases",
        paint(&format!("{}/{total}", summary.passed), Color::Green, color)
    ));
    lines.push(format!(
        "{:<40} : {}",
        "Failed API test cases",
        paint(&format!("{}/{total}", summary.failed), Color::Red, color)
    ));
    lines.push(String::new());

    lines.join("\n")
}

fn render_row(result: &TestResult, color: bool) -> String {
    let status = if result.passed {
        paint(&format!("{:<8}", "pass"), Color::Green, color)
    } else {
        paint(&format!("{:<8}", "fail"), Color::Red, color)
    };

    let mut row = format!(
        "│ {:<4} │ {status} │ {:<15} │ {}",
        result.sequence,
        format_elapsed(result.elapsed),
        result.description
    );

    if let Some(error) = &result.error {
        row.push_str(&format!(
            " {} {error} {}",
            paint("[ Error:", Color::Red, color),
            paint("]", Color::Red, color)
        ));
    }

    row
}

/// Formats an elapsed time, or `-` when the request was never sent.
#[must_use]
pub fn format_elapsed(elapsed: Option<Duration>) -> String {
    elapsed.map_or_else(|| "-".to_string(), |d| format!("{d:.3?}"))
}

fn paint(text: &str, color_name: Color, enabled: bool) -> String {
    if enabled {
        text.color(color_name).bold().to_string()
    } else {
        text.to_string()
    }
}
