// crates/wheel-verify-cli/src/render.rs
// ============================================================================
// Module: Report Rendering
// Description: Text and canonical JSON rendering of suite reports.
// Purpose: Keep CLI report output deterministic across formats.
// Dependencies: wheel-verify-core, serde, serde_jcs, thiserror
// ============================================================================

//! ## Overview
//! Text output lists one line per check followed by indented failure detail
//! and a summary line. JSON output is RFC 8785 canonical JSON of the
//! [`SuiteReport`] with a trailing newline.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use thiserror::Error;
use wheel_verify_core::CheckReport;
use wheel_verify_core::SuiteReport;

use crate::t;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Rendering failures.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Canonical JSON serialization failed.
    #[error("{0}")]
    Json(String),
}

// ============================================================================
// SECTION: Text
// ============================================================================

/// Renders a suite report as human-readable text.
#[must_use]
pub fn render_text(report: &SuiteReport) -> String {
    let count = report.checks.len();
    let mut lines = vec![t!("report.header", suite = report.suite, count = count)];
    for check in &report.checks {
        render_check(check, &mut lines);
    }
    let failed = report.failures();
    lines.push(if failed == 0 {
        t!("report.summary.pass", count = count)
    } else {
        t!("report.summary.fail", failed = failed, count = count)
    });
    let mut output = lines.join("\n");
    output.push('\n');
    output
}

/// Appends the lines for a single check.
fn render_check(check: &CheckReport, lines: &mut Vec<String>) {
    let Some(failure) = &check.failure else {
        lines.push(t!("report.check.pass", name = check.name, env = check.env_var));
        return;
    };
    lines.push(t!(
        "report.check.fail",
        name = check.name,
        env = check.env_var,
        kind = failure.kind.as_str()
    ));
    for line in failure.message.lines() {
        lines.push(t!("report.detail", line = line));
    }
}

// ============================================================================
// SECTION: JSON
// ============================================================================

/// Renders any serializable value as canonical JSON followed by a newline.
///
/// # Errors
///
/// Returns [`RenderError::Json`] when serialization fails.
pub fn render_json<T: Serialize>(value: &T) -> Result<Vec<u8>, RenderError> {
    let mut bytes = serde_jcs::to_vec(value).map_err(|err| RenderError::Json(err.to_string()))?;
    bytes.push(b'\n');
    Ok(bytes)
}
