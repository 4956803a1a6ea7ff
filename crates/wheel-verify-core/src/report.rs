// crates/wheel-verify-core/src/report.rs
// ============================================================================
// Module: Verification Reports
// Description: Per-check outcomes and suite summaries.
// Purpose: Provide a serializable record of a verification run.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Reports are plain data suitable for canonical JSON output. Field order and
//! labels are stable.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

use crate::manifest::ManifestDiff;
use crate::verifier::FailureKind;
use crate::verifier::VerifyError;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Kind of check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    /// Entry point invocation check.
    EntryPoint,
    /// File manifest check.
    Manifest,
}

/// Check outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    /// All assertions held.
    Pass,
    /// An assertion failed.
    Fail,
}

/// Failure details for a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckFailure {
    /// Stable failure label.
    pub kind: FailureKind,
    /// Human-readable failure message.
    pub message: String,
    /// Manifest diff for manifest mismatches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<ManifestDiff>,
}

impl From<&VerifyError> for CheckFailure {
    fn from(error: &VerifyError) -> Self {
        let diff = match error {
            VerifyError::ManifestMismatch(diff) => Some(diff.as_ref().clone()),
            _ => None,
        };
        Self {
            kind: error.kind(),
            message: error.to_string(),
            diff,
        }
    }
}

/// Result of a single check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    /// Check name.
    pub name: String,
    /// Check kind.
    pub kind: CheckKind,
    /// Input environment variable.
    pub env_var: String,
    /// Outcome.
    pub status: CheckStatus,
    /// Failure details when the check failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<CheckFailure>,
}

impl CheckReport {
    /// Builds a report from a check result.
    #[must_use]
    pub fn from_result<T>(
        name: &str,
        kind: CheckKind,
        env_var: &str,
        result: &Result<T, VerifyError>,
    ) -> Self {
        let (status, failure) = match result {
            Ok(_) => (CheckStatus::Pass, None),
            Err(error) => (CheckStatus::Fail, Some(CheckFailure::from(error))),
        };
        Self {
            name: name.to_string(),
            kind,
            env_var: env_var.to_string(),
            status,
            failure,
        }
    }

    /// Returns true when the check passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.status == CheckStatus::Pass
    }
}

/// Result of a suite run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuiteReport {
    /// Suite name.
    pub suite: String,
    /// Per-check results in execution order.
    pub checks: Vec<CheckReport>,
}

impl SuiteReport {
    /// Returns true when every check passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.checks.iter().all(CheckReport::passed)
    }

    /// Returns the number of failed checks.
    #[must_use]
    pub fn failures(&self) -> usize {
        self.checks.iter().filter(|check| !check.passed()).count()
    }
}
