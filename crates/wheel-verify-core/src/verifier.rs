// crates/wheel-verify-core/src/verifier.rs
// ============================================================================
// Module: Artifact Verifier
// Description: Entry-point and manifest verification against expectations.
// Purpose: Confirm a packaging step produced the expected artifacts.
// Dependencies: crate::env, crate::locator, crate::manifest, thiserror
// ============================================================================

//! ## Overview
//! [`ArtifactVerifier`] reads inputs from an [`EnvSource`], resolves artifact
//! paths through a [`RuntimeLocator`], runs the located entry point once, and
//! compares observed values with literal expectations.
//!
//! ## Invariants
//! - Each check is independent; one failure never skips another check.
//! - Exactly one blocking subprocess per entry-point check, no retries.
//! - Manifest equality is order-sensitive list equality.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Stdio;

use serde::Serialize;
use thiserror::Error;

use crate::env::EnvError;
use crate::env::EnvSource;
use crate::env::read_env_required;
use crate::locator::LocatorError;
use crate::locator::RuntimeLocator;
use crate::manifest::ManifestDiff;
use crate::manifest::compare_manifest;
use crate::manifest::split_manifest;
use crate::observer::NoopObserver;
use crate::observer::VerifyEvent;
use crate::observer::VerifyObserver;
use crate::observer::VerifyStage;
use crate::report::CheckKind;
use crate::report::CheckReport;
use crate::report::SuiteReport;
use crate::suite::EntryPointCheck;
use crate::suite::ManifestCheck;
use crate::suite::Suite;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Stable failure classification.
///
/// # Invariants
/// - Variants are stable for machine-readable output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Input variable unset.
    MissingEnvironmentVariable,
    /// Input variable not UTF-8.
    InvalidEnvironmentValue,
    /// Runtime locator rejected the path.
    Locator,
    /// Resolved artifact does not exist.
    ArtifactNotFound,
    /// Entry point could not be started.
    Spawn,
    /// Entry point exited unsuccessfully.
    SubprocessFailure,
    /// Entry point stdout was not UTF-8.
    NonUtf8Output,
    /// Entry point stdout differs from the expectation.
    UnexpectedOutput,
    /// Manifest differs from the expectation.
    ManifestMismatch,
}

impl FailureKind {
    /// Returns a stable label for the failure kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingEnvironmentVariable => "missing_environment_variable",
            Self::InvalidEnvironmentValue => "invalid_environment_value",
            Self::Locator => "locator",
            Self::ArtifactNotFound => "artifact_not_found",
            Self::Spawn => "spawn",
            Self::SubprocessFailure => "subprocess_failure",
            Self::NonUtf8Output => "non_utf8_output",
            Self::UnexpectedOutput => "unexpected_output",
            Self::ManifestMismatch => "manifest_mismatch",
        }
    }
}

/// Verification failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VerifyError {
    /// The input variable is not set.
    #[error("environment variable {name} is not set")]
    MissingEnvironmentVariable {
        /// Variable name.
        name: String,
    },
    /// The input variable is not valid UTF-8.
    #[error("environment variable {name} must be valid UTF-8")]
    InvalidEnvironmentValue {
        /// Variable name.
        name: String,
    },
    /// The runtime locator rejected the logical path.
    #[error(transparent)]
    Locator(#[from] LocatorError),
    /// The artifact has no mapping or the resolved path does not exist.
    #[error("artifact {logical} not found{}", resolved_suffix(.resolved.as_deref()))]
    ArtifactNotFound {
        /// Logical runfiles path.
        logical: String,
        /// Resolved path, when the locator produced one.
        resolved: Option<PathBuf>,
    },
    /// The entry point could not be started.
    #[error("failed to run {}: {message}", .path.display())]
    Spawn {
        /// Entry point path.
        path: PathBuf,
        /// Underlying I/O error text.
        message: String,
    },
    /// The entry point exited unsuccessfully.
    #[error("{} exited with {}: {stderr}", .path.display(), exit_label(.code.as_ref().copied()))]
    SubprocessFailure {
        /// Entry point path.
        path: PathBuf,
        /// Exit code, if the process exited normally.
        code: Option<i32>,
        /// Captured stderr.
        stderr: String,
    },
    /// The entry point wrote non-UTF-8 stdout.
    #[error("{} wrote non-UTF-8 output", .path.display())]
    NonUtf8Output {
        /// Entry point path.
        path: PathBuf,
    },
    /// The trimmed stdout differs from the expectation.
    #[error("unexpected output: expected \"{expected}\", got \"{actual}\"")]
    UnexpectedOutput {
        /// Expected text.
        expected: String,
        /// Observed trimmed text.
        actual: String,
    },
    /// The manifest differs from the expectation.
    #[error("{0}")]
    ManifestMismatch(Box<ManifestDiff>),
}

impl VerifyError {
    /// Returns the stable failure classification.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::MissingEnvironmentVariable {
                ..
            } => FailureKind::MissingEnvironmentVariable,
            Self::InvalidEnvironmentValue {
                ..
            } => FailureKind::InvalidEnvironmentValue,
            Self::Locator(_) => FailureKind::Locator,
            Self::ArtifactNotFound {
                ..
            } => FailureKind::ArtifactNotFound,
            Self::Spawn {
                ..
            } => FailureKind::Spawn,
            Self::SubprocessFailure {
                ..
            } => FailureKind::SubprocessFailure,
            Self::NonUtf8Output {
                ..
            } => FailureKind::NonUtf8Output,
            Self::UnexpectedOutput {
                ..
            } => FailureKind::UnexpectedOutput,
            Self::ManifestMismatch(_) => FailureKind::ManifestMismatch,
        }
    }
}

impl From<EnvError> for VerifyError {
    fn from(error: EnvError) -> Self {
        match error {
            EnvError::Missing {
                name,
            } => Self::MissingEnvironmentVariable {
                name,
            },
            EnvError::InvalidUtf8 {
                name,
            } => Self::InvalidEnvironmentValue {
                name,
            },
        }
    }
}

/// Formats the resolved-path suffix of a not-found message.
fn resolved_suffix(resolved: Option<&Path>) -> String {
    resolved.map_or_else(
        || " (no runfiles mapping)".to_string(),
        |path| format!(" at {}", path.display()),
    )
}

/// Formats a process exit code.
fn exit_label(code: Option<i32>) -> String {
    code.map_or_else(|| "signal".to_string(), |code| format!("status {code}"))
}

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Successful entry-point check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPointOutcome {
    /// Resolved entry point path.
    pub resolved: PathBuf,
    /// Trimmed stdout.
    pub stdout: String,
}

/// Successful manifest check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestOutcome {
    /// Observed entries in order.
    pub entries: Vec<String>,
}

// ============================================================================
// SECTION: Verifier
// ============================================================================

/// Runs checks against an environment and a runtime locator.
pub struct ArtifactVerifier<'a, E, L> {
    /// Input environment.
    env: E,
    /// Artifact path resolver.
    locator: L,
    /// Lifecycle event sink.
    observer: &'a dyn VerifyObserver,
}

impl<'a, E: EnvSource, L: RuntimeLocator> ArtifactVerifier<'a, E, L> {
    /// Creates a verifier with a no-op observer.
    pub fn new(env: E, locator: L) -> Self {
        Self {
            env,
            locator,
            observer: &NoopObserver,
        }
    }

    /// Replaces the event observer.
    #[must_use]
    pub fn with_observer(mut self, observer: &'a dyn VerifyObserver) -> Self {
        self.observer = observer;
        self
    }

    /// Verifies an entry point runs and prints the expected version.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError`] when the input is missing, the artifact cannot
    /// be located, the process fails, or the output differs.
    pub fn verify_entry_point(
        &self,
        check: &EntryPointCheck,
    ) -> Result<EntryPointOutcome, VerifyError> {
        self.observe(&check.name, || self.entry_point_inner(check))
    }

    /// Verifies an installed file list matches the expected order exactly.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError`] when the input is missing or the list differs.
    pub fn verify_manifest(&self, check: &ManifestCheck) -> Result<ManifestOutcome, VerifyError> {
        self.observe(&check.name, || self.manifest_inner(check))
    }

    /// Runs every check in the suite and collects the outcomes.
    #[must_use]
    pub fn run_suite(&self, suite: &Suite) -> SuiteReport {
        let mut checks = Vec::with_capacity(suite.len());
        if let Some(check) = &suite.entry_point {
            let result = self.verify_entry_point(check);
            checks.push(CheckReport::from_result(
                &check.name,
                CheckKind::EntryPoint,
                &check.env_var,
                &result,
            ));
        }
        for check in &suite.manifests {
            let result = self.verify_manifest(check);
            checks.push(CheckReport::from_result(
                &check.name,
                CheckKind::Manifest,
                &check.env_var,
                &result,
            ));
        }
        SuiteReport {
            suite: suite.name.clone(),
            checks,
        }
    }

    /// Resolves a logical path to an existing artifact.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::ArtifactNotFound`] when unmapped or missing on
    /// disk, and [`VerifyError::Locator`] for malformed paths.
    pub fn resolve_artifact(&self, logical: &str) -> Result<PathBuf, VerifyError> {
        let resolved = self.locator.locate(logical)?.ok_or_else(|| VerifyError::ArtifactNotFound {
            logical: logical.to_string(),
            resolved: None,
        })?;
        if !resolved.exists() {
            return Err(VerifyError::ArtifactNotFound {
                logical: logical.to_string(),
                resolved: Some(resolved),
            });
        }
        Ok(resolved)
    }

    /// Entry-point check body.
    fn entry_point_inner(&self, check: &EntryPointCheck) -> Result<EntryPointOutcome, VerifyError> {
        let relative = read_env_required(&self.env, &check.env_var)?;
        self.emit(&check.name, VerifyStage::EnvRead, Some(check.env_var.clone()));

        let logical = check.logical_path(&relative);
        let resolved = self.resolve_artifact(&logical)?;
        self.emit(&check.name, VerifyStage::Located, Some(resolved.display().to_string()));

        let output = Command::new(&resolved)
            .arg(&check.version_flag)
            .stdin(Stdio::null())
            .output()
            .map_err(|err| VerifyError::Spawn {
                path: resolved.clone(),
                message: err.to_string(),
            })?;
        self.emit(&check.name, VerifyStage::Spawned, output.status.code().map(|c| c.to_string()));
        if !output.status.success() {
            return Err(VerifyError::SubprocessFailure {
                path: resolved,
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
            });
        }

        let stdout = String::from_utf8(output.stdout).map_err(|_| VerifyError::NonUtf8Output {
            path: resolved.clone(),
        })?;
        let actual = stdout.trim();
        if actual != check.expected_stdout {
            return Err(VerifyError::UnexpectedOutput {
                expected: check.expected_stdout.clone(),
                actual: actual.to_string(),
            });
        }
        Ok(EntryPointOutcome {
            resolved,
            stdout: actual.to_string(),
        })
    }

    /// Manifest check body.
    fn manifest_inner(&self, check: &ManifestCheck) -> Result<ManifestOutcome, VerifyError> {
        let raw = read_env_required(&self.env, &check.env_var)?;
        self.emit(&check.name, VerifyStage::EnvRead, Some(check.env_var.clone()));

        let entries = split_manifest(&raw);
        if let Some(diff) = compare_manifest(&check.expected, &entries) {
            return Err(VerifyError::ManifestMismatch(Box::new(diff)));
        }
        Ok(ManifestOutcome {
            entries,
        })
    }

    /// Wraps a check body with start and finish events.
    fn observe<T>(
        &self,
        check: &str,
        body: impl FnOnce() -> Result<T, VerifyError>,
    ) -> Result<T, VerifyError> {
        self.emit(check, VerifyStage::Started, None);
        let result = body();
        match &result {
            Ok(_) => self.emit(check, VerifyStage::Passed, None),
            Err(err) => {
                self.emit(check, VerifyStage::Failed, Some(err.kind().as_str().to_string()));
            }
        }
        result
    }

    /// Records a lifecycle event.
    fn emit(&self, check: &str, stage: VerifyStage, detail: Option<String>) {
        self.observer.record(VerifyEvent::new(check, stage, detail));
    }
}
