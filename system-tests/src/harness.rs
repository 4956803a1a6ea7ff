// system-tests/src/harness.rs
// ============================================================================
// Module: Pipeline Harness
// Description: Runs the pip_parse checks against the process environment.
// Purpose: Turn verification outcomes into test results with optional reports.
// Dependencies: wheel-verify-core, serde_jcs
// ============================================================================

//! ## Overview
//! [`PipelineHarness`] runs one check of the built-in `pip_parse` suite at a
//! time. Expectations are always the fixed literals from
//! [`wheel_verify_core::expectations`]; config files and config environment
//! variables are never consulted. Failures come back as the full error text
//! so the test runner shows the complete diff.
//!
//! When `WHEEL_VERIFY_SYSTEM_TEST_RUN_ROOT` is set, each check also writes its
//! report as canonical JSON under that root. Without it nothing is written.
//! A report that cannot be written produces a stderr warning and never
//! changes the check outcome.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use serde::Serialize;
use wheel_verify_core::ArtifactVerifier;
use wheel_verify_core::CheckKind;
use wheel_verify_core::CheckReport;
use wheel_verify_core::DeferredLocator;
use wheel_verify_core::EntryPointCheck;
use wheel_verify_core::EntryPointOutcome;
use wheel_verify_core::EnvSource;
use wheel_verify_core::ManifestCheck;
use wheel_verify_core::ManifestOutcome;
use wheel_verify_core::NoopObserver;
use wheel_verify_core::ProcessEnv;
use wheel_verify_core::Suite;
use wheel_verify_core::VerifyError;
use wheel_verify_core::VerifyEvent;
use wheel_verify_core::VerifyObserver;
use wheel_verify_core::expectations::pip_parse_suite;

use crate::config::SystemTestConfig;

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
#[path = "harness_tests.rs"]
mod tests;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Report artifact written for each check.
#[derive(Debug, Serialize)]
struct CheckArtifact<'a> {
    /// Suite name.
    suite: &'a str,
    /// Check outcome.
    report: &'a CheckReport,
}

/// Writes verification events to stderr, one line each.
#[derive(Debug, Clone, Copy, Default)]
struct StderrEvents;

impl VerifyObserver for StderrEvents {
    fn record(&self, event: VerifyEvent) {
        let _ = writeln!(std::io::stderr(), "{event}");
    }
}

/// Runs `pip_parse` checks against an environment source.
#[derive(Debug)]
pub struct PipelineHarness<E = ProcessEnv> {
    /// Harness settings.
    config: SystemTestConfig,
    /// Built-in suite.
    suite: Suite,
    /// Source of check inputs.
    env: E,
    /// Runfiles discovered at construction.
    locator: DeferredLocator,
}

// ============================================================================
// SECTION: Harness
// ============================================================================

impl PipelineHarness {
    /// Builds a harness from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error when the system-test settings are invalid.
    pub fn from_env() -> Result<Self, String> {
        Self::load(ProcessEnv)
    }
}

impl<E: EnvSource> PipelineHarness<E> {
    /// Builds a harness reading settings, runfiles and inputs from `env`.
    ///
    /// # Errors
    ///
    /// Returns an error when the system-test settings are invalid.
    pub fn load(env: E) -> Result<Self, String> {
        let config = SystemTestConfig::load(&env)?;
        let locator = DeferredLocator::discover(&env);
        Ok(Self::new(config, env, locator))
    }

    /// Builds a harness from explicit parts.
    #[must_use]
    pub fn new(config: SystemTestConfig, env: E, locator: DeferredLocator) -> Self {
        Self {
            config,
            suite: pip_parse_suite(),
            env,
            locator,
        }
    }

    /// Returns the suite the checks come from.
    #[must_use]
    pub const fn suite(&self) -> &Suite {
        &self.suite
    }

    /// Returns the suite's entry-point check.
    ///
    /// # Errors
    ///
    /// Returns an error when the suite defines no entry point.
    pub fn entry_point(&self) -> Result<&EntryPointCheck, String> {
        self.suite
            .entry_point
            .as_ref()
            .ok_or_else(|| format!("suite {} defines no entry point", self.suite.name))
    }

    /// Returns the named manifest check.
    ///
    /// # Errors
    ///
    /// Returns an error when the suite has no manifest check with that name.
    pub fn manifest(&self, name: &str) -> Result<&ManifestCheck, String> {
        self.suite
            .manifests
            .iter()
            .find(|check| check.name == name)
            .ok_or_else(|| format!("suite {} has no manifest check {name}", self.suite.name))
    }

    /// Runs an entry-point check.
    ///
    /// # Errors
    ///
    /// Returns the full verification error text.
    pub fn verify_entry_point(&self, check: &EntryPointCheck) -> Result<EntryPointOutcome, String> {
        let result = self.with_verifier(|verifier| verifier.verify_entry_point(check));
        self.record(&check.name, CheckKind::EntryPoint, &check.env_var, &result);
        result.map_err(|err| err.to_string())
    }

    /// Runs a manifest check.
    ///
    /// # Errors
    ///
    /// Returns the full verification error text.
    pub fn verify_manifest(&self, check: &ManifestCheck) -> Result<ManifestOutcome, String> {
        let result = self.with_verifier(|verifier| verifier.verify_manifest(check));
        self.record(&check.name, CheckKind::Manifest, &check.env_var, &result);
        result.map_err(|err| err.to_string())
    }

    /// Runs `body` with a verifier bound to the harness environment.
    fn with_verifier<T>(
        &self,
        body: impl FnOnce(&ArtifactVerifier<'_, &E, &DeferredLocator>) -> Result<T, VerifyError>,
    ) -> Result<T, VerifyError> {
        let stderr_events = StderrEvents;
        let noop_observer = NoopObserver;
        let observer: &dyn VerifyObserver =
            if self.config.verbose { &stderr_events } else { &noop_observer };
        let verifier = ArtifactVerifier::new(&self.env, &self.locator).with_observer(observer);
        body(&verifier)
    }

    /// Writes a check report when a run root is configured.
    fn record<T>(
        &self,
        name: &str,
        kind: CheckKind,
        env_var: &str,
        result: &Result<T, VerifyError>,
    ) {
        let Some(dir) = self.report_dir(name) else {
            return;
        };
        let report = CheckReport::from_result(name, kind, env_var, result);
        let artifact = CheckArtifact {
            suite: &self.suite.name,
            report: &report,
        };
        if let Err(err) = write_report(&dir, &artifact) {
            let _ = writeln!(std::io::stderr(), "[{name}] report not written: {err}");
        }
    }

    /// Returns the report directory for a check, if reports are enabled.
    fn report_dir(&self, name: &str) -> Option<PathBuf> {
        self.config.run_root.as_ref().map(|root| root.join(&self.suite.name).join(name))
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Writes `report.json` under `dir` as canonical JSON with a trailing newline.
fn write_report<T: Serialize>(dir: &Path, value: &T) -> Result<(), String> {
    fs::create_dir_all(dir)
        .map_err(|err| format!("create report dir {} failed: {err}", dir.display()))?;
    let mut bytes = serde_jcs::to_vec(value).map_err(|err| err.to_string())?;
    bytes.push(b'\n');
    let path = dir.join("report.json");
    fs::write(&path, bytes).map_err(|err| format!("write {} failed: {err}", path.display()))
}
