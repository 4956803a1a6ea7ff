// system-tests/src/config/env.rs
// ============================================================================
// Module: System Test Environment
// Description: Environment-backed configuration for system tests.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: wheel-verify-core
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid silent
//! misconfiguration. Invalid UTF-8 fails closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;

use wheel_verify_core::EnvSource;
use wheel_verify_core::env::read_env_strict;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys for system test configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemTestEnv {
    /// Directory for per-check report artifacts; unset disables them.
    RunRoot,
    /// Write check lifecycle events to stderr (`true`/`false` or `1`/`0`).
    Verbose,
}

impl SystemTestEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RunRoot => "WHEEL_VERIFY_SYSTEM_TEST_RUN_ROOT",
            Self::Verbose => "WHEEL_VERIFY_SYSTEM_TEST_VERBOSE",
        }
    }
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Typed system test configuration derived from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SystemTestConfig {
    /// Report artifact root; `None` means no reports are written.
    pub run_root: Option<PathBuf>,
    /// Write check lifecycle events to stderr.
    pub verbose: bool,
}

impl SystemTestConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when an environment value is not valid UTF-8, is empty,
    /// or fails validation (for example, an invalid boolean value).
    pub fn load(env: &impl EnvSource) -> Result<Self, String> {
        let run_root = read_env_nonempty(env, SystemTestEnv::RunRoot.as_str())?.map(PathBuf::from);
        let verbose = parse_bool_env(
            SystemTestEnv::Verbose.as_str(),
            read_env_nonempty(env, SystemTestEnv::Verbose.as_str())?,
        )?;
        Ok(Self {
            run_root,
            verbose,
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and rejects empty values.
///
/// # Errors
///
/// Returns an error when the variable is not UTF-8, or is set but empty or
/// whitespace.
fn read_env_nonempty(env: &impl EnvSource, name: &str) -> Result<Option<String>, String> {
    match read_env_strict(env, name).map_err(|err| err.to_string())? {
        Some(value) if value.trim().is_empty() => Err(format!("{name} must not be empty")),
        Some(value) => Ok(Some(value)),
        None => Ok(None),
    }
}

/// Parses a boolean environment variable with permissive defaults.
///
/// # Errors
///
/// Returns an error when the value is not a recognized boolean literal.
pub(super) fn parse_bool_env(name: &str, raw: Option<String>) -> Result<bool, String> {
    let Some(value) = raw else {
        return Ok(false);
    };
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("true") || trimmed == "1" {
        return Ok(true);
    }
    if trimmed.eq_ignore_ascii_case("false") || trimmed == "0" {
        return Ok(false);
    }
    Err(format!("{name} must be 1, 0, true, or false"))
}
