// crates/wheel-verify-core/src/env.rs
// ============================================================================
// Module: Environment Sources
// Description: Injectable environment access with strict UTF-8 validation.
// Purpose: Read verification inputs from the process environment or a fixture.
// Dependencies: std, thiserror
// ============================================================================

//! ## Overview
//! Every verification input arrives through environment variables. Reads go
//! through [`EnvSource`] so tests can supply a fixed map instead of mutating
//! the process environment. Invalid UTF-8 fails closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::ffi::OsString;

use thiserror::Error;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Runfiles manifest path exported by the test runner.
pub const RUNFILES_MANIFEST_FILE_ENV: &str = "RUNFILES_MANIFEST_FILE";
/// Runfiles directory exported by the test runner.
pub const RUNFILES_DIR_ENV: &str = "RUNFILES_DIR";
/// Test source root exported by the test runner.
pub const TEST_SRCDIR_ENV: &str = "TEST_SRCDIR";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Source of environment variables.
pub trait EnvSource {
    /// Returns the raw value of `name`, if set.
    fn var_os(&self, name: &str) -> Option<OsString>;
}

/// Reads from the live process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var_os(&self, name: &str) -> Option<OsString> {
        std::env::var_os(name)
    }
}

/// Fixed in-memory environment.
///
/// # Invariants
/// - Keys are unique; later inserts replace earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapEnv {
    /// Variables by name.
    vars: BTreeMap<String, OsString>,
}

impl MapEnv {
    /// Creates an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a variable, returning the updated environment.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<OsString>) -> Self {
        self.set(name, value);
        self
    }

    /// Sets a variable.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<OsString>) {
        self.vars.insert(name.into(), value.into());
    }

    /// Removes a variable.
    pub fn remove(&mut self, name: &str) {
        self.vars.remove(name);
    }
}

impl EnvSource for MapEnv {
    fn var_os(&self, name: &str) -> Option<OsString> {
        self.vars.get(name).cloned()
    }
}

impl<T: EnvSource + ?Sized> EnvSource for &T {
    fn var_os(&self, name: &str) -> Option<OsString> {
        (**self).var_os(name)
    }
}

/// Environment read failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EnvError {
    /// The variable is not set.
    #[error("environment variable {name} is not set")]
    Missing {
        /// Variable name.
        name: String,
    },
    /// The variable is set but is not valid UTF-8.
    #[error("environment variable {name} must be valid UTF-8")]
    InvalidUtf8 {
        /// Variable name.
        name: String,
    },
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns [`EnvError::InvalidUtf8`] when the value contains invalid UTF-8.
pub fn read_env_strict(env: &impl EnvSource, name: &str) -> Result<Option<String>, EnvError> {
    env.var_os(name).map_or(Ok(None), |raw| {
        raw.into_string().map(Some).map_err(|_| EnvError::InvalidUtf8 {
            name: name.to_string(),
        })
    })
}

/// Reads a required environment variable.
///
/// # Errors
///
/// Returns [`EnvError::Missing`] when unset and [`EnvError::InvalidUtf8`]
/// when the value is not UTF-8.
pub fn read_env_required(env: &impl EnvSource, name: &str) -> Result<String, EnvError> {
    read_env_strict(env, name)?.ok_or_else(|| EnvError::Missing {
        name: name.to_string(),
    })
}

/// Reads an environment variable, treating empty values as unset.
///
/// # Errors
///
/// Returns [`EnvError::InvalidUtf8`] when the value is not UTF-8.
pub fn read_env_nonempty(env: &impl EnvSource, name: &str) -> Result<Option<String>, EnvError> {
    Ok(read_env_strict(env, name)?.filter(|value| !value.is_empty()))
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::expect_used,
        clippy::unwrap_used,
        reason = "Test-only assertions favor direct unwrap/expect for clarity."
    )]

    use super::EnvError;
    use super::MapEnv;
    use super::read_env_nonempty;
    use super::read_env_required;
    use super::read_env_strict;

    #[test]
    fn required_reports_missing_name() {
        let env = MapEnv::new();
        let err = read_env_required(&env, "YAMLLINT_ENTRY_POINT").unwrap_err();
        assert_eq!(
            err,
            EnvError::Missing {
                name: "YAMLLINT_ENTRY_POINT".to_string()
            }
        );
    }

    #[test]
    fn removed_variable_reads_as_missing() {
        let mut env = MapEnv::new().with("WHEEL_DIST_INFO_CONTENTS", "RECORD");
        assert_eq!(read_env_required(&env, "WHEEL_DIST_INFO_CONTENTS").unwrap(), "RECORD");
        env.remove("WHEEL_DIST_INFO_CONTENTS");
        env.remove("WHEEL_DIST_INFO_CONTENTS");
        assert_eq!(read_env_strict(&env, "WHEEL_DIST_INFO_CONTENTS").unwrap(), None);
        assert_eq!(env, MapEnv::new());
    }

    #[test]
    fn nonempty_treats_empty_as_unset() {
        let env = MapEnv::new().with("RUNFILES_DIR", "");
        assert_eq!(read_env_nonempty(&env, "RUNFILES_DIR").unwrap(), None);
        assert_eq!(read_env_strict(&env, "RUNFILES_DIR").unwrap(), Some(String::new()));
    }

    #[cfg(unix)]
    #[test]
    fn invalid_utf8_fails_closed() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let env = MapEnv::new().with("WHEEL_DATA_CONTENTS", OsString::from_vec(vec![0xff, 0xfe]));
        let err = read_env_strict(&env, "WHEEL_DATA_CONTENTS").unwrap_err();
        assert!(matches!(err, EnvError::InvalidUtf8 { .. }));
    }
}
