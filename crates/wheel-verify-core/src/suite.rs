// crates/wheel-verify-core/src/suite.rs
// ============================================================================
// Module: Verification Suites
// Description: Check definitions and suite composition.
// Purpose: Describe which artifacts to verify and what to expect from them.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! A [`Suite`] bundles an optional entry-point check with any number of
//! manifest checks. Checks are plain data; execution lives in
//! [`crate::verifier`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Version flag passed to entry points unless overridden.
pub const DEFAULT_VERSION_FLAG: &str = "--version";

// ============================================================================
// SECTION: Check Types
// ============================================================================

/// Verifies that a packaged entry point runs and reports a version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryPointCheck {
    /// Check name.
    pub name: String,
    /// Variable holding the entry point's relative path.
    pub env_var: String,
    /// Runfiles workspace prefixed to the relative path.
    pub workspace: Option<String>,
    /// Single argument passed to the entry point.
    pub version_flag: String,
    /// Expected trimmed stdout.
    pub expected_stdout: String,
}

impl EntryPointCheck {
    /// Builds the logical runfiles path for a relative artifact path.
    #[must_use]
    pub fn logical_path(&self, relative: &str) -> String {
        match self.workspace.as_deref() {
            Some(workspace) if !workspace.is_empty() => format!("{workspace}/{relative}"),
            _ => relative.to_string(),
        }
    }
}

/// Verifies an installed file list against an expected ordered list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestCheck {
    /// Check name.
    pub name: String,
    /// Variable holding the space-separated file list.
    pub env_var: String,
    /// Expected entries in order.
    pub expected: Vec<String>,
}

// ============================================================================
// SECTION: Suite
// ============================================================================

/// Ordered collection of checks.
///
/// # Invariants
/// - Check names are unique within a suite.
/// - The entry point check, when present, runs first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suite {
    /// Suite name.
    pub name: String,
    /// Optional entry-point check.
    pub entry_point: Option<EntryPointCheck>,
    /// Manifest checks in declaration order.
    pub manifests: Vec<ManifestCheck>,
}

/// Suite selection failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SelectionError {
    /// A requested check is not part of the suite.
    #[error("unknown check {name}; available: {available}")]
    UnknownCheck {
        /// Requested name.
        name: String,
        /// Comma-separated available names.
        available: String,
    },
}

impl Suite {
    /// Returns check names in execution order.
    #[must_use]
    pub fn check_names(&self) -> Vec<&str> {
        self.entry_point
            .iter()
            .map(|check| check.name.as_str())
            .chain(self.manifests.iter().map(|check| check.name.as_str()))
            .collect()
    }

    /// Returns the number of checks.
    #[must_use]
    pub fn len(&self) -> usize {
        usize::from(self.entry_point.is_some()) + self.manifests.len()
    }

    /// Returns true when the suite holds no checks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Narrows the suite to the named checks, preserving execution order.
    ///
    /// An empty selection keeps every check.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::UnknownCheck`] for names outside the suite.
    pub fn select(&self, names: &[String]) -> Result<Self, SelectionError> {
        if names.is_empty() {
            return Ok(self.clone());
        }
        let known = self.check_names();
        if let Some(unknown) = names.iter().find(|name| !known.contains(&name.as_str())) {
            return Err(SelectionError::UnknownCheck {
                name: unknown.clone(),
                available: known.join(", "),
            });
        }
        let wanted = |name: &str| names.iter().any(|candidate| candidate == name);
        Ok(Self {
            name: self.name.clone(),
            entry_point: self.entry_point.clone().filter(|check| wanted(&check.name)),
            manifests: self.manifests.iter().filter(|check| wanted(&check.name)).cloned().collect(),
        })
    }
}
