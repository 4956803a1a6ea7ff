// crates/wheel-verify-core/src/observer.rs
// ============================================================================
// Module: Verification Observer
// Description: Progress hooks for artifact verification.
// Purpose: Expose check lifecycle events without a logging dependency.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The verifier reports lifecycle events through [`VerifyObserver`]. Callers
//! that do not care install [`NoopObserver`]; the CLI forwards events to
//! stderr in verbose mode.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Serialize;

// ============================================================================
// SECTION: Event Labels
// ============================================================================

/// Stage of a single check.
///
/// # Invariants
/// - Variants are stable for event labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifyStage {
    /// Check execution began.
    Started,
    /// The input environment variable was read.
    EnvRead,
    /// The artifact path was resolved and exists.
    Located,
    /// The entry point process was spawned and exited.
    Spawned,
    /// The check passed.
    Passed,
    /// The check failed.
    Failed,
}

impl VerifyStage {
    /// Returns a stable label for the stage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::EnvRead => "env_read",
            Self::Located => "located",
            Self::Spawned => "spawned",
            Self::Passed => "passed",
            Self::Failed => "failed",
        }
    }
}

/// Lifecycle event for a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyEvent {
    /// Check name.
    pub check: String,
    /// Lifecycle stage.
    pub stage: VerifyStage,
    /// Stage detail (variable name, resolved path, failure kind).
    pub detail: Option<String>,
}

impl VerifyEvent {
    /// Creates an event.
    #[must_use]
    pub fn new(check: &str, stage: VerifyStage, detail: Option<String>) -> Self {
        Self {
            check: check.to_string(),
            stage,
            detail,
        }
    }
}

impl fmt::Display for VerifyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.check, self.stage.as_str())?;
        if let Some(detail) = &self.detail {
            write!(f, ": {detail}")?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Sink for verification events.
pub trait VerifyObserver {
    /// Records an event.
    fn record(&self, event: VerifyEvent);
}

/// No-op observer.
///
/// # Invariants
/// - Events are intentionally discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl VerifyObserver for NoopObserver {
    fn record(&self, _event: VerifyEvent) {}
}
