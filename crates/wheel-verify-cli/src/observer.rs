// crates/wheel-verify-cli/src/observer.rs
// ============================================================================
// Module: Stderr Observer
// Description: Verification event sink writing one line per event to stderr.
// Purpose: Back the `--verbose` flag without a logging framework.
// Dependencies: wheel-verify-core
// ============================================================================

//! ## Overview
//! [`StderrObserver`] formats each [`VerifyEvent`] through the message
//! catalog and writes it to stderr. Write failures are ignored so that
//! diagnostics never change a check outcome.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;

use wheel_verify_core::VerifyEvent;
use wheel_verify_core::VerifyObserver;

use crate::t;

// ============================================================================
// SECTION: Observer
// ============================================================================

/// Observer that writes verification events to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrObserver;

impl VerifyObserver for StderrObserver {
    fn record(&self, event: VerifyEvent) {
        let line = format_event(&event);
        let mut stderr = std::io::stderr();
        let _ = writeln!(&mut stderr, "{line}");
    }
}

/// Formats an event as a single diagnostic line.
#[must_use]
pub fn format_event(event: &VerifyEvent) -> String {
    match &event.detail {
        Some(detail) => t!(
            "observer.event_detail",
            check = event.check,
            stage = event.stage.as_str(),
            detail = detail
        ),
        None => t!("observer.event", check = event.check, stage = event.stage.as_str()),
    }
}
