// crates/wheel-verify-core/src/tests/mod.rs
// ============================================================================
// Module: Core Unit Tests
// Description: Shared fixtures for wheel-verify-core unit tests.
// Purpose: Provide fake entry points and event recorders.
// Dependencies: tempfile
// ============================================================================

//! ## Overview
//! Shared fixtures for the core unit tests.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only assertions and helpers are permitted."
)]

mod manifest;
mod report;

use std::cell::RefCell;

use crate::observer::VerifyEvent;
use crate::observer::VerifyObserver;
use crate::observer::VerifyStage;

/// Observer that keeps every event for later assertions.
#[derive(Default)]
pub(super) struct RecordingObserver {
    events: RefCell<Vec<VerifyEvent>>,
}

impl RecordingObserver {
    pub(super) fn stages(&self, check: &str) -> Vec<VerifyStage> {
        self.events
            .borrow()
            .iter()
            .filter(|event| event.check == check)
            .map(|event| event.stage)
            .collect()
    }
}

impl VerifyObserver for RecordingObserver {
    fn record(&self, event: VerifyEvent) {
        self.events.borrow_mut().push(event);
    }
}

/// Writes an executable shell script at `root/relative`.
#[cfg(unix)]
pub(super) fn write_script(
    root: &std::path::Path,
    relative: &str,
    body: &str,
) -> std::path::PathBuf {
    use std::fs::File;
    use std::io::Write;
    use std::os::unix::fs::PermissionsExt;

    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().expect("script parent")).expect("create script dir");
    let mut file = File::create(&path).expect("create script");
    file.write_all(format!("#!/bin/sh\n{body}\n").as_bytes()).expect("write script");
    file.sync_all().expect("sync script");
    drop(file);
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
        .expect("chmod script");
    path
}
