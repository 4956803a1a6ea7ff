// crates/wheel-verify-cli/src/lib.rs
// ============================================================================
// Module: Wheel Verify CLI Library
// Description: Shared helpers for the Wheel Verify command-line interface.
// Purpose: Provide reusable components for the CLI binary and tests.
// Dependencies: wheel-verify-core, serde, serde_jcs, thiserror
// ============================================================================

//! ## Overview
//! This library houses the CLI message catalog, report rendering and the
//! stderr event observer. The binary entry point
//! (`src/main.rs`) imports these helpers to keep user-facing output
//! consistent.

// ============================================================================
// SECTION: Modules
// ============================================================================

/// Internationalization helpers and message catalog.
pub mod i18n;
pub mod observer;
pub mod render;
