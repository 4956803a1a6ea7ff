// system-tests/src/lib.rs
// ============================================================================
// Module: Wheel Verify System Tests Library
// Description: Shared configuration and helpers for system test scenarios.
// Purpose: Provide common utilities for Wheel Verify system-test binaries.
// Dependencies: wheel-verify-core, serde_jcs
// ============================================================================

//! ## Overview
//! This crate hosts shared configuration and the pipeline harness used by the
//! Wheel Verify system-tests binaries in `system-tests/tests`. The tests run
//! inside a build's test environment, where runfiles and the packaged
//! artifact variables are provided by the build.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod harness;
