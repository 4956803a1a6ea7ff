// crates/wheel-verify-config/src/lib.rs
// ============================================================================
// Module: Wheel Verify Config Library
// Description: Canonical config model, validation, and example generation.
// Purpose: Single source of truth for wheel-verify.toml semantics.
// Dependencies: wheel-verify-core, serde, toml
// ============================================================================

//! ## Overview
//! `wheel-verify-config` defines the configuration model for Wheel Verify
//! suites. It provides strict, fail-closed validation and a canonical
//! example that reproduces the built-in `pip_parse` suite.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::config_toml_example;
