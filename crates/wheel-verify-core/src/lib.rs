// crates/wheel-verify-core/src/lib.rs
// ============================================================================
// Module: Wheel Verify Core Library
// Description: Artifact verification for packaged third-party dependencies.
// Purpose: Check entry points and installed file manifests produced by a build.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! `wheel-verify-core` verifies the output of a packaging step: a located
//! entry point must run and print an exact version string, and installed
//! file lists delivered through environment variables must equal fixed,
//! ordered manifests.
//!
//! Inputs come from an [`EnvSource`]; artifact paths are resolved through a
//! [`RuntimeLocator`] such as [`Runfiles`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod env;
pub mod expectations;
pub mod locator;
pub mod manifest;
pub mod observer;
pub mod report;
pub mod suite;
pub mod verifier;

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use env::EnvError;
pub use env::EnvSource;
pub use env::MapEnv;
pub use env::ProcessEnv;
pub use locator::DeferredLocator;
pub use locator::LocatorError;
pub use locator::Runfiles;
pub use locator::RunfilesMode;
pub use locator::RuntimeLocator;
pub use manifest::ManifestDiff;
pub use manifest::compare_manifest;
pub use manifest::split_manifest;
pub use observer::NoopObserver;
pub use observer::VerifyEvent;
pub use observer::VerifyObserver;
pub use observer::VerifyStage;
pub use report::CheckFailure;
pub use report::CheckKind;
pub use report::CheckReport;
pub use report::CheckStatus;
pub use report::SuiteReport;
pub use suite::DEFAULT_VERSION_FLAG;
pub use suite::EntryPointCheck;
pub use suite::ManifestCheck;
pub use suite::SelectionError;
pub use suite::Suite;
pub use verifier::ArtifactVerifier;
pub use verifier::EntryPointOutcome;
pub use verifier::FailureKind;
pub use verifier::ManifestOutcome;
pub use verifier::VerifyError;
