// crates/wheel-verify-core/tests/proptest_manifest.rs
// ============================================================================
// Module: Manifest Property-Based Tests
// Description: Property tests for order-sensitive manifest comparison.
// Purpose: Ensure any insertion, deletion, or reordering is detected.
// ============================================================================

//! Property-based tests for manifest comparison invariants.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use proptest::prelude::*;
use wheel_verify_core::compare_manifest;
use wheel_verify_core::split_manifest;

fn entry_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_./-]{1,24}"
}

fn manifest_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(entry_strategy(), 1 .. 8)
}

proptest! {
    #[test]
    fn joined_manifest_splits_back_exactly(entries in manifest_strategy()) {
        let raw = entries.join(" ");
        prop_assert_eq!(split_manifest(&raw), entries);
    }

    #[test]
    fn comparison_matches_list_equality(expected in manifest_strategy(), actual in manifest_strategy()) {
        let diff = compare_manifest(&expected, &actual);
        prop_assert_eq!(diff.is_none(), expected == actual);
    }

    #[test]
    fn swapping_distinct_entries_is_a_reorder(
        entries in manifest_strategy(),
        a in 0usize .. 8,
        b in 0usize .. 8,
    ) {
        let a = a % entries.len();
        let b = b % entries.len();
        prop_assume!(entries[a] != entries[b]);
        let mut actual = entries.clone();
        actual.swap(a, b);

        let diff = compare_manifest(&entries, &actual).unwrap();
        prop_assert!(diff.reordered);
        prop_assert_eq!(diff.first_mismatch, a.min(b));
    }

    #[test]
    fn removing_an_entry_is_reported_missing(entries in manifest_strategy(), index in 0usize .. 8) {
        let index = index % entries.len();
        let mut actual = entries.clone();
        let removed = actual.remove(index);

        let diff = compare_manifest(&entries, &actual).unwrap();
        prop_assert!(!diff.reordered);
        prop_assert_eq!(diff.missing, vec![removed]);
        prop_assert!(diff.unexpected.is_empty());
    }
}
