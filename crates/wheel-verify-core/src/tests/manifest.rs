// crates/wheel-verify-core/src/tests/manifest.rs
// ============================================================================
// Module: Manifest Comparison Tests
// Description: Unit coverage for manifest splitting and diffing.
// Purpose: Ensure comparisons stay literal and order-sensitive.
// Dependencies: crate::manifest
// ============================================================================

use crate::expectations::WHEEL_DATA_CONTENTS;
use crate::manifest::compare_manifest;
use crate::manifest::split_manifest;

fn owned(entries: &[&str]) -> Vec<String> {
    entries.iter().map(ToString::to_string).collect()
}

#[test]
fn split_is_literal_on_single_spaces() {
    assert_eq!(split_manifest("a b c"), owned(&["a", "b", "c"]));
    assert_eq!(split_manifest("a  b"), owned(&["a", "", "b"]));
    assert_eq!(split_manifest(""), owned(&[""]));
    assert_eq!(split_manifest("a "), owned(&["a", ""]));
}

#[test]
fn identical_manifests_have_no_diff() {
    let expected = owned(&WHEEL_DATA_CONTENTS);
    assert_eq!(compare_manifest(&expected, &expected.clone()), None);
}

#[test]
fn swapped_entries_are_a_reorder() {
    let expected = owned(&WHEEL_DATA_CONTENTS);
    let mut actual = expected.clone();
    actual.swap(4, 5);

    let diff = compare_manifest(&expected, &actual).unwrap();
    assert!(diff.reordered);
    assert_eq!(diff.first_mismatch, 4);
    assert!(diff.missing.is_empty());
    assert!(diff.unexpected.is_empty());
}

#[test]
fn missing_and_extra_entries_are_reported() {
    let expected = owned(&["a", "b", "c"]);
    let actual = owned(&["a", "c", "d", "d"]);

    let diff = compare_manifest(&expected, &actual).unwrap();
    assert!(!diff.reordered);
    assert_eq!(diff.first_mismatch, 1);
    assert_eq!(diff.missing, owned(&["b"]));
    assert_eq!(diff.unexpected, owned(&["d", "d"]));
}

#[test]
fn truncated_manifest_reports_tail_index() {
    let expected = owned(&["a", "b"]);
    let actual = owned(&["a"]);
    let diff = compare_manifest(&expected, &actual).unwrap();
    assert_eq!(diff.first_mismatch, 1);
    assert_eq!(diff.missing, owned(&["b"]));
}

#[test]
fn duplicate_entries_count_toward_equality() {
    let expected = owned(&["a", "b"]);
    let actual = owned(&["a", "b", "b"]);
    let diff = compare_manifest(&expected, &actual).unwrap();
    assert_eq!(diff.unexpected, owned(&["b"]));
    assert!(!diff.reordered);
}

#[test]
fn rendered_diff_lists_both_sides_in_full() {
    let expected = owned(&["lib/LICENSE", "lib/METADATA"]);
    let actual = owned(&["lib/METADATA", "lib/LICENSE"]);
    let text = compare_manifest(&expected, &actual).unwrap().to_string();

    assert!(text.contains("manifest mismatch at index 0"));
    assert!(text.contains("order differs"));
    assert!(text.contains("expected (2 entries):"));
    assert!(text.contains("actual (2 entries):"));
    assert!(text.contains("! [0] \"lib/LICENSE\""));
    assert!(text.contains("! [0] \"lib/METADATA\""));
}
