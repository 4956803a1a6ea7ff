// crates/wheel-verify-core/src/manifest.rs
// ============================================================================
// Module: File Manifests
// Description: Parsing and order-sensitive comparison of installed file lists.
// Purpose: Produce diff-friendly reports for manifest mismatches.
// Dependencies: serde, std::collections
// ============================================================================

//! ## Overview
//! A manifest arrives as one environment string of space-separated relative
//! paths. It is split literally on single spaces and compared element by
//! element against the expected list.
//!
//! ## Invariants
//! - Equality is list equality: same elements, same order, same count.
//! - Splitting never collapses separators; `"a  b"` yields an empty entry.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Separator used when a manifest is encoded as a single string.
pub const MANIFEST_SEPARATOR: char = ' ';

// ============================================================================
// SECTION: Types
// ============================================================================

/// Difference between an expected and an observed manifest.
///
/// # Invariants
/// - `expected != actual` whenever a diff exists.
/// - `reordered` is true only when both lists hold the same multiset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestDiff {
    /// Expected entries in order.
    pub expected: Vec<String>,
    /// Observed entries in order.
    pub actual: Vec<String>,
    /// First index at which the lists disagree.
    pub first_mismatch: usize,
    /// Expected entries absent from the observed list.
    pub missing: Vec<String>,
    /// Observed entries absent from the expected list.
    pub unexpected: Vec<String>,
    /// Same entries, different order.
    pub reordered: bool,
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

/// Splits a space-separated manifest into its ordered entries.
#[must_use]
pub fn split_manifest(raw: &str) -> Vec<String> {
    raw.split(MANIFEST_SEPARATOR).map(str::to_string).collect()
}

// ============================================================================
// SECTION: Comparison
// ============================================================================

/// Compares manifests, returning `None` when they are identical.
#[must_use]
pub fn compare_manifest(expected: &[String], actual: &[String]) -> Option<ManifestDiff> {
    if expected == actual {
        return None;
    }
    let first_mismatch = (0 .. expected.len().max(actual.len()))
        .find(|index| expected.get(*index) != actual.get(*index))
        .unwrap_or(0);
    let missing = multiset_difference(expected, actual);
    let unexpected = multiset_difference(actual, expected);
    let reordered = missing.is_empty() && unexpected.is_empty();
    Some(ManifestDiff {
        expected: expected.to_vec(),
        actual: actual.to_vec(),
        first_mismatch,
        missing,
        unexpected,
        reordered,
    })
}

/// Returns entries of `left` not matched by an occurrence in `right`.
fn multiset_difference(left: &[String], right: &[String]) -> Vec<String> {
    let mut remaining: BTreeMap<&str, usize> = BTreeMap::new();
    for entry in right {
        *remaining.entry(entry.as_str()).or_default() += 1;
    }
    let mut out = Vec::new();
    for entry in left {
        match remaining.get_mut(entry.as_str()) {
            Some(count) if *count > 0 => *count -= 1,
            _ => out.push(entry.clone()),
        }
    }
    out
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

impl fmt::Display for ManifestDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "manifest mismatch at index {}", self.first_mismatch)?;
        if self.reordered {
            writeln!(f, "entries match but their order differs")?;
        }
        for entry in &self.missing {
            writeln!(f, "missing: {entry}")?;
        }
        for entry in &self.unexpected {
            writeln!(f, "unexpected: {entry}")?;
        }
        writeln!(f, "expected ({} entries):", self.expected.len())?;
        write_listing(f, &self.expected, &self.actual)?;
        writeln!(f, "actual ({} entries):", self.actual.len())?;
        write_listing(f, &self.actual, &self.expected)
    }
}

/// Writes `entries` one per line, marking positions that disagree with `other`.
fn write_listing(f: &mut fmt::Formatter<'_>, entries: &[String], other: &[String]) -> fmt::Result {
    for (index, entry) in entries.iter().enumerate() {
        let marker = if other.get(index) == Some(entry) { ' ' } else { '!' };
        writeln!(f, "  {marker} [{index}] \"{entry}\"")?;
    }
    Ok(())
}
