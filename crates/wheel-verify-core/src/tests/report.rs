// crates/wheel-verify-core/src/tests/report.rs
// ============================================================================
// Module: Report Serialization Tests
// Description: Unit coverage for report labels and JSON shape.
// Purpose: Keep machine-readable output stable.
// Dependencies: serde_json
// ============================================================================

use serde_json::json;

use crate::manifest::compare_manifest;
use crate::report::CheckKind;
use crate::report::CheckReport;
use crate::report::CheckStatus;
use crate::report::SuiteReport;
use crate::verifier::FailureKind;
use crate::verifier::VerifyError;

#[test]
fn failure_kind_labels_match_serialized_names() {
    let kinds = [
        FailureKind::MissingEnvironmentVariable,
        FailureKind::InvalidEnvironmentValue,
        FailureKind::Locator,
        FailureKind::ArtifactNotFound,
        FailureKind::Spawn,
        FailureKind::SubprocessFailure,
        FailureKind::NonUtf8Output,
        FailureKind::UnexpectedOutput,
        FailureKind::ManifestMismatch,
    ];
    for kind in kinds {
        assert_eq!(serde_json::to_value(kind).unwrap(), json!(kind.as_str()));
    }
}

#[test]
fn passing_check_omits_failure() {
    let report = CheckReport::from_result::<()>("entry_point", CheckKind::EntryPoint, "E", &Ok(()));
    assert_eq!(report.status, CheckStatus::Pass);
    assert_eq!(
        serde_json::to_value(&report).unwrap(),
        json!({
            "name": "entry_point",
            "kind": "entry_point",
            "env_var": "E",
            "status": "pass",
        })
    );
}

#[test]
fn unexpected_output_failure_has_no_diff() {
    let error = VerifyError::UnexpectedOutput {
        expected: "yamllint 1.26.3".to_string(),
        actual: "yamllint 1.26.2".to_string(),
    };
    let report = CheckReport::from_result::<()>("entry_point", CheckKind::EntryPoint, "E", &Err(error));
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["failure"]["kind"], "unexpected_output");
    assert_eq!(
        value["failure"]["message"],
        "unexpected output: expected \"yamllint 1.26.3\", got \"yamllint 1.26.2\""
    );
    assert!(value["failure"].get("diff").is_none());
}

#[test]
fn manifest_failure_carries_full_diff() {
    let expected = vec!["a".to_string(), "b".to_string()];
    let actual = vec!["a".to_string()];
    let diff = compare_manifest(&expected, &actual).unwrap();
    let report = CheckReport::from_result::<()>(
        "wheel_data",
        CheckKind::Manifest,
        "M",
        &Err(VerifyError::ManifestMismatch(Box::new(diff))),
    );
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["failure"]["diff"]["expected"], json!(["a", "b"]));
    assert_eq!(value["failure"]["diff"]["actual"], json!(["a"]));
    assert_eq!(value["failure"]["diff"]["missing"], json!(["b"]));
    assert_eq!(value["failure"]["diff"]["first_mismatch"], 1);
}

#[test]
fn suite_report_counts_failures() {
    let pass = CheckReport::from_result::<()>("a", CheckKind::Manifest, "A", &Ok(()));
    let fail = CheckReport::from_result::<()>(
        "b",
        CheckKind::Manifest,
        "B",
        &Err(VerifyError::MissingEnvironmentVariable {
            name: "B".to_string(),
        }),
    );
    let report = SuiteReport {
        suite: "s".to_string(),
        checks: vec![pass, fail],
    };
    assert!(!report.passed());
    assert_eq!(report.failures(), 1);
    assert!(SuiteReport {
        suite: "empty".to_string(),
        checks: Vec::new(),
    }
    .passed());
}
