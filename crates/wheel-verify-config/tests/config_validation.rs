//! Config model validation tests for wheel-verify-config.
// crates/wheel-verify-config/tests/config_validation.rs
// =============================================================================
// Module: Config Model Validation Tests
// Description: Validate check definitions, limits, and the canonical example.
// Purpose: Ensure invalid suites are rejected before any check runs.
// =============================================================================

use wheel_verify_config::WheelVerifyConfig;
use wheel_verify_config::config_toml_example;
use wheel_verify_core::expectations::pip_parse_suite;

type TestResult = Result<(), String>;

fn assert_parse_invalid(content: &str, needle: &str) -> TestResult {
    match WheelVerifyConfig::parse(content) {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err(format!("expected invalid config for:\n{content}")),
    }
}

/// Minimal manifest section appended to suite-only configs.
const MANIFEST_TAIL: &str = "\n[[manifests]]\nname = \"m\"\nenv = \"M\"\nexpected = [\"x\"]\n";

#[test]
fn example_matches_builtin_suite() -> TestResult {
    let config = WheelVerifyConfig::parse(&config_toml_example()).map_err(|err| err.to_string())?;
    if config != WheelVerifyConfig::default() {
        return Err("example config drifted from the default config".to_string());
    }
    if config.to_suite() != pip_parse_suite() {
        return Err("example config drifted from the pip_parse suite".to_string());
    }
    Ok(())
}

#[test]
fn entry_point_defaults_are_applied() -> TestResult {
    let config = WheelVerifyConfig::parse(
        "[entry_point]\nenv = \"TOOL_ENTRY_POINT\"\nexpected_stdout = \"tool 1.0\"\n",
    )
    .map_err(|err| err.to_string())?;
    let suite = config.to_suite();
    let check = suite.entry_point.ok_or("entry point should be present")?;
    if check.name != "entry_point" || check.version_flag != "--version" {
        return Err(format!("unexpected defaults: {} {}", check.name, check.version_flag));
    }
    if check.workspace.is_some() || suite.name != "pip_parse" {
        return Err("workspace should be unset and suite name defaulted".to_string());
    }
    Ok(())
}

#[test]
fn empty_workspace_is_treated_as_unset() -> TestResult {
    let config = WheelVerifyConfig::parse(
        "[entry_point]\nenv = \"E\"\nworkspace = \"\"\nexpected_stdout = \"v\"\n",
    )
    .map_err(|err| err.to_string())?;
    let check = config.to_suite().entry_point.ok_or("entry point should be present")?;
    if check.logical_path("bin/tool") != "bin/tool" {
        return Err("empty workspace must not prefix the logical path".to_string());
    }
    Ok(())
}

#[test]
fn rejects_config_without_checks() -> TestResult {
    assert_parse_invalid("[suite]\nname = \"empty\"\n", "at least one check")
}

#[test]
fn rejects_unknown_fields() -> TestResult {
    assert_parse_invalid(&format!("[suite]\nname = \"s\"\ncolor = \"red\"\n{MANIFEST_TAIL}"), "unknown field")
}

#[test]
fn rejects_bad_names() -> TestResult {
    assert_parse_invalid(&format!("[suite]\nname = \"Bad Name\"\n{MANIFEST_TAIL}"), "suite.name")?;
    assert_parse_invalid(&format!("[suite]\nname = \"\"\n{MANIFEST_TAIL}"), "suite.name")?;
    let long = "a".repeat(65);
    assert_parse_invalid(&format!("[suite]\nname = \"{long}\"\n{MANIFEST_TAIL}"), "suite.name")
}

#[test]
fn rejects_invalid_env_names() -> TestResult {
    assert_parse_invalid(
        "[[manifests]]\nname = \"m\"\nenv = \"1BAD\"\nexpected = [\"x\"]\n",
        "manifests.env",
    )?;
    assert_parse_invalid(
        "[entry_point]\nenv = \"HAS-DASH\"\nexpected_stdout = \"v\"\n",
        "entry_point.env",
    )
}

#[test]
fn rejects_duplicate_check_names() -> TestResult {
    assert_parse_invalid(
        "[entry_point]\nname = \"dup\"\nenv = \"E\"\nexpected_stdout = \"v\"\n\n[[manifests]]\nname = \"dup\"\nenv = \"M\"\nexpected = [\"x\"]\n",
        "duplicate check name: dup",
    )
}

#[test]
fn rejects_untrimmed_or_empty_expected_stdout() -> TestResult {
    assert_parse_invalid(
        "[entry_point]\nenv = \"E\"\nexpected_stdout = \"v \"\n",
        "expected_stdout",
    )?;
    assert_parse_invalid("[entry_point]\nenv = \"E\"\nexpected_stdout = \"\"\n", "expected_stdout")
}

#[test]
fn rejects_empty_version_flag() -> TestResult {
    assert_parse_invalid(
        "[entry_point]\nenv = \"E\"\nversion_flag = \"\"\nexpected_stdout = \"v\"\n",
        "version_flag",
    )
}

#[test]
fn rejects_malformed_manifest_entries() -> TestResult {
    assert_parse_invalid(
        "[[manifests]]\nname = \"m\"\nenv = \"M\"\nexpected = []\n",
        "at least one entry",
    )?;
    assert_parse_invalid(
        "[[manifests]]\nname = \"m\"\nenv = \"M\"\nexpected = [\"has space\"]\n",
        "contain no spaces",
    )?;
    assert_parse_invalid(
        "[[manifests]]\nname = \"m\"\nenv = \"M\"\nexpected = [\"\"]\n",
        "non-empty",
    )
}

#[test]
fn rejects_too_many_manifests() -> TestResult {
    let mut content = String::new();
    for index in 0 .. 65 {
        content.push_str(&format!(
            "[[manifests]]\nname = \"m{index}\"\nenv = \"M{index}\"\nexpected = [\"x\"]\n"
        ));
    }
    assert_parse_invalid(&content, "too many manifests")
}

#[test]
fn malformed_toml_is_a_parse_error() -> TestResult {
    assert_parse_invalid("[suite\nname = ", "config parse error")
}
