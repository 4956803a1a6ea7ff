// crates/wheel-verify-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payloads.
// Purpose: Deterministic examples for docs and tooling.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical example for Wheel Verify configuration. The example is
//! equivalent to the built-in `pip_parse` suite.

/// Returns a canonical example `wheel-verify.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"[suite]
name = "pip_parse"

[entry_point]
name = "entry_point"
env = "YAMLLINT_ENTRY_POINT"
workspace = "rules_python_pip_parse_example"
version_flag = "--version"
expected_stdout = "yamllint 1.26.3"

[[manifests]]
name = "wheel_data"
env = "WHEEL_DATA_CONTENTS"
expected = [
  "external/pypi_s3cmd/s3cmd-2.1.0.data/data/share/doc/packages/s3cmd/INSTALL.md",
  "external/pypi_s3cmd/s3cmd-2.1.0.data/data/share/doc/packages/s3cmd/LICENSE",
  "external/pypi_s3cmd/s3cmd-2.1.0.data/data/share/doc/packages/s3cmd/NEWS",
  "external/pypi_s3cmd/s3cmd-2.1.0.data/data/share/doc/packages/s3cmd/README.md",
  "external/pypi_s3cmd/s3cmd-2.1.0.data/data/share/man/man1/s3cmd.1",
  "external/pypi_s3cmd/s3cmd-2.1.0.data/scripts/s3cmd",
]

[[manifests]]
name = "wheel_dist_info"
env = "WHEEL_DIST_INFO_CONTENTS"
expected = [
  "external/pypi_requests/requests-2.25.1.dist-info/LICENSE",
  "external/pypi_requests/requests-2.25.1.dist-info/METADATA",
  "external/pypi_requests/requests-2.25.1.dist-info/RECORD",
  "external/pypi_requests/requests-2.25.1.dist-info/WHEEL",
  "external/pypi_requests/requests-2.25.1.dist-info/top_level.txt",
]
"#,
    )
}
