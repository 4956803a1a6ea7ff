// crates/wheel-verify-core/src/expectations.rs
// ============================================================================
// Module: Built-in Expectations
// Description: Literal expectations for the pip_parse packaging example.
// Purpose: Pin the version string and file manifests the pipeline must produce.
// Dependencies: crate::suite
// ============================================================================

//! ## Overview
//! The `pip_parse` suite checks a `yamllint` entry point plus the installed
//! data files of `s3cmd` and the dist-info files of `requests`. All values
//! are exact; manifest order is significant.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::suite::DEFAULT_VERSION_FLAG;
use crate::suite::EntryPointCheck;
use crate::suite::ManifestCheck;
use crate::suite::Suite;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Built-in suite name.
pub const PIP_PARSE_SUITE: &str = "pip_parse";
/// Runfiles workspace the entry point path is relative to.
pub const PIP_PARSE_WORKSPACE: &str = "rules_python_pip_parse_example";

/// Entry point check name.
pub const ENTRY_POINT_CHECK: &str = "entry_point";
/// Variable holding the yamllint entry point's relative path.
pub const YAMLLINT_ENTRY_POINT_ENV: &str = "YAMLLINT_ENTRY_POINT";
/// Expected `--version` output.
pub const YAMLLINT_VERSION: &str = "yamllint 1.26.3";

/// Wheel data manifest check name.
pub const WHEEL_DATA_CHECK: &str = "wheel_data";
/// Variable holding the s3cmd data file list.
pub const WHEEL_DATA_CONTENTS_ENV: &str = "WHEEL_DATA_CONTENTS";
/// Expected s3cmd data files, in order.
pub const WHEEL_DATA_CONTENTS: [&str; 6] = [
    "external/pypi_s3cmd/s3cmd-2.1.0.data/data/share/doc/packages/s3cmd/INSTALL.md",
    "external/pypi_s3cmd/s3cmd-2.1.0.data/data/share/doc/packages/s3cmd/LICENSE",
    "external/pypi_s3cmd/s3cmd-2.1.0.data/data/share/doc/packages/s3cmd/NEWS",
    "external/pypi_s3cmd/s3cmd-2.1.0.data/data/share/doc/packages/s3cmd/README.md",
    "external/pypi_s3cmd/s3cmd-2.1.0.data/data/share/man/man1/s3cmd.1",
    "external/pypi_s3cmd/s3cmd-2.1.0.data/scripts/s3cmd",
];

/// Dist-info manifest check name.
pub const WHEEL_DIST_INFO_CHECK: &str = "wheel_dist_info";
/// Variable holding the requests dist-info file list.
pub const WHEEL_DIST_INFO_CONTENTS_ENV: &str = "WHEEL_DIST_INFO_CONTENTS";
/// Expected requests dist-info files, in order.
pub const WHEEL_DIST_INFO_CONTENTS: [&str; 5] = [
    "external/pypi_requests/requests-2.25.1.dist-info/LICENSE",
    "external/pypi_requests/requests-2.25.1.dist-info/METADATA",
    "external/pypi_requests/requests-2.25.1.dist-info/RECORD",
    "external/pypi_requests/requests-2.25.1.dist-info/WHEEL",
    "external/pypi_requests/requests-2.25.1.dist-info/top_level.txt",
];

// ============================================================================
// SECTION: Checks
// ============================================================================

/// Entry point check for yamllint.
#[must_use]
pub fn yamllint_entry_point() -> EntryPointCheck {
    EntryPointCheck {
        name: ENTRY_POINT_CHECK.to_string(),
        env_var: YAMLLINT_ENTRY_POINT_ENV.to_string(),
        workspace: Some(PIP_PARSE_WORKSPACE.to_string()),
        version_flag: DEFAULT_VERSION_FLAG.to_string(),
        expected_stdout: YAMLLINT_VERSION.to_string(),
    }
}

/// Manifest check for the s3cmd wheel data directory.
#[must_use]
pub fn wheel_data_manifest() -> ManifestCheck {
    ManifestCheck {
        name: WHEEL_DATA_CHECK.to_string(),
        env_var: WHEEL_DATA_CONTENTS_ENV.to_string(),
        expected: WHEEL_DATA_CONTENTS.iter().map(ToString::to_string).collect(),
    }
}

/// Manifest check for the requests dist-info directory.
#[must_use]
pub fn wheel_dist_info_manifest() -> ManifestCheck {
    ManifestCheck {
        name: WHEEL_DIST_INFO_CHECK.to_string(),
        env_var: WHEEL_DIST_INFO_CONTENTS_ENV.to_string(),
        expected: WHEEL_DIST_INFO_CONTENTS.iter().map(ToString::to_string).collect(),
    }
}

/// The full `pip_parse` suite.
#[must_use]
pub fn pip_parse_suite() -> Suite {
    Suite {
        name: PIP_PARSE_SUITE.to_string(),
        entry_point: Some(yamllint_entry_point()),
        manifests: vec![wheel_data_manifest(), wheel_dist_info_manifest()],
    }
}
