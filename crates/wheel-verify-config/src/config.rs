// crates/wheel-verify-config/src/config.rs
// ============================================================================
// Module: Wheel Verify Configuration
// Description: Configuration loading and validation for verification suites.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: wheel-verify-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! When no file is given and none is discovered, the built-in `pip_parse`
//! suite is used. Invalid configuration fails closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use wheel_verify_core::DEFAULT_VERSION_FLAG;
use wheel_verify_core::EntryPointCheck;
use wheel_verify_core::EnvSource;
use wheel_verify_core::ManifestCheck;
use wheel_verify_core::Suite;
use wheel_verify_core::env::read_env_nonempty;
use wheel_verify_core::expectations;
use wheel_verify_core::manifest::MANIFEST_SEPARATOR;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename probed in the working directory.
pub const DEFAULT_CONFIG_NAME: &str = "wheel-verify.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "WHEEL_VERIFY_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum length of a check or suite name.
pub(crate) const MAX_NAME_LENGTH: usize = 64;
/// Maximum length of an environment variable name.
pub(crate) const MAX_ENV_NAME_LENGTH: usize = 128;
/// Maximum number of manifest checks.
pub(crate) const MAX_MANIFESTS: usize = 64;
/// Maximum number of entries in one manifest.
pub(crate) const MAX_MANIFEST_ENTRIES: usize = 4096;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Wheel Verify configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WheelVerifyConfig {
    /// Suite metadata.
    #[serde(default)]
    pub suite: SuiteConfig,
    /// Optional entry-point check.
    #[serde(default)]
    pub entry_point: Option<EntryPointConfig>,
    /// Manifest checks in execution order.
    #[serde(default)]
    pub manifests: Vec<ManifestConfig>,
    /// File the configuration was loaded from (not serialized).
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// Suite metadata.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SuiteConfig {
    /// Suite name used in reports.
    #[serde(default = "default_suite_name")]
    pub name: String,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            name: default_suite_name(),
        }
    }
}

/// Entry-point check configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EntryPointConfig {
    /// Check name.
    #[serde(default = "default_entry_point_name")]
    pub name: String,
    /// Variable holding the entry point's relative path.
    pub env: String,
    /// Runfiles workspace prefixed to the relative path.
    #[serde(default)]
    pub workspace: Option<String>,
    /// Single argument passed to the entry point.
    #[serde(default = "default_version_flag")]
    pub version_flag: String,
    /// Expected trimmed stdout.
    pub expected_stdout: String,
}

/// Manifest check configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestConfig {
    /// Check name.
    pub name: String,
    /// Variable holding the space-separated file list.
    pub env: String,
    /// Expected entries in order.
    pub expected: Vec<String>,
}

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Loading
// ============================================================================

impl Default for WheelVerifyConfig {
    fn default() -> Self {
        Self::from_suite(&expectations::pip_parse_suite())
    }
}

impl WheelVerifyConfig {
    /// Loads configuration using the default resolution rules.
    ///
    /// Resolution order: explicit `path`, then [`CONFIG_ENV_VAR`], then
    /// [`DEFAULT_CONFIG_NAME`] in the working directory if it exists, then
    /// the built-in suite.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>, env: &impl EnvSource) -> Result<Self, ConfigError> {
        match resolve_path(path, env)? {
            Some(resolved) => Self::load_file(&resolved),
            None => Ok(Self::default()),
        }
    }

    /// Loads and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file is unreadable, oversized, not
    /// UTF-8, unparsable, or invalid.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        validate_path(path)?;
        let bytes = fs::read(path).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let mut config = Self::parse(content)?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parses and validates configuration text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the text is unparsable or invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Builds a configuration mirroring an existing suite.
    #[must_use]
    pub fn from_suite(suite: &Suite) -> Self {
        Self {
            suite: SuiteConfig {
                name: suite.name.clone(),
            },
            entry_point: suite.entry_point.as_ref().map(|check| EntryPointConfig {
                name: check.name.clone(),
                env: check.env_var.clone(),
                workspace: check.workspace.clone(),
                version_flag: check.version_flag.clone(),
                expected_stdout: check.expected_stdout.clone(),
            }),
            manifests: suite
                .manifests
                .iter()
                .map(|check| ManifestConfig {
                    name: check.name.clone(),
                    env: check.env_var.clone(),
                    expected: check.expected.clone(),
                })
                .collect(),
            source: None,
        }
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_name("suite.name", &self.suite.name)?;
        if self.entry_point.is_none() && self.manifests.is_empty() {
            return Err(ConfigError::Invalid("config must define at least one check".to_string()));
        }
        if self.manifests.len() > MAX_MANIFESTS {
            return Err(ConfigError::Invalid(format!(
                "too many manifests: {} (max {MAX_MANIFESTS})",
                self.manifests.len()
            )));
        }
        let mut names = BTreeSet::new();
        if let Some(entry_point) = &self.entry_point {
            entry_point.validate()?;
            names.insert(entry_point.name.as_str());
        }
        for manifest in &self.manifests {
            manifest.validate()?;
            if !names.insert(manifest.name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate check name: {}",
                    manifest.name
                )));
            }
        }
        Ok(())
    }

    /// Converts the configuration into a runnable suite.
    #[must_use]
    pub fn to_suite(&self) -> Suite {
        Suite {
            name: self.suite.name.clone(),
            entry_point: self.entry_point.as_ref().map(|config| EntryPointCheck {
                name: config.name.clone(),
                env_var: config.env.clone(),
                workspace: config.workspace.clone().filter(|workspace| !workspace.is_empty()),
                version_flag: config.version_flag.clone(),
                expected_stdout: config.expected_stdout.clone(),
            }),
            manifests: self
                .manifests
                .iter()
                .map(|config| ManifestCheck {
                    name: config.name.clone(),
                    env_var: config.env.clone(),
                    expected: config.expected.clone(),
                })
                .collect(),
        }
    }
}

impl EntryPointConfig {
    /// Validates entry-point settings.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_name("entry_point.name", &self.name)?;
        validate_env_name("entry_point.env", &self.env)?;
        if let Some(workspace) = &self.workspace
            && (workspace.starts_with('/') || workspace.ends_with('/'))
        {
            return Err(ConfigError::Invalid(
                "entry_point.workspace must not start or end with '/'".to_string(),
            ));
        }
        if self.version_flag.is_empty() {
            return Err(ConfigError::Invalid("entry_point.version_flag must be set".to_string()));
        }
        if self.expected_stdout.is_empty() || self.expected_stdout.trim() != self.expected_stdout
        {
            return Err(ConfigError::Invalid(
                "entry_point.expected_stdout must be non-empty without surrounding whitespace"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

impl ManifestConfig {
    /// Validates manifest settings.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_name("manifests.name", &self.name)?;
        validate_env_name("manifests.env", &self.env)?;
        if self.expected.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "manifest {} must list at least one entry",
                self.name
            )));
        }
        if self.expected.len() > MAX_MANIFEST_ENTRIES {
            return Err(ConfigError::Invalid(format!(
                "manifest {} exceeds {MAX_MANIFEST_ENTRIES} entries",
                self.name
            )));
        }
        for entry in &self.expected {
            if entry.is_empty() || entry.contains(MANIFEST_SEPARATOR) {
                return Err(ConfigError::Invalid(format!(
                    "manifest {} entries must be non-empty and contain no spaces",
                    self.name
                )));
            }
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default suite name.
fn default_suite_name() -> String {
    expectations::PIP_PARSE_SUITE.to_string()
}

/// Default entry-point check name.
fn default_entry_point_name() -> String {
    expectations::ENTRY_POINT_CHECK.to_string()
}

/// Default entry-point version flag.
fn default_version_flag() -> String {
    DEFAULT_VERSION_FLAG.to_string()
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI, environment, or the working directory.
fn resolve_path(path: Option<&Path>, env: &impl EnvSource) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(path) = path {
        return Ok(Some(path.to_path_buf()));
    }
    let env_path = read_env_nonempty(env, CONFIG_ENV_VAR)
        .map_err(|err| ConfigError::Invalid(err.to_string()))?;
    if let Some(env_path) = env_path {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(Some(PathBuf::from(env_path)));
    }
    let default = PathBuf::from(DEFAULT_CONFIG_NAME);
    Ok(default.is_file().then_some(default))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a check or suite name.
fn validate_name(field: &str, name: &str) -> Result<(), ConfigError> {
    if name.is_empty() || name.len() > MAX_NAME_LENGTH {
        return Err(ConfigError::Invalid(format!(
            "{field} must be 1..={MAX_NAME_LENGTH} characters"
        )));
    }
    if !name.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_' || b == b'-')
    {
        return Err(ConfigError::Invalid(format!("{field} must match [a-z0-9_-]+: {name}")));
    }
    Ok(())
}

/// Validates an environment variable name.
fn validate_env_name(field: &str, name: &str) -> Result<(), ConfigError> {
    let mut bytes = name.bytes();
    let valid_head = bytes.next().is_some_and(|b| b.is_ascii_alphabetic() || b == b'_');
    let valid_tail = bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_');
    if !valid_head || !valid_tail || name.len() > MAX_ENV_NAME_LENGTH {
        return Err(ConfigError::Invalid(format!(
            "{field} must be a valid environment variable name: {name}"
        )));
    }
    Ok(())
}
