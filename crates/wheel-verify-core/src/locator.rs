// crates/wheel-verify-core/src/locator.rs
// ============================================================================
// Module: Runtime Locator
// Description: Runfiles lookup translating logical paths into filesystem paths.
// Purpose: Resolve packaged artifacts relative to the running process.
// Dependencies: crate::env, std::fs, thiserror
// ============================================================================

//! ## Overview
//! The verifier never hardcodes filesystem locations. Logical paths such as
//! `workspace/external/pkg/bin/tool` are resolved through a
//! [`RuntimeLocator`]. [`Runfiles`] implements the runfiles protocol used by
//! build-system test runners: either a directory tree mirroring logical
//! paths, or a manifest file mapping each logical path to a target.
//!
//! ## Invariants
//! - Logical paths must be normalized; malformed paths fail closed.
//! - Absolute logical paths are returned unchanged.
//! - A missing manifest mapping is `Ok(None)`, not an error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use thiserror::Error;

use crate::env::EnvError;
use crate::env::EnvSource;
use crate::env::RUNFILES_DIR_ENV;
use crate::env::RUNFILES_MANIFEST_FILE_ENV;
use crate::env::TEST_SRCDIR_ENV;
use crate::env::read_env_nonempty;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum size of a runfiles manifest file.
pub const MAX_RUNFILES_MANIFEST_BYTES: u64 = 64 * 1024 * 1024;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Translates logical artifact paths into filesystem paths.
pub trait RuntimeLocator {
    /// Resolves `logical`, returning `None` when no mapping exists.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError`] when the logical path is malformed.
    fn locate(&self, logical: &str) -> Result<Option<PathBuf>, LocatorError>;
}

impl<T: RuntimeLocator + ?Sized> RuntimeLocator for &T {
    fn locate(&self, logical: &str) -> Result<Option<PathBuf>, LocatorError> {
        (**self).locate(logical)
    }
}

/// Runfiles lookup strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunfilesMode {
    /// Logical paths are joined onto a root directory.
    Directory(PathBuf),
    /// Logical paths are looked up in a parsed manifest.
    Manifest {
        /// Manifest file the entries were read from.
        source: PathBuf,
        /// Logical path to target path mappings.
        entries: BTreeMap<String, String>,
    },
}

/// Runfiles-backed [`RuntimeLocator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Runfiles {
    /// Active lookup strategy.
    mode: RunfilesMode,
}

/// Runfiles discovery and lookup failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LocatorError {
    /// The logical path is empty or not normalized.
    #[error("invalid runfiles path \"{path}\": {reason}")]
    InvalidPath {
        /// Offending logical path.
        path: String,
        /// Validation failure reason.
        reason: &'static str,
    },
    /// No runfiles root or manifest could be discovered.
    #[error("unable to locate runfiles: set RUNFILES_MANIFEST_FILE or RUNFILES_DIR")]
    NotFound,
    /// The runfiles manifest could not be read.
    #[error("failed to read runfiles manifest {}: {message}", .path.display())]
    ManifestIo {
        /// Manifest path.
        path: PathBuf,
        /// Underlying I/O error text.
        message: String,
    },
    /// The runfiles manifest exceeds the size limit.
    #[error("runfiles manifest {} is {size} bytes (limit {limit})", .path.display())]
    ManifestTooLarge {
        /// Manifest path.
        path: PathBuf,
        /// Observed size in bytes.
        size: u64,
        /// Size limit in bytes.
        limit: u64,
    },
    /// The runfiles manifest is not valid UTF-8.
    #[error("runfiles manifest {} must be valid UTF-8", .path.display())]
    ManifestEncoding {
        /// Manifest path.
        path: PathBuf,
    },
    /// A discovery variable could not be read.
    #[error(transparent)]
    Env(#[from] EnvError),
}

// ============================================================================
// SECTION: Runfiles
// ============================================================================

impl Runfiles {
    /// Discovers runfiles from the environment and the current executable.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError::NotFound`] when no strategy applies, or a read
    /// error when a discovered manifest cannot be loaded.
    pub fn create(env: &impl EnvSource) -> Result<Self, LocatorError> {
        let exe = std::env::current_exe().ok();
        Self::create_with_exe(env, exe.as_deref())
    }

    /// Discovers runfiles using an explicit executable path for the fallback
    /// sibling lookup.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError::NotFound`] when no strategy applies, or a read
    /// error when a discovered manifest cannot be loaded.
    pub fn create_with_exe(env: &impl EnvSource, exe: Option<&Path>) -> Result<Self, LocatorError> {
        if let Some(manifest) = read_env_nonempty(env, RUNFILES_MANIFEST_FILE_ENV)? {
            return Self::from_manifest_file(Path::new(&manifest));
        }
        if let Some(dir) = read_env_nonempty(env, RUNFILES_DIR_ENV)? {
            return Ok(Self::from_directory(dir));
        }
        if let Some(dir) = read_env_nonempty(env, TEST_SRCDIR_ENV)? {
            return Ok(Self::from_directory(dir));
        }
        let Some(exe) = exe else {
            return Err(LocatorError::NotFound);
        };
        let runfiles_dir = sibling(exe, ".runfiles");
        let nested_manifest = runfiles_dir.join("MANIFEST");
        if nested_manifest.is_file() {
            return Self::from_manifest_file(&nested_manifest);
        }
        let flat_manifest = sibling(exe, ".runfiles_manifest");
        if flat_manifest.is_file() {
            return Self::from_manifest_file(&flat_manifest);
        }
        if runfiles_dir.is_dir() {
            return Ok(Self::from_directory(runfiles_dir));
        }
        Err(LocatorError::NotFound)
    }

    /// Creates a directory-based locator rooted at `root`.
    #[must_use]
    pub fn from_directory(root: impl Into<PathBuf>) -> Self {
        Self {
            mode: RunfilesMode::Directory(root.into()),
        }
    }

    /// Loads a manifest-based locator from disk.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError`] when the file is unreadable, too large, or
    /// not UTF-8.
    pub fn from_manifest_file(path: &Path) -> Result<Self, LocatorError> {
        let io_error = |err: std::io::Error| LocatorError::ManifestIo {
            path: path.to_path_buf(),
            message: err.to_string(),
        };
        let size = fs::metadata(path).map_err(io_error)?.len();
        if size > MAX_RUNFILES_MANIFEST_BYTES {
            return Err(LocatorError::ManifestTooLarge {
                path: path.to_path_buf(),
                size,
                limit: MAX_RUNFILES_MANIFEST_BYTES,
            });
        }
        let bytes = fs::read(path).map_err(io_error)?;
        let content = String::from_utf8(bytes).map_err(|_| LocatorError::ManifestEncoding {
            path: path.to_path_buf(),
        })?;
        Ok(Self::from_manifest_str(path, &content))
    }

    /// Builds a manifest-based locator from manifest text.
    #[must_use]
    pub fn from_manifest_str(source: impl Into<PathBuf>, content: &str) -> Self {
        Self {
            mode: RunfilesMode::Manifest {
                source: source.into(),
                entries: parse_manifest(content),
            },
        }
    }

    /// Returns the active lookup strategy.
    #[must_use]
    pub const fn mode(&self) -> &RunfilesMode {
        &self.mode
    }

    /// Resolves a logical runfiles path.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError::InvalidPath`] when `logical` is malformed.
    pub fn rlocation(&self, logical: &str) -> Result<Option<PathBuf>, LocatorError> {
        validate_logical_path(logical)?;
        if Path::new(logical).is_absolute() {
            return Ok(Some(PathBuf::from(logical)));
        }
        match &self.mode {
            RunfilesMode::Directory(root) => Ok(Some(root.join(logical))),
            RunfilesMode::Manifest {
                entries, ..
            } => Ok(lookup_manifest(entries, logical)),
        }
    }
}

impl RuntimeLocator for Runfiles {
    fn locate(&self, logical: &str) -> Result<Option<PathBuf>, LocatorError> {
        self.rlocation(logical)
    }
}

// ============================================================================
// SECTION: Deferred Discovery
// ============================================================================

/// Runfiles locator holding the outcome of discovery.
///
/// Discovery runs once. When it fails, the error is kept and returned from
/// every lookup, so only checks that resolve an artifact report it and
/// manifest-only suites still run without a runfiles tree.
#[derive(Debug, Clone)]
pub struct DeferredLocator {
    /// Discovered runfiles, or the discovery error.
    discovered: Result<Runfiles, LocatorError>,
}

impl DeferredLocator {
    /// Discovers runfiles from the environment and the current executable.
    pub fn discover(env: &impl EnvSource) -> Self {
        Self {
            discovered: Runfiles::create(env),
        }
    }

    /// Wraps an existing discovery outcome.
    #[must_use]
    pub const fn from_result(discovered: Result<Runfiles, LocatorError>) -> Self {
        Self {
            discovered,
        }
    }
}

impl RuntimeLocator for DeferredLocator {
    fn locate(&self, logical: &str) -> Result<Option<PathBuf>, LocatorError> {
        match &self.discovered {
            Ok(runfiles) => runfiles.locate(logical),
            Err(error) => Err(error.clone()),
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Appends `suffix` to the final component of `exe`.
fn sibling(exe: &Path, suffix: &str) -> PathBuf {
    let mut raw: OsString = exe.as_os_str().to_owned();
    raw.push(suffix);
    PathBuf::from(raw)
}

/// Rejects empty and non-normalized logical paths.
fn validate_logical_path(path: &str) -> Result<(), LocatorError> {
    let invalid = |reason| {
        Err(LocatorError::InvalidPath {
            path: path.to_string(),
            reason,
        })
    };
    if path.is_empty() {
        return invalid("path is empty");
    }
    if path.starts_with("../")
        || path.contains("/..")
        || path.starts_with("./")
        || path.contains("/./")
        || path.ends_with("/.")
        || path.contains("//")
    {
        return invalid("path is not normalized");
    }
    if path.starts_with('\\') {
        return invalid("path is absolute without a drive letter");
    }
    Ok(())
}

/// Parses manifest text into logical-to-target mappings.
fn parse_manifest(content: &str) -> BTreeMap<String, String> {
    let mut entries = BTreeMap::new();
    for line in content.lines() {
        if line.is_empty() {
            continue;
        }
        let (key, value) = if let Some(escaped) = line.strip_prefix(' ') {
            let (key, value) = escaped.split_once(' ').unwrap_or((escaped, ""));
            (unescape(key), unescape(value))
        } else {
            let (key, value) = line.split_once(' ').unwrap_or((line, ""));
            (key.to_string(), value.to_string())
        };
        entries.insert(key, value);
    }
    entries
}

/// Decodes `\s`, `\n`, and `\b` escapes.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('s') => out.push(' '),
            Some('n') => out.push('\n'),
            Some('b') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Looks up `logical` exactly, then by the longest mapped directory prefix.
fn lookup_manifest(entries: &BTreeMap<String, String>, logical: &str) -> Option<PathBuf> {
    if let Some(target) = entries.get(logical) {
        return Some(PathBuf::from(target));
    }
    let mut prefix = logical;
    while let Some(end) = prefix.rfind('/') {
        prefix = &prefix[.. end];
        if let Some(target) = entries.get(prefix) {
            if target.is_empty() {
                return None;
            }
            return Some(Path::new(target).join(&logical[end + 1 ..]));
        }
    }
    None
}
