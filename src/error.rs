//! Error types for `dmsnap`
//!
//! Every failure of the configuration pipeline is a [`ConfigError`]. Callers
//! that need to react to a specific failure (most commonly "no configuration
//! file was supplied") match on [`ConfigError::kind`] instead of inspecting
//! messages.

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::size::SizeParseError;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `dmsnap` CLI operations.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Configuration error (invalid TOML, bad size, validation failure)
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (file not found, permission denied)
    pub const IO_ERROR: i32 = 3;

    /// Usage error (invalid arguments, missing required options)
    pub const USAGE_ERROR: i32 = 64;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `dmsnap` operations.
#[derive(Debug, Error)]
pub enum DmSnapError {
    /// Configuration loading or validation error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A size string given on the command line could not be parsed
    #[error(transparent)]
    Size(#[from] SizeParseError),

    /// One or more files failed validation
    #[error("{invalid} of {total} configuration file(s) failed validation")]
    ValidationFailed {
        /// Number of files that failed to load
        invalid: usize,
        /// Number of files checked
        total: usize,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML serialization error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),
}

impl DmSnapError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(err) => match err.kind() {
                ConfigErrorKind::NotFound | ConfigErrorKind::Io => ExitCode::IO_ERROR,
                ConfigErrorKind::Parse | ConfigErrorKind::Validation => ExitCode::CONFIG_ERROR,
            },
            Self::Size(_) | Self::ValidationFailed { .. } | Self::Toml(_) => ExitCode::CONFIG_ERROR,
            Self::Io(_) => ExitCode::IO_ERROR,
            Self::Json(_) => ExitCode::ERROR,
        }
    }
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Coarse classification of a [`ConfigError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorKind {
    /// No file exists at the given path.
    NotFound,
    /// The file exists but could not be probed or read.
    Io,
    /// The document or one of its values could not be parsed.
    Parse,
    /// The document is well-formed but required fields are missing.
    Validation,
}

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No configuration file at the given path
    #[error("devmapper configuration not found: {}", .path.display())]
    NotFound {
        /// Path that was probed
        path: PathBuf,
    },

    /// The file exists but could not be read
    #[error("failed to read devmapper configuration {}: {source}", .path.display())]
    Io {
        /// Path to the configuration file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing or field deserialization failed
    #[error("failed to parse devmapper TOML {}{}: {message}", .path.display(), line_suffix(.line.as_ref()))]
    Parse {
        /// Path to the configuration file
        path: PathBuf,
        /// Line number where the error occurred (if available)
        line: Option<usize>,
        /// Error message from the parser
        message: String,
    },

    /// A size field could not be converted to a byte count
    #[error("failed to parse {field} '{value}' in {}: {source}", .path.display())]
    InvalidSize {
        /// Path to the configuration file
        path: PathBuf,
        /// Name of the offending field
        field: &'static str,
        /// The raw value found in the document
        value: String,
        /// Why the value was rejected
        #[source]
        source: SizeParseError,
    },

    /// One or more required fields are missing
    #[error("{}", summarize(.path.as_deref(), .errors))]
    Validation {
        /// Path to the configuration file, if the record came from one
        path: Option<PathBuf>,
        /// Every issue found, in field order
        errors: Vec<ValidationIssue>,
    },
}

impl ConfigError {
    /// Returns the kind of failure this error represents.
    #[must_use]
    pub const fn kind(&self) -> ConfigErrorKind {
        match self {
            Self::NotFound { .. } => ConfigErrorKind::NotFound,
            Self::Io { .. } => ConfigErrorKind::Io,
            Self::Parse { .. } | Self::InvalidSize { .. } => ConfigErrorKind::Parse,
            Self::Validation { .. } => ConfigErrorKind::Validation,
        }
    }

    /// Returns `true` if no configuration file exists at the probed path.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns the validation issues carried by this error (empty for other kinds).
    #[must_use]
    pub fn issues(&self) -> &[ValidationIssue] {
        match self {
            Self::Validation { errors, .. } => errors,
            _ => &[],
        }
    }
}

fn line_suffix(line: Option<&usize>) -> String {
    line.map_or_else(String::new, |l| format!(" (line {l})"))
}

fn summarize(path: Option<&Path>, errors: &[ValidationIssue]) -> String {
    let messages = errors
        .iter()
        .map(|issue| issue.message.as_str())
        .collect::<Vec<_>>()
        .join("; ");
    match path {
        Some(path) => format!("invalid devmapper configuration {}: {messages}", path.display()),
        None => format!("invalid devmapper configuration: {messages}"),
    }
}

// ============================================================================
// Validation Types
// ============================================================================

/// A single issue found during configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// TOML key of the problematic field (e.g., "pool_name")
    pub field: String,
    /// Description of the validation issue
    pub message: String,
    /// Severity level of the issue
    pub severity: Severity,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.severity {
            Severity::Error => f.write_str(&self.message),
            Severity::Warning => write!(f, "warning: {}", self.message),
        }
    }
}

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Prevents the configuration from being used
    Error,
    /// Worth reporting, does not prevent loading
    Warning,
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for `dmsnap` operations.
pub type Result<T> = std::result::Result<T, DmSnapError>;

// ============================================================================
// Tests
// ============================================================================
