//! Configuration validation
//!
//! Validation runs on a fully deserialized and normalized [`Config`] and
//! collects ALL issues instead of stopping at the first one, so a single run
//! reports every missing field.
//!
//! Only the raw fields are checked. The derived byte count is never
//! re-validated.

use std::path::Path;

use crate::config::schema::Config;
use crate::config::size::parse_size;
use crate::error::{ConfigError, Severity, ValidationIssue};

// ============================================================================
// Public API
// ============================================================================

/// Result of configuration validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Validation errors (prevent loading).
    pub errors: Vec<ValidationIssue>,

    /// Validation warnings (informational).
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Returns `true` if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns `true` if validation passed (no errors).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Converts the result into a `Result`, attaching `path` to the error.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] carrying every error if any exist.
    pub fn into_result(self, path: Option<&Path>) -> Result<Vec<ValidationIssue>, ConfigError> {
        if self.has_errors() {
            return Err(ConfigError::Validation {
                path: path.map(Path::to_path_buf),
                errors: self.errors,
            });
        }
        Ok(self.warnings)
    }
}

/// Configuration validator.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
}

impl Validator {
    /// Creates a new validator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates a configuration and returns every error and warning found.
    pub fn validate(&mut self, config: &Config) -> ValidationResult {
        self.errors.clear();
        self.warnings.clear();

        self.validate_required(config);
        self.validate_pool_name(config);
        self.validate_root_path(config);
        self.validate_base_image_size(config);

        ValidationResult {
            errors: std::mem::take(&mut self.errors),
            warnings: std::mem::take(&mut self.warnings),
        }
    }

    // ========================================================================
    // Required Fields
    // ========================================================================

    fn validate_required(&mut self, config: &Config) {
        if config.pool_name.is_empty() {
            self.add_error("pool_name", "pool_name is required");
        }

        if config.root_path.as_os_str().is_empty() {
            self.add_error("root_path", "root_path is required");
        }

        if config.base_image_size.is_empty() {
            self.add_error("base_image_size", "base_image_size is required");
        }
    }

    // ========================================================================
    // Advisory Checks
    // ========================================================================

    fn validate_pool_name(&mut self, config: &Config) {
        if config.pool_name.starts_with("/dev/mapper/") {
            self.add_warning(
                "pool_name",
                &format!(
                    "pool_name '{}' includes the /dev/mapper/ prefix; expected the bare device name",
                    config.pool_name
                ),
            );
        }
    }

    fn validate_root_path(&mut self, config: &Config) {
        let root = &config.root_path;
        if !root.as_os_str().is_empty() && !root.is_absolute() {
            self.add_warning(
                "root_path",
                &format!(
                    "root_path '{}' is relative and resolves against the working directory",
                    root.display()
                ),
            );
        }
    }

    fn validate_base_image_size(&mut self, config: &Config) {
        // Empty is reported as missing; unparseable is the loader's concern.
        if parse_size(&config.base_image_size) == Ok(0) {
            self.add_warning(
                "base_image_size",
                &format!(
                    "base_image_size '{}' is zero bytes",
                    config.base_image_size
                ),
            );
        }
    }

    // ========================================================================
    // Helper Methods
    // ========================================================================

    fn add_error(&mut self, field: &str, message: &str) {
        self.errors.push(ValidationIssue {
            field: field.to_string(),
            message: message.to_string(),
            severity: Severity::Error,
        });
    }

    fn add_warning(&mut self, field: &str, message: &str) {
        self.warnings.push(ValidationIssue {
            field: field.to_string(),
            message: message.to_string(),
            severity: Severity::Warning,
        });
    }
}

impl Config {
    /// Checks that every required field is non-empty.
    ///
    /// Usable on records built in code as well as loaded ones. Warnings are
    /// not reported here; use [`Validator`] to see them.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] listing every missing field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Validator::new().validate(self).into_result(None).map(|_| ())
    }
}

// ============================================================================
// Tests
// ============================================================================
