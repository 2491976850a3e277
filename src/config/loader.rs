//! Configuration loader
//!
//! Loading runs these stages in order and stops at the first failing one:
//! 1. Existence probe (missing file → [`ConfigError::NotFound`])
//! 2. Read raw bytes
//! 3. TOML deserialization
//! 4. Normalization of `base_image_size` into bytes
//! 5. Validation (all issues collected)
//!
//! Size parsing runs before validation, so an empty `base_image_size` is
//! reported as a parse failure by the loader. [`Config::validate`] reports the
//! same field as missing when called on its own.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::schema::Config;
use crate::config::size::parse_size;
use crate::config::validation::Validator;
use crate::error::{ConfigError, Severity, ValidationIssue};

// ============================================================================
// Public API
// ============================================================================

/// Options for the configuration loader.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoaderOptions {
    /// Treat validation warnings as errors.
    pub strict: bool,
}

/// Result of loading a configuration file.
#[derive(Debug)]
pub struct LoadResult {
    /// The loaded, normalized and validated configuration.
    pub config: Config,

    /// Non-fatal issues found during validation.
    pub warnings: Vec<ValidationIssue>,
}

/// Configuration loader.
///
/// Holds no state between loads; each call reads the file once and returns
/// an independent record.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    options: LoaderOptions,
}

impl ConfigLoader {
    /// Creates a new configuration loader with the given options.
    #[must_use]
    pub const fn new(options: LoaderOptions) -> Self {
        Self { options }
    }

    /// Creates a new configuration loader with default options.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(LoaderOptions::default())
    }

    /// Loads a devmapper configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No file exists at `path` ([`ConfigError::NotFound`])
    /// - The file cannot be probed or read ([`ConfigError::Io`])
    /// - The content is not valid TOML or a field has the wrong type
    /// - `base_image_size` is not a valid size
    /// - Required fields are missing
    pub fn load(&self, path: &Path) -> Result<LoadResult, ConfigError> {
        tracing::debug!(path = %path.display(), "loading devmapper configuration");

        // Stage 1: existence probe
        if let Err(source) = std::fs::metadata(path) {
            return Err(io_error(path, source));
        }

        // Stage 2: read raw content
        let raw = std::fs::read(path).map_err(|source| io_error(path, source))?;
        let content = String::from_utf8(raw).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            line: None,
            message: format!("file is not valid UTF-8: {e}"),
        })?;

        self.load_from_str(&content, path)
    }

    /// Runs the deserialize, normalize and validate stages on in-memory TOML.
    ///
    /// `origin` is only used to label errors.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load), minus the file system failures.
    pub fn load_from_str(&self, content: &str, origin: &Path) -> Result<LoadResult, ConfigError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        // Stage 3: TOML deserialization
        let mut config: Config = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: origin.to_path_buf(),
            line: e.span().map(|span| line_of(content, span.start)),
            message: e.message().to_string(),
        })?;

        // Stage 4: normalization
        normalize(&mut config, origin)?;
        tracing::debug!(
            base_image_size = %config.base_image_size,
            bytes = config.base_image_size_bytes,
            "normalized base image size"
        );

        // Stage 5: validation
        let mut result = Validator::new().validate(&config);
        if self.options.strict {
            result
                .errors
                .extend(result.warnings.drain(..).map(|issue| ValidationIssue {
                    severity: Severity::Error,
                    ..issue
                }));
        }
        let warnings = result.into_result(Some(origin))?;

        Ok(LoadResult { config, warnings })
    }
}

/// Loads a devmapper configuration file with default options.
///
/// Warnings are emitted as `tracing` events and otherwise dropped.
///
/// # Errors
///
/// See [`ConfigLoader::load`].
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let result = ConfigLoader::with_defaults().load(path)?;
    for warning in &result.warnings {
        tracing::warn!(
            path = %path.display(),
            field = %warning.field,
            "{}",
            warning.message
        );
    }
    Ok(result.config)
}

/// Like [`load_config`], but a missing file yields `Ok(None)`.
///
/// # Errors
///
/// Every failure other than [`ConfigError::NotFound`].
pub fn load_config_optional(path: &Path) -> Result<Option<Config>, ConfigError> {
    match load_config(path) {
        Ok(config) => Ok(Some(config)),
        Err(err) if err.is_not_found() => {
            tracing::debug!(path = %path.display(), "no devmapper configuration file");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Fills in derived fields from their raw counterparts.
fn normalize(config: &mut Config, origin: &Path) -> Result<(), ConfigError> {
    config.base_image_size_bytes =
        parse_size(&config.base_image_size).map_err(|source| ConfigError::InvalidSize {
            path: origin.to_path_buf(),
            field: "base_image_size",
            value: config.base_image_size.clone(),
            source,
        })?;
    Ok(())
}

fn io_error(path: &Path, source: std::io::Error) -> ConfigError {
    let path: PathBuf = path.to_path_buf();
    if source.kind() == ErrorKind::NotFound {
        ConfigError::NotFound { path }
    } else {
        ConfigError::Io { path, source }
    }
}

/// Returns the 1-based line containing byte `offset`.
fn line_of(content: &str, offset: usize) -> usize {
    let end = offset.min(content.len());
    content.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() + 1
}

// ============================================================================
// Tests
// ============================================================================
