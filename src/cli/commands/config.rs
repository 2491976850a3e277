//! Config command handlers
//!
//! Implements `config validate` and `config show`.

use std::path::Path;

use serde_json::{Value, json};

use crate::cli::args::{ConfigShowArgs, ConfigValidateArgs, OutputFormat, ShowFormat};
use crate::config::loader::{ConfigLoader, LoadResult, LoaderOptions};
use crate::config::schema::Config;
use crate::config::size::format_size;
use crate::error::{ConfigError, ConfigErrorKind, DmSnapError, ValidationIssue};

/// Validate configuration files.
///
/// Every file is checked even if an earlier one fails.
///
/// # Errors
///
/// With a single file, returns that file's [`ConfigError`]. With several,
/// returns [`DmSnapError::ValidationFailed`] if any of them failed.
pub fn validate(args: &ConfigValidateArgs) -> Result<(), DmSnapError> {
    let loader = ConfigLoader::new(LoaderOptions {
        strict: args.strict,
    });

    let mut reports = Vec::with_capacity(args.files.len());
    let mut invalid = 0;
    let mut last_error = None;

    for path in &args.files {
        tracing::info!(file = %path.display(), "validating configuration");

        match loader.load(path) {
            Ok(result) => {
                tracing::info!(file = %path.display(), "configuration valid");
                reports.push(file_report(path, Ok(&result)));
                if args.format == OutputFormat::Human {
                    print_valid(path, &result.warnings);
                }
            }
            Err(err) => {
                invalid += 1;
                reports.push(file_report(path, Err(&err)));
                if args.format == OutputFormat::Human {
                    print_invalid(path, &err);
                }
                last_error = Some(err);
            }
        }
    }

    if args.format == OutputFormat::Json {
        let output = json!({
            "files": reports,
            "summary": {
                "total": args.files.len(),
                "valid": args.files.len() - invalid,
                "invalid": invalid,
            },
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    }

    match last_error {
        None => Ok(()),
        Some(err) if args.files.len() == 1 => Err(err.into()),
        Some(_) => Err(DmSnapError::ValidationFailed {
            invalid,
            total: args.files.len(),
        }),
    }
}

/// Load a configuration file and print the normalized record.
///
/// # Errors
///
/// Returns the loader's error, or a serialization error for JSON/TOML output.
pub fn show(args: &ConfigShowArgs) -> Result<(), DmSnapError> {
    tracing::info!(config = %args.config.display(), "loading configuration");

    let result = ConfigLoader::with_defaults().load(&args.config)?;
    for warning in &result.warnings {
        tracing::warn!(field = %warning.field, "{}", warning.message);
    }

    let config = &result.config;
    match args.format {
        ShowFormat::Human => print_config(config),
        ShowFormat::Json => println!("{}", serde_json::to_string_pretty(&config_json(config))?),
        ShowFormat::Toml => print!("{}", config.to_toml_string()?),
    }

    Ok(())
}

fn print_config(config: &Config) {
    println!("root_path:        {}", config.root_path.display());
    println!("pool_name:        {}", config.pool_name);
    println!(
        "base_image_size:  {} ({} bytes, {})",
        config.base_image_size,
        config.base_image_size_bytes,
        format_size(config.base_image_size_bytes)
    );
    println!("async_remove:     {}", config.async_remove);
    println!("discard_blocks:   {}", config.discard_blocks);
}

/// Renders a configuration as JSON, including the derived byte count.
fn config_json(config: &Config) -> Value {
    json!({
        "root_path": config.root_path.display().to_string(),
        "pool_name": config.pool_name,
        "base_image_size": config.base_image_size,
        "base_image_size_bytes": config.base_image_size_bytes,
        "async_remove": config.async_remove,
        "discard_blocks": config.discard_blocks,
    })
}

fn print_valid(path: &Path, warnings: &[ValidationIssue]) {
    println!("{}: ok", path.display());
    for warning in warnings {
        println!("  {warning}");
    }
}

fn print_invalid(path: &Path, err: &ConfigError) {
    println!("{}: invalid", path.display());
    if err.issues().is_empty() {
        println!("  {err}");
    } else {
        for issue in err.issues() {
            println!("  {issue}");
        }
    }
}

fn file_report(path: &Path, outcome: Result<&LoadResult, &ConfigError>) -> Value {
    match outcome {
        Ok(result) => json!({
            "path": path.display().to_string(),
            "valid": true,
            "errors": [],
            "warnings": result.warnings.iter().map(issue_json).collect::<Vec<_>>(),
        }),
        Err(err) => {
            let errors = if err.issues().is_empty() {
                let field = match err {
                    ConfigError::InvalidSize { field, .. } => Some(*field),
                    _ => None,
                };
                vec![json!({ "field": field, "message": err.to_string() })]
            } else {
                err.issues().iter().map(issue_json).collect()
            };
            json!({
                "path": path.display().to_string(),
                "valid": false,
                "kind": kind_name(err.kind()),
                "errors": errors,
                "warnings": [],
            })
        }
    }
}

fn issue_json(issue: &ValidationIssue) -> Value {
    json!({ "field": issue.field, "message": issue.message })
}

const fn kind_name(kind: ConfigErrorKind) -> &'static str {
    match kind {
        ConfigErrorKind::NotFound => "not_found",
        ConfigErrorKind::Io => "io",
        ConfigErrorKind::Parse => "parse",
        ConfigErrorKind::Validation => "validation",
    }
}
