//! CLI argument definitions
//!
//! All Clap derive structs for `dmsnap` command-line parsing.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::config::DEFAULT_CONFIG_PATH;
use crate::observability::LogFormat;

// ============================================================================
// Root CLI
// ============================================================================

/// Configuration tooling for the devmapper snapshotter.
#[derive(Parser, Debug)]
#[command(name = "dmsnap", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "DMSNAP_COLOR")]
    pub color: ColorChoice,

    /// Log output format.
    #[arg(long, default_value = "human", global = true)]
    pub log_format: LogFormat,
}

// ============================================================================
// Top-Level Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect and validate devmapper configuration files.
    Config(ConfigCommand),

    /// Convert human-readable sizes to byte counts.
    Size(SizeArgs),

    /// Generate shell completion scripts.
    Completions(CompletionsArgs),

    /// Display version information.
    Version(VersionArgs),
}

// ============================================================================
// Config Command
// ============================================================================

/// Configuration commands.
#[derive(Args, Debug)]
pub struct ConfigCommand {
    /// Config subcommand.
    #[command(subcommand)]
    pub subcommand: ConfigSubcommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Validate configuration files.
    Validate(ConfigValidateArgs),

    /// Load a configuration file and print the normalized result.
    Show(ConfigShowArgs),
}

/// Arguments for `config validate`.
#[derive(Args, Debug)]
pub struct ConfigValidateArgs {
    /// Configuration files to validate.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,

    /// Enable strict validation (warnings become errors).
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for `config show`.
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Path to the TOML configuration file.
    #[arg(short, long, env = "DMSNAP_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: ShowFormat,
}

// ============================================================================
// Size / Completions / Version
// ============================================================================

/// Arguments for `size`.
#[derive(Args, Debug)]
pub struct SizeArgs {
    /// Sizes to convert (e.g. 32GB, 32GiB, 512).
    #[arg(required = true)]
    pub values: Vec<String>,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

/// Arguments for shell completion generation.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script.
    pub shell: clap_complete::Shell,
}

/// Arguments for version display.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Output format for structured output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

/// Output format for `config show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ShowFormat {
    /// Human-readable summary.
    #[default]
    Human,
    /// JSON, including the derived byte count.
    Json,
    /// TOML, as it would be written to disk.
    Toml,
}

// ============================================================================
// Tests
// ============================================================================
