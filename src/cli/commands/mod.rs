//! CLI command dispatch and handlers
//!
//! Routes parsed CLI arguments to the appropriate command handler.

pub mod completions;
pub mod config;
pub mod size;
pub mod version;

use crate::cli::args::{Cli, Commands, ConfigSubcommand};
use crate::error::DmSnapError;

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// # Errors
///
/// Returns an error if the dispatched command handler fails.
pub fn dispatch(cli: Cli) -> Result<(), DmSnapError> {
    match cli.command {
        Commands::Config(cmd) => match cmd.subcommand {
            ConfigSubcommand::Validate(args) => config::validate(&args),
            ConfigSubcommand::Show(args) => config::show(&args),
        },
        Commands::Size(args) => size::run(&args),
        Commands::Completions(args) => {
            completions::run(&args);
            Ok(())
        }
        Commands::Version(args) => {
            version::run(&args);
            Ok(())
        }
    }
}
