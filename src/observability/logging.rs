//! Logging initialization for `dmsnap`.
//!
//! Events go to stderr so that command output on stdout stays parseable.
//! Verbosity flags raise the level of this crate's events only; other crates
//! stay at `warn`. `DMSNAP_LOG_LEVEL` replaces the whole filter.

use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

use crate::cli::args::ColorChoice;

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_LEVEL_ENV: &str = "DMSNAP_LOG_LEVEL";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    /// Plain lines without timestamps.
    #[default]
    Human,
    /// Newline-delimited JSON with timestamps.
    Json,
}

/// Level for this crate's events at the given `-v` count (saturates at trace).
#[must_use]
pub const fn verbosity_to_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Filter directive used when `DMSNAP_LOG_LEVEL` is unset.
#[must_use]
pub fn default_filter(verbosity: u8) -> String {
    format!(
        "warn,{}={}",
        env!("CARGO_CRATE_NAME"),
        verbosity_to_directive(verbosity)
    )
}

/// Whether ANSI colors should be emitted on stderr.
#[must_use]
pub const fn ansi_enabled(color: ColorChoice, stderr_is_terminal: bool, no_color: bool) -> bool {
    match color {
        ColorChoice::Auto => stderr_is_terminal && !no_color,
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    }
}

/// Initializes the global tracing subscriber.
///
/// Uses `try_init()`, so only the first call in a process takes effect.
pub fn init_logging(format: LogFormat, verbosity: u8, color: ColorChoice) {
    let filter = EnvFilter::try_from_env(LOG_LEVEL_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    let _ = match format {
        LogFormat::Human => builder
            .without_time()
            .with_ansi(ansi_enabled(
                color,
                std::io::stderr().is_terminal(),
                std::env::var_os("NO_COLOR").is_some(),
            ))
            .try_init(),
        LogFormat::Json => builder.json().with_ansi(false).try_init(),
    };
}
