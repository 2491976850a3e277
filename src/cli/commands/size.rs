//! Size conversion command
//!
//! Prints the byte count the configuration loader would derive from each
//! size string.

use serde_json::json;

use crate::cli::args::{OutputFormat, SizeArgs};
use crate::config::size::{format_size, parse_size};
use crate::error::DmSnapError;

/// Convert each size argument to bytes and print it.
///
/// # Errors
///
/// Returns the first size that fails to parse.
pub fn run(args: &SizeArgs) -> Result<(), DmSnapError> {
    let parsed = args
        .values
        .iter()
        .map(|value| parse_size(value).map(|bytes| (value.as_str(), bytes)))
        .collect::<Result<Vec<_>, _>>()?;

    match args.format {
        OutputFormat::Human => {
            for (value, bytes) in &parsed {
                println!("{value}: {bytes} bytes ({})", format_size(*bytes));
            }
        }
        OutputFormat::Json => {
            let output: Vec<_> = parsed
                .iter()
                .map(|(value, bytes)| json!({ "input": value, "bytes": bytes }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
