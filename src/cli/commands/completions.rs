//! Shell completion generation

use std::io::Write;

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::{Cli, CompletionsArgs};

/// Print a completion script for the requested shell to stdout.
pub fn run(args: &CompletionsArgs) {
    write_completions(args.shell, &mut std::io::stdout());
}

/// Write a completion script for `shell` covering every `dmsnap` subcommand.
pub fn write_completions(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let bin = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, bin, out);
}
