//! `dmsnap` - devmapper snapshotter configuration tool

use clap::Parser;

use dmsnap::cli::args::Cli;
use dmsnap::cli::commands;
use dmsnap::error::ExitCode;
use dmsnap::observability::init_logging;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            std::process::exit(ExitCode::USAGE_ERROR);
        }
        // --help and --version
        Err(e) => e.exit(),
    };

    if !cli.quiet {
        init_logging(cli.log_format, cli.verbose, cli.color);
    }

    match commands::dispatch(cli) {
        Ok(()) => std::process::exit(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
