//! kubectl-save CLI entry point
//!
//! Parses arguments, runs the command and prints errors with their
//! suggestions. Exits with status 1 on any error, including bad arguments;
//! `--help` and `--version` print to stdout and exit 0.

use clap::Parser;
use kubectl_save::cli;
use kubectl_save::core::user_friendly_error;

fn main() {
    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = match cli::Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            user_friendly_error(e.into()).display();
            std::process::exit(1);
        }
    };

    if let Err(e) = cli.execute() {
        let error_ctx = user_friendly_error(e);
        error_ctx.display();
        std::process::exit(1);
    }
}
