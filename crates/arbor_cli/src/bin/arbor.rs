//! Arbor CLI entry point.

use std::process::ExitCode;

use arbor_cli::{Cli, logging, render_error, run};
use clap::Parser;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logger(cli.log_level.as_deref(), cli.no_color) {
        eprintln!("warning: {e}");
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let message = render_error(&e);
            if cli.no_color {
                eprintln!("Error: {message}");
            } else {
                eprintln!("\x1b[31mError: {message}\x1b[0m");
            }
            ExitCode::FAILURE
        }
    }
}
