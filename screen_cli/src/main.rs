//! # stepscreen
//!
//! Command line front end for the step screen calculator. Prints the result
//! listing and the equation file, or writes them to disk.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match commands::execute(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
