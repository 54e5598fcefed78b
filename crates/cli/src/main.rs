use std::process::ExitCode;

use clap::Parser;
use log::Level;

mod commands;
mod printer;

use commands::Cli;
use reap_runtime::logging;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        logging::init_with_level(logging::get_level_from_env().max(Level::Info)).ok();
    } else {
        logging::init().ok();
    }

    if cli.check {
        commands::check::run(&cli)
    } else {
        commands::sweep::run(&cli)
    }
}
