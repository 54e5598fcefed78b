use std::process::ExitCode;

use crate::{
    commands::{Cli, load, load_failed},
    printer::{ConsolePrinter, StdoutWriter},
};

/// Validate the rule file and list what a sweep would act on.
pub fn run(cli: &Cli) -> ExitCode {
    let (location, rules) = match load(cli) {
        Ok(loaded) => loaded,
        Err(e) => return load_failed(&e),
    };

    let mut printer = ConsolePrinter::new(StdoutWriter, false, cli.verbose);
    printer.rules(&location, &rules.folders, &rules.warnings());

    ExitCode::SUCCESS
}
