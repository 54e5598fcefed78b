use std::process::ExitCode;

use log::info;
use reap_engine::{RuleSet, Sweep, SweepContext, SweepSummary};
use reap_fs::{DryRunRemover, FsRemover, Remover};

use crate::{
    commands::{Cli, load, load_failed},
    printer::{ConsolePrinter, StatusWriter, StdoutWriter},
};

pub fn run(cli: &Cli) -> ExitCode {
    let (location, rules) = match load(cli) {
        Ok(loaded) => loaded,
        Err(e) => return load_failed(&e),
    };

    let ctx = SweepContext::new(cli.dry_run);
    info!(
        "[sweep] {} entries from {}{}",
        rules.folders.len(),
        location.path.display(),
        if ctx.dry_run { " (dry run)" } else { "" }
    );

    let mut printer = ConsolePrinter::new(StdoutWriter, ctx.dry_run, cli.verbose);
    let result = if ctx.dry_run {
        execute(&rules, ctx, &mut DryRunRemover::new(), &mut printer)
    } else {
        execute(&rules, ctx, &mut FsRemover, &mut printer)
    };

    exit_for(&result)
}

/// Item failures are part of a completed run and still exit 0.
pub fn exit_for(result: &anyhow::Result<SweepSummary>) -> ExitCode {
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => load_failed(e),
    }
}

/// Run every entry and print the summary. Item failures are reported but do
/// not fail the run.
pub fn execute<R: Remover, W: StatusWriter>(
    rules: &RuleSet,
    ctx: SweepContext,
    remover: &mut R,
    printer: &mut ConsolePrinter<W>,
) -> anyhow::Result<SweepSummary> {
    let summary = Sweep::new(ctx, remover).run(rules, printer)?;
    printer.summary(&summary);
    Ok(summary)
}

#[cfg(test)]
#[path = "sweep_tests.rs"]
mod tests;
