pub mod check;
pub mod sweep;

use std::{path::PathBuf, process::ExitCode};

use anyhow::Context;
use clap::Parser;
use log::{error, info};
use reap_engine::{ConfigError, RuleSet, load_rules};
use reap_runtime::{ConfigLocation, resolve_config_path};

/// Exit status for a rule file that cannot be used.
pub const EXIT_CONFIG: u8 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "reap",
    version,
    about = "Reap - rule-driven cleanup of old and unwanted files"
)]
pub struct Cli {
    /// Rule file to use.
    ///
    /// Falls back to $REAP_CONFIG, ./config.json, then the user config
    /// directory (e.g. ~/.config/reap/config.json).
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Report what would be deleted without deleting anything.
    #[arg(long, short = 'n')]
    pub dry_run: bool,

    /// Validate the rule file, print the entries and exit.
    #[arg(long, conflicts_with = "dry_run")]
    pub check: bool,

    /// Show each folder entry as it starts and log at info level.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

/// Resolve and load the rule file named by the arguments.
pub fn load(cli: &Cli) -> anyhow::Result<(ConfigLocation, RuleSet)> {
    let location = resolve_config_path(cli.config.as_deref());
    info!(
        "[config] using {} (from {})",
        location.path.display(),
        location.source
    );

    let rules = load_rules(&location.path)
        .with_context(|| format!("cannot use rule file from {}", location.source))?;
    Ok((location, rules))
}

/// Report a fatal load error and pick the exit status for it.
pub fn load_failed(err: &anyhow::Error) -> ExitCode {
    error!("[config] {err:#}");
    eprintln!("reap: {err:#}");

    if err.downcast_ref::<ConfigError>().is_some() {
        ExitCode::from(EXIT_CONFIG)
    } else {
        ExitCode::FAILURE
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
