use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use log::{debug, info, warn};
use reap_fs::{FileRecord, FsError, Remover, collect_files, prune_empty_dirs, tree_size};

use crate::{
    context::SweepContext,
    error::ConfigError,
    matcher::{CompiledCriteria, FolderVerdict, Verdict, folder_verdict},
    rules::{FolderEntry, Mode, RuleSet},
};

/// Why an item or a whole entry was left alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    FolderNotFound,
    NotADirectory,
    NotOldEnough { age_days: i64, required: i64 },
    NoAgeThreshold,
    Vanished,
    Unreadable(String),
}

impl From<&FsError> for SkipReason {
    fn from(err: &FsError) -> Self {
        match err {
            FsError::FolderNotFound { .. } => SkipReason::FolderNotFound,
            FsError::NotADirectory { .. } => SkipReason::NotADirectory,
            e if e.is_vanished() => SkipReason::Vanished,
            e => SkipReason::Unreadable(e.to_string()),
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::FolderNotFound => f.write_str("folder not found"),
            SkipReason::NotADirectory => f.write_str("not a directory"),
            SkipReason::NotOldEnough { age_days, required } => write!(
                f,
                "not old enough (age: {age_days} days, required: {required} days)"
            ),
            SkipReason::NoAgeThreshold => {
                f.write_str("no folderAgeDays set and allowUnconditionalDelete is off")
            }
            SkipReason::Vanished => f.write_str("disappeared before it could be examined"),
            SkipReason::Unreadable(msg) => f.write_str(msg),
        }
    }
}

/// Progress notifications, in the order things happen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SweepEvent {
    EntryStarted { index: usize, path: PathBuf, mode: Mode },
    FileDeleted { path: PathBuf, size: u64 },
    FolderDeleted { path: PathBuf, size: u64, age_days: i64 },
    Skipped { path: PathBuf, reason: SkipReason },
    Failed { path: PathBuf, reason: String },
    Pruned { path: PathBuf },
}

pub trait SweepObserver {
    fn on_event(&mut self, event: &SweepEvent);
}

impl SweepObserver for Vec<SweepEvent> {
    fn on_event(&mut self, event: &SweepEvent) {
        self.push(event.clone());
    }
}

/// Terminal state of one considered item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Skipped,
    Deleted,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepSummary {
    /// Folder entries processed.
    pub entries: usize,
    /// Files and whole folders examined.
    pub considered: usize,
    pub deleted: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Empty directories removed by the prune pass.
    pub pruned: usize,
    pub bytes_freed: u64,
}

impl SweepSummary {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Skipped => self.skipped += 1,
            Outcome::Deleted => self.deleted += 1,
            Outcome::Failed => self.failed += 1,
        }
    }
}

/// Runs every folder entry of a rule set, then prunes empty directories.
pub struct Sweep<'r, R: Remover> {
    ctx: SweepContext,
    remover: &'r mut R,
}

impl<'r, R: Remover> Sweep<'r, R> {
    pub fn new(ctx: SweepContext, remover: &'r mut R) -> Self {
        Self { ctx, remover }
    }

    /// Criteria are compiled up front, so a bad rule fails before anything
    /// is deleted. Filesystem problems never fail the run.
    pub fn run(
        &mut self,
        rules: &RuleSet,
        observer: &mut dyn SweepObserver,
    ) -> Result<SweepSummary, ConfigError> {
        let plan = compile_plan(rules)?;

        let mut summary = SweepSummary::default();
        let mut prune_roots: Vec<(PathBuf, bool)> = Vec::new();

        for (index, (entry, criteria)) in plan.iter().enumerate() {
            let mode = entry.mode();
            debug!("[sweep] entry {index}: {} ({mode})", entry.path.display());
            observer.on_event(&SweepEvent::EntryStarted {
                index,
                path: entry.path.clone(),
                mode,
            });
            summary.entries += 1;

            match mode {
                Mode::WholeFolder => self.sweep_folder(entry, observer, &mut summary),
                Mode::Scan { recursive } => {
                    if self.sweep_files(entry, criteria, observer, &mut summary) {
                        add_prune_root(&mut prune_roots, &entry.path, recursive);
                    }
                }
            }
        }

        for (root, recursive) in &prune_roots {
            self.prune(root, *recursive, observer, &mut summary);
        }

        info!(
            "[sweep] done: {} deleted, {} failed, {} skipped, {} pruned",
            summary.deleted, summary.failed, summary.skipped, summary.pruned
        );
        Ok(summary)
    }

    fn sweep_folder(
        &mut self,
        entry: &FolderEntry,
        observer: &mut dyn SweepObserver,
        summary: &mut SweepSummary,
    ) {
        summary.considered += 1;
        let path = entry.path.as_path();

        if self.remover.is_removed(path) {
            skip(observer, path, SkipReason::FolderNotFound);
            summary.record(Outcome::Skipped);
            return;
        }

        let verdict = match folder_verdict(entry, &self.ctx) {
            Ok(v) => v,
            Err(e) => {
                warn!("[sweep] {e}");
                skip(observer, path, SkipReason::from(&e));
                summary.record(Outcome::Skipped);
                return;
            }
        };

        let outcome = match verdict {
            FolderVerdict::TooYoung { age_days, required } => {
                skip(observer, path, SkipReason::NotOldEnough { age_days, required });
                Outcome::Skipped
            }
            FolderVerdict::NoAgeThreshold => {
                skip(observer, path, SkipReason::NoAgeThreshold);
                Outcome::Skipped
            }
            FolderVerdict::Delete { age_days } => {
                let size = tree_size(path);
                match self.remover.remove_tree(path) {
                    Ok(()) => {
                        info!("[sweep] deleted folder {}", path.display());
                        summary.bytes_freed += size;
                        observer.on_event(&SweepEvent::FolderDeleted {
                            path: path.to_path_buf(),
                            size,
                            age_days,
                        });
                        Outcome::Deleted
                    }
                    Err(e) => {
                        warn!("[sweep] failed to delete folder {}: {e}", path.display());
                        fail(observer, path, e.to_string());
                        Outcome::Failed
                    }
                }
            }
        };
        summary.record(outcome);
    }

    /// Returns false when the root could not be walked at all.
    fn sweep_files(
        &mut self,
        entry: &FolderEntry,
        criteria: &CompiledCriteria,
        observer: &mut dyn SweepObserver,
        summary: &mut SweepSummary,
    ) -> bool {
        // Removed earlier in this run, possibly only on paper
        if self.remover.is_removed(&entry.path) {
            skip(observer, &entry.path, SkipReason::FolderNotFound);
            summary.record(Outcome::Skipped);
            return false;
        }

        let walk = match collect_files(&entry.path, entry.recursive) {
            Ok(walk) => walk,
            Err(e) => {
                warn!("[sweep] {e}");
                skip(observer, &entry.path, SkipReason::from(&e));
                summary.record(Outcome::Skipped);
                return false;
            }
        };

        report_walk_errors(&walk.errors, observer, summary);

        for path in &walk.files {
            if self.remover.is_removed(path) {
                continue;
            }
            summary.considered += 1;
            let outcome = self.sweep_file(path, criteria, observer, summary);
            summary.record(outcome);
        }
        true
    }

    fn sweep_file(
        &mut self,
        path: &Path,
        criteria: &CompiledCriteria,
        observer: &mut dyn SweepObserver,
        summary: &mut SweepSummary,
    ) -> Outcome {
        let rec = match FileRecord::inspect(path) {
            Ok(rec) => rec,
            Err(e) => {
                warn!("[sweep] {e}");
                skip(observer, path, SkipReason::from(&e));
                return Outcome::Skipped;
            }
        };

        match criteria.evaluate(&rec, &self.ctx) {
            Verdict::Matched => {}
            Verdict::Rejected(key) => {
                debug!("[sweep] keep {}: {key} not met", path.display());
                return Outcome::Skipped;
            }
            Verdict::Unreadable { predicate, error } => {
                warn!("[sweep] {predicate}: {error}");
                skip(observer, path, SkipReason::from(&error));
                return Outcome::Skipped;
            }
        }

        // A symlink frees its own size, not its target's
        let size = fs::symlink_metadata(path).map_or(rec.size, |m| m.len());

        match self.remover.remove_file(path) {
            Ok(()) => {
                info!("[sweep] deleted {}", path.display());
                summary.bytes_freed += size;
                observer.on_event(&SweepEvent::FileDeleted {
                    path: path.to_path_buf(),
                    size,
                });
                Outcome::Deleted
            }
            Err(e) => {
                warn!("[sweep] failed to delete {}: {e}", path.display());
                fail(observer, path, e.to_string());
                Outcome::Failed
            }
        }
    }

    fn prune(
        &mut self,
        root: &Path,
        recursive: bool,
        observer: &mut dyn SweepObserver,
        summary: &mut SweepSummary,
    ) {
        let report = prune_empty_dirs(root, recursive, &mut *self.remover);

        for path in report.removed {
            summary.pruned += 1;
            observer.on_event(&SweepEvent::Pruned { path });
        }
        for err in report.failures {
            summary.failed += 1;
            fail(observer, err.path(), err.to_string());
        }
    }
}

/// Compile every entry's criteria, failing on the first bad one.
fn compile_plan(rules: &RuleSet) -> Result<Vec<(&FolderEntry, CompiledCriteria)>, ConfigError> {
    rules
        .folders
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let criteria = if entry.delete_entire_folder {
                CompiledCriteria::default()
            } else {
                CompiledCriteria::compile(&entry.criteria)
                    .map_err(|e| ConfigError::invalid(index, "fileNamePattern", e.to_string()))?
            };
            Ok((entry, criteria))
        })
        .collect()
}

/// Subdirectories that could not be listed count as skipped items.
fn report_walk_errors(
    errors: &[FsError],
    observer: &mut dyn SweepObserver,
    summary: &mut SweepSummary,
) {
    for err in errors {
        skip(observer, err.path(), SkipReason::from(err));
        summary.record(Outcome::Skipped);
    }
}

fn add_prune_root(roots: &mut Vec<(PathBuf, bool)>, path: &Path, recursive: bool) {
    match roots.iter_mut().find(|(p, _)| p == path) {
        Some((_, r)) => *r |= recursive,
        None => roots.push((path.to_path_buf(), recursive)),
    }
}

fn skip(observer: &mut dyn SweepObserver, path: &Path, reason: SkipReason) {
    observer.on_event(&SweepEvent::Skipped {
        path: path.to_path_buf(),
        reason,
    });
}

fn fail(observer: &mut dyn SweepObserver, path: &Path, reason: String) {
    observer.on_event(&SweepEvent::Failed {
        path: path.to_path_buf(),
        reason,
    });
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
