use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, warn};

use crate::{error::FsError, remover::Remover, walker::sorted_entries};

#[derive(Debug, Default)]
pub struct PruneReport {
    /// Directories removed, children before parents.
    pub removed: Vec<PathBuf>,
    pub failures: Vec<FsError>,
}

/// Remove directories under `root` that hold no entries, bottom-up.
///
/// With `recursive` the whole subtree is examined and a directory emptied by
/// removing its children is removed in the same pass. Otherwise only `root`
/// itself is considered. `root` is removed too when it ends up empty.
/// Symlinked directories are treated as ordinary entries and never entered.
pub fn prune_empty_dirs(root: &Path, recursive: bool, remover: &mut dyn Remover) -> PruneReport {
    let mut report = PruneReport::default();

    if remover.is_removed(root) {
        debug!("[prune] skipping {}: already removed", root.display());
        return report;
    }

    match fs::symlink_metadata(root) {
        Ok(meta) if meta.file_type().is_symlink() => {
            debug!("[prune] skipping {}: symlinked directory", root.display());
            return report;
        }
        Ok(meta) if meta.is_dir() => {}
        _ => {
            debug!("[prune] skipping {}: no longer a directory", root.display());
            return report;
        }
    }

    prune_dir(root, recursive, remover, &mut report);
    report
}

/// Returns true when `dir` was removed.
fn prune_dir(
    dir: &Path,
    recursive: bool,
    remover: &mut dyn Remover,
    report: &mut PruneReport,
) -> bool {
    let entries = match sorted_entries(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("[prune] {e}");
            report.failures.push(e);
            return false;
        }
    };

    let mut remaining = 0usize;
    for entry in entries {
        let path = entry.path();
        if remover.is_removed(&path) {
            continue;
        }

        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        if recursive && is_dir && prune_dir(&path, recursive, remover, report) {
            continue;
        }

        remaining += 1;
    }

    if remaining > 0 {
        return false;
    }

    match remover.remove_dir(dir) {
        Ok(()) => {
            debug!("[prune] removed {}", dir.display());
            report.removed.push(dir.to_path_buf());
            true
        }
        Err(e) => {
            let err = FsError::from_io(dir, e);
            warn!("[prune] {err}");
            report.failures.push(err);
            false
        }
    }
}

#[cfg(test)]
#[path = "prune_tests.rs"]
mod tests;
