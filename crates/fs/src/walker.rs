use std::{
    fs::{self, DirEntry, read_dir},
    io::ErrorKind,
    path::{Path, PathBuf},
};

use log::{debug, warn};

use crate::error::FsError;

/// Files found under a root, in traversal order, plus the directories that
/// could not be read along the way.
#[derive(Debug, Default)]
pub struct Walk {
    pub files: Vec<PathBuf>,
    pub errors: Vec<FsError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    File,
    Dir,
    Other,
}

/// List regular files under `root`.
///
/// Entries are visited in lexicographic order within each directory and
/// subdirectories are descended depth-first when `recursive` is set.
/// Symlinks to files are reported as files; symlinked directories are never
/// followed. An unusable root is an error; unreadable subdirectories are
/// collected in [`Walk::errors`] and skipped.
pub fn collect_files(root: &Path, recursive: bool) -> Result<Walk, FsError> {
    check_dir(root)?;

    let mut walk = Walk::default();
    let entries = sorted_entries(root)?;
    visit_entries(entries, recursive, &mut walk);

    debug!(
        "[walk] {} -> {} files, {} errors",
        root.display(),
        walk.files.len(),
        walk.errors.len()
    );
    Ok(walk)
}

/// Total size in bytes of the regular files under `root`. Best effort:
/// unreadable parts count as zero.
pub fn tree_size(root: &Path) -> u64 {
    let Ok(walk) = collect_files(root, true) else {
        return 0;
    };

    walk.files
        .iter()
        .filter_map(|p| fs::symlink_metadata(p).ok())
        .map(|m| m.len())
        .sum()
}

fn check_dir(root: &Path) -> Result<(), FsError> {
    match fs::metadata(root) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(FsError::NotADirectory {
            path: root.to_path_buf(),
        }),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(FsError::FolderNotFound {
            path: root.to_path_buf(),
        }),
        Err(e) => Err(FsError::from_io(root, e)),
    }
}

pub(crate) fn sorted_entries(dir: &Path) -> Result<Vec<DirEntry>, FsError> {
    let rd = read_dir(dir).map_err(|e| FsError::from_io(dir, e))?;

    let mut entries = Vec::new();
    for entry_res in rd {
        match entry_res {
            Ok(e) => entries.push(e),
            Err(e) => warn!("[walk] error reading entry in {:?}: {e}", dir),
        }
    }

    entries.sort_by_key(|e| e.file_name());
    Ok(entries)
}

fn visit_entries(entries: Vec<DirEntry>, recursive: bool, walk: &mut Walk) {
    for entry in entries {
        let path = entry.path();

        match inspect_entry(&entry) {
            EntryKind::File => walk.files.push(path),
            EntryKind::Dir if recursive => match sorted_entries(&path) {
                Ok(children) => visit_entries(children, recursive, walk),
                Err(e) => {
                    warn!("[walk] {e}");
                    walk.errors.push(e);
                }
            },
            EntryKind::Dir | EntryKind::Other => {}
        }
    }
}

fn inspect_entry(entry: &DirEntry) -> EntryKind {
    let file_type = match entry.file_type() {
        Ok(t) => t,
        Err(e) => {
            warn!("[walk] file_type({:?}) failed: {e}", entry.path());
            return EntryKind::Other;
        }
    };

    if file_type.is_dir() {
        return EntryKind::Dir;
    }
    if file_type.is_file() {
        return EntryKind::File;
    }

    if file_type.is_symlink() {
        // Follow only to decide whether the target is a regular file
        return match fs::metadata(entry.path()) {
            Ok(meta) if meta.is_file() => EntryKind::File,
            Ok(_) => EntryKind::Other,
            Err(e) => {
                debug!("[walk] dangling symlink {:?}: {e}", entry.path());
                EntryKind::Other
            }
        };
    }

    EntryKind::Other
}

#[cfg(test)]
#[path = "walker_tests.rs"]
mod tests;
