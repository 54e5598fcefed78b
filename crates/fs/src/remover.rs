use std::{
    collections::HashSet,
    fs, io,
    path::{Path, PathBuf},
};

use log::debug;

/// Backend for every destructive operation.
pub trait Remover {
    fn remove_file(&mut self, path: &Path) -> io::Result<()>;

    /// Remove an empty directory.
    fn remove_dir(&mut self, path: &Path) -> io::Result<()>;

    /// Remove a directory and everything below it.
    fn remove_tree(&mut self, path: &Path) -> io::Result<()>;

    /// Whether `path` counts as gone even though it may still exist on disk.
    fn is_removed(&self, _path: &Path) -> bool {
        false
    }
}

/// Deletes for real.
#[derive(Debug, Default)]
pub struct FsRemover;

impl Remover for FsRemover {
    fn remove_file(&mut self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn remove_dir(&mut self, path: &Path) -> io::Result<()> {
        fs::remove_dir(path)
    }

    fn remove_tree(&mut self, path: &Path) -> io::Result<()> {
        fs::remove_dir_all(path)
    }
}

/// Records removals without touching the filesystem.
#[derive(Debug, Default)]
pub struct DryRunRemover {
    removed: HashSet<PathBuf>,
}

impl DryRunRemover {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }

    fn mark(&mut self, path: &Path) -> io::Result<()> {
        // Fail the same way a real removal of a missing path would
        if self.is_removed(path) || fs::symlink_metadata(path).is_err() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                "No such file or directory",
            ));
        }
        debug!("[dry-run] would remove {}", path.display());
        self.removed.insert(path.to_path_buf());
        Ok(())
    }
}

impl Remover for DryRunRemover {
    fn remove_file(&mut self, path: &Path) -> io::Result<()> {
        self.mark(path)
    }

    fn remove_dir(&mut self, path: &Path) -> io::Result<()> {
        self.mark(path)
    }

    fn remove_tree(&mut self, path: &Path) -> io::Result<()> {
        self.mark(path)
    }

    fn is_removed(&self, path: &Path) -> bool {
        path.ancestors().any(|p| self.removed.contains(p))
    }
}

#[cfg(test)]
#[path = "remover_tests.rs"]
mod tests;
