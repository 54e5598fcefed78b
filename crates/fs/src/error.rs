use std::{io, path::PathBuf};

use thiserror::Error;

/// Filesystem failures. None of these abort a run; they are contained to the
/// item or folder entry they concern.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("folder not found: {}", path.display())]
    FolderNotFound { path: PathBuf },

    #[error("not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("cannot access {}: {source}", path.display())]
    Access {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("content of {} is not valid UTF-8 text", path.display())]
    ContentRead { path: PathBuf },
}

impl FsError {
    pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        FsError::Access {
            path: path.into(),
            source,
        }
    }

    pub fn path(&self) -> &std::path::Path {
        match self {
            FsError::FolderNotFound { path }
            | FsError::NotADirectory { path }
            | FsError::Access { path, .. }
            | FsError::ContentRead { path } => path,
        }
    }

    /// True when the item disappeared underneath us.
    pub fn is_vanished(&self) -> bool {
        match self {
            FsError::FolderNotFound { .. } => true,
            FsError::Access { source, .. } => source.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }
}
