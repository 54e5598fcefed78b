use std::{
    cell::OnceCell,
    fs::{self, Metadata},
    path::{Path, PathBuf},
    time::SystemTime,
};

use log::debug;

use crate::error::FsError;

/// Snapshot of one file taken at evaluation time.
#[derive(Debug)]
pub struct FileRecord {
    pub full_path: PathBuf,
    /// Base name
    pub name: String,
    /// Extension including the leading dot, e.g. `.tmp`
    pub ext: Option<String>,
    pub size: u64,
    pub modified: Option<SystemTime>,
    /// Birth time, or inode change time where birth time is unavailable
    pub created: Option<SystemTime>,
    content: OnceCell<String>,
}

impl FileRecord {
    /// Stat `path` (following symlinks) and build a record. Content is not
    /// read here.
    pub fn inspect(path: &Path) -> Result<Self, FsError> {
        let metadata = fs::metadata(path).map_err(|e| FsError::from_io(path, e))?;

        Ok(Self::from_parts(
            path.to_path_buf(),
            metadata.len(),
            metadata.modified().ok(),
            created_time(&metadata),
        ))
    }

    pub fn from_parts(
        full_path: PathBuf,
        size: u64,
        modified: Option<SystemTime>,
        created: Option<SystemTime>,
    ) -> Self {
        let name = full_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let ext = Path::new(&name)
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()));

        Self {
            full_path,
            name,
            ext,
            size,
            modified,
            created,
            content: OnceCell::new(),
        }
    }

    /// File content as text, read on first use and cached afterwards.
    pub fn content(&self) -> Result<&str, FsError> {
        if let Some(text) = self.content.get() {
            return Ok(text);
        }

        let bytes = fs::read(&self.full_path).map_err(|e| FsError::from_io(&self.full_path, e))?;
        let text = String::from_utf8(bytes).map_err(|_| FsError::ContentRead {
            path: self.full_path.clone(),
        })?;

        Ok(self.content.get_or_init(|| text))
    }
}

fn created_time(metadata: &Metadata) -> Option<SystemTime> {
    match metadata.created() {
        Ok(t) => Some(t),
        Err(e) => {
            debug!("[record] birth time unavailable ({e}), using change time");
            change_time(metadata)
        }
    }
}

#[cfg(unix)]
fn change_time(metadata: &Metadata) -> Option<SystemTime> {
    use std::os::unix::fs::MetadataExt;
    use std::time::{Duration, UNIX_EPOCH};

    let secs = u64::try_from(metadata.ctime()).ok()?;
    let nanos = u32::try_from(metadata.ctime_nsec()).unwrap_or(0);
    UNIX_EPOCH.checked_add(Duration::new(secs, nanos))
}

#[cfg(not(unix))]
fn change_time(_metadata: &Metadata) -> Option<SystemTime> {
    None
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
