use std::{fs, io::ErrorKind};

use reap_fs::FsError;

use crate::{context::SweepContext, matcher::helpers::age_in_days, rules::FolderEntry};

/// Decision for a whole-folder entry. Age is measured from the folder's
/// modification time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderVerdict {
    Delete { age_days: i64 },
    TooYoung { age_days: i64, required: i64 },
    /// No `folderAgeDays` and no opt-in to unconditional deletion.
    NoAgeThreshold,
}

pub fn folder_verdict(entry: &FolderEntry, ctx: &SweepContext) -> Result<FolderVerdict, FsError> {
    let path = entry.path.as_path();

    let metadata = match fs::metadata(path) {
        Ok(m) if m.is_dir() => m,
        Ok(_) => {
            return Err(FsError::NotADirectory {
                path: path.to_path_buf(),
            });
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(FsError::FolderNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(FsError::from_io(path, e)),
    };

    let modified = metadata.modified().map_err(|e| FsError::from_io(path, e))?;
    let age_days = age_in_days(ctx.now, modified);

    let verdict = match entry.criteria.folder_age_days {
        Some(required) if age_days < required => FolderVerdict::TooYoung { age_days, required },
        Some(_) => FolderVerdict::Delete { age_days },
        None if entry.allow_unconditional_delete => FolderVerdict::Delete { age_days },
        None => FolderVerdict::NoAgeThreshold,
    };
    Ok(verdict)
}

#[cfg(test)]
#[path = "folder_tests.rs"]
mod tests;
