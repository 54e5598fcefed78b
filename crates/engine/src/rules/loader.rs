use std::{fs, io::ErrorKind, path::Path};

use log::{debug, warn};

use crate::{
    error::ConfigError,
    matcher::compile_glob,
    rules::model::{Criteria, FolderEntry, NameFragments, RuleSet},
};

/// Read, parse and validate the rule file at `path`.
pub fn load_rules(path: &Path) -> Result<RuleSet, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    let rules = parse_named(&text, &path.display().to_string())?;
    debug!(
        "[rules] loaded {} folder entries from {}",
        rules.folders.len(),
        path.display()
    );

    for w in rules.warnings() {
        warn!("[rules] {w}");
    }

    Ok(rules)
}

/// Parse and validate rules from a JSON string.
pub fn parse_rules(text: &str) -> Result<RuleSet, ConfigError> {
    parse_named(text, "<inline>")
}

fn parse_named(text: &str, origin: &str) -> Result<RuleSet, ConfigError> {
    let mut rules: RuleSet = serde_json::from_str(text).map_err(|source| ConfigError::Parse {
        origin: origin.to_string(),
        source,
    })?;

    rules.normalize();
    rules.validate()?;
    Ok(rules)
}

impl RuleSet {
    fn normalize(&mut self) {
        for entry in &mut self.folders {
            if let Some(exts) = entry.criteria.file_extensions.as_mut() {
                for ext in exts.iter_mut() {
                    if !ext.starts_with('.') {
                        ext.insert(0, '.');
                    }
                }
            }
        }
    }

    /// Reject entries that could never be evaluated as written.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (index, entry) in self.folders.iter().enumerate() {
            validate_entry(index, entry)?;
        }
        Ok(())
    }

    /// Settings that are accepted but probably not what the author meant.
    pub fn warnings(&self) -> Vec<String> {
        let mut out = Vec::new();
        for (index, entry) in self.folders.iter().enumerate() {
            entry_warnings(index, entry, &mut out);
        }
        out
    }
}

fn validate_entry(index: usize, entry: &FolderEntry) -> Result<(), ConfigError> {
    if entry.path.as_os_str().is_empty() {
        return Err(ConfigError::invalid(index, "path", "must not be empty"));
    }
    if !entry.path.is_absolute() {
        return Err(ConfigError::invalid(
            index,
            "path",
            format!("must be an absolute path, got {:?}", entry.path),
        ));
    }

    validate_criteria(index, &entry.criteria)
}

fn validate_criteria(index: usize, c: &Criteria) -> Result<(), ConfigError> {
    if let Some(pattern) = &c.file_name_pattern {
        compile_glob(pattern)
            .map_err(|e| ConfigError::invalid(index, "fileNamePattern", e.to_string()))?;
    }

    if let Some(NameFragments::Many(list)) = &c.file_name_contains
        && list.is_empty()
    {
        return Err(ConfigError::invalid(
            index,
            "fileNameContains",
            "must list at least one substring",
        ));
    }

    if let Some(exts) = &c.file_extensions {
        for ext in exts {
            let bare = ext.strip_prefix('.').unwrap_or(ext);
            if bare.is_empty() {
                return Err(ConfigError::invalid(
                    index,
                    "fileExtensions",
                    "extensions must not be empty",
                ));
            }
            if bare.contains('.') {
                return Err(ConfigError::invalid(
                    index,
                    "fileExtensions",
                    format!("{ext:?} can never match: only the part after the last dot is an extension"),
                ));
            }
        }
    }

    if let Some(range) = c.file_size_between
        && let (Some(min), Some(max)) = (range.min, range.max)
        && min > max
    {
        return Err(ConfigError::invalid(
            index,
            "fileSizeBetween",
            format!("min ({min}) is greater than max ({max})"),
        ));
    }

    let day_fields = [
        ("createdAgeDays", c.created_age_days),
        ("modifiedAgeDays", c.modified_age_days),
        ("folderAgeDays", c.folder_age_days),
        ("modifiedBetweenDays", c.modified_between_days.and_then(|r| r.start)),
        ("modifiedBetweenDays", c.modified_between_days.and_then(|r| r.end)),
    ];
    for (field, value) in day_fields {
        if let Some(days) = value
            && days < 0
        {
            return Err(ConfigError::invalid(
                index,
                field,
                format!("days must not be negative, got {days}"),
            ));
        }
    }

    if let Some(range) = c.modified_between_days
        && let (Some(start), Some(end)) = (range.start, range.end)
        && start > end
    {
        return Err(ConfigError::invalid(
            index,
            "modifiedBetweenDays",
            format!("start ({start}) is greater than end ({end})"),
        ));
    }

    Ok(())
}

fn entry_warnings(index: usize, entry: &FolderEntry, out: &mut Vec<String>) {
    let file_fields = entry.criteria.file_level_fields();

    if entry.delete_entire_folder {
        if !file_fields.is_empty() {
            out.push(format!(
                "folders[{index}]: {} ignored in whole-folder mode",
                file_fields.join(", ")
            ));
        }
        if entry.criteria.folder_age_days.is_none() && !entry.allow_unconditional_delete {
            out.push(format!(
                "folders[{index}]: no folderAgeDays set, {} will be skipped \
                 (set allowUnconditionalDelete to delete it regardless of age)",
                entry.path.display()
            ));
        }
        if entry.recursive {
            out.push(format!(
                "folders[{index}]: recursive has no effect in whole-folder mode"
            ));
        }
        return;
    }

    if entry.criteria.folder_age_days.is_some() {
        out.push(format!(
            "folders[{index}]: folderAgeDays ignored unless deleteEntireFolder is set"
        ));
    }
    if entry.allow_unconditional_delete {
        out.push(format!(
            "folders[{index}]: allowUnconditionalDelete ignored unless deleteEntireFolder is set"
        ));
    }
    if file_fields.is_empty() {
        out.push(format!(
            "folders[{index}]: no file criteria, every file under {} will be deleted",
            entry.path.display()
        ));
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
