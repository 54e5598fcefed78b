use std::{fmt, path::PathBuf};

use serde::{Deserialize, Serialize};

/// Top-level rule file: `{ "folders": [ ... ] }`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSet {
    #[serde(default)]
    pub folders: Vec<FolderEntry>,
}

/// One configured target directory plus its deletion mode and criteria.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FolderEntry {
    pub path: PathBuf,

    /// Delete `path` as a unit, gated only by `criteria.folderAgeDays`.
    #[serde(default)]
    pub delete_entire_folder: bool,

    /// Scan mode only: descend into subdirectories.
    #[serde(default)]
    pub recursive: bool,

    /// Whole-folder mode only: delete even when no `folderAgeDays` is set.
    #[serde(default)]
    pub allow_unconditional_delete: bool,

    #[serde(default)]
    pub criteria: Criteria,
}

impl FolderEntry {
    pub fn mode(&self) -> Mode {
        if self.delete_entire_folder {
            Mode::WholeFolder
        } else {
            Mode::Scan {
                recursive: self.recursive,
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    WholeFolder,
    Scan { recursive: bool },
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::WholeFolder => f.write_str("whole folder"),
            Mode::Scan { recursive: true } => f.write_str("recursive scan"),
            Mode::Scan { recursive: false } => f.write_str("scan"),
        }
    }
}

/// AND-combined predicates. Unset fields impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Criteria {
    pub file_name_pattern: Option<String>,
    pub file_name_contains: Option<NameFragments>,
    pub file_name_ends_with: Option<String>,
    pub file_extensions: Option<Vec<String>>,
    pub contains_string: Option<String>,
    pub file_size_less_than: Option<u64>,
    pub file_size_greater_than: Option<u64>,
    pub file_size_between: Option<SizeRange>,
    pub created_age_days: Option<i64>,
    pub modified_age_days: Option<i64>,
    pub modified_between_days: Option<DayRange>,
    pub folder_age_days: Option<i64>,
}

/// `"fileNameContains": "tmp"` or `"fileNameContains": ["tmp", "bak"]`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum NameFragments {
    One(String),
    Many(Vec<String>),
}

impl NameFragments {
    pub fn as_slice(&self) -> &[String] {
        match self {
            NameFragments::One(s) => std::slice::from_ref(s),
            NameFragments::Many(v) => v,
        }
    }
}

/// Inclusive byte range; a missing bound is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SizeRange {
    pub min: Option<u64>,
    pub max: Option<u64>,
}

/// Inclusive range of ages in days; a missing bound is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DayRange {
    pub start: Option<i64>,
    pub end: Option<i64>,
}

fn open_bound<T: fmt::Display>(v: Option<T>) -> String {
    v.map(|v| v.to_string()).unwrap_or_else(|| "..".to_string())
}

impl Criteria {
    /// Names of the set fields that only apply to individual files.
    pub fn file_level_fields(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.file_name_pattern.is_some() {
            out.push("fileNamePattern");
        }
        if self.file_name_contains.is_some() {
            out.push("fileNameContains");
        }
        if self.file_name_ends_with.is_some() {
            out.push("fileNameEndsWith");
        }
        if self.file_extensions.is_some() {
            out.push("fileExtensions");
        }
        if self.contains_string.is_some() {
            out.push("containsString");
        }
        if self.file_size_less_than.is_some() {
            out.push("fileSizeLessThan");
        }
        if self.file_size_greater_than.is_some() {
            out.push("fileSizeGreaterThan");
        }
        if self.file_size_between.is_some() {
            out.push("fileSizeBetween");
        }
        if self.created_age_days.is_some() {
            out.push("createdAgeDays");
        }
        if self.modified_age_days.is_some() {
            out.push("modifiedAgeDays");
        }
        if self.modified_between_days.is_some() {
            out.push("modifiedBetweenDays");
        }
        out
    }

    /// Human readable `key=value` list of the set fields.
    pub fn describe(&self) -> Vec<String> {
        let mut out = Vec::new();
        if let Some(p) = &self.file_name_pattern {
            out.push(format!("fileNamePattern={p:?}"));
        }
        if let Some(f) = &self.file_name_contains {
            out.push(format!("fileNameContains={:?}", f.as_slice()));
        }
        if let Some(s) = &self.file_name_ends_with {
            out.push(format!("fileNameEndsWith={s:?}"));
        }
        if let Some(exts) = &self.file_extensions {
            out.push(format!("fileExtensions={exts:?}"));
        }
        if let Some(s) = &self.contains_string {
            out.push(format!("containsString={s:?}"));
        }
        if let Some(n) = self.file_size_less_than {
            out.push(format!("fileSizeLessThan={n}"));
        }
        if let Some(n) = self.file_size_greater_than {
            out.push(format!("fileSizeGreaterThan={n}"));
        }
        if let Some(r) = self.file_size_between {
            out.push(format!(
                "fileSizeBetween={}..={}",
                r.min.unwrap_or(0),
                open_bound(r.max)
            ));
        }
        if let Some(n) = self.created_age_days {
            out.push(format!("createdAgeDays={n}"));
        }
        if let Some(n) = self.modified_age_days {
            out.push(format!("modifiedAgeDays={n}"));
        }
        if let Some(r) = self.modified_between_days {
            out.push(format!(
                "modifiedBetweenDays={}..={}",
                r.start.unwrap_or(0),
                open_bound(r.end)
            ));
        }
        if let Some(n) = self.folder_age_days {
            out.push(format!("folderAgeDays={n}"));
        }
        out
    }
}
