use std::collections::HashSet;

use chrono::{DateTime, Utc};
use globset::{GlobBuilder, GlobMatcher};
use log::debug;
use reap_fs::{FileRecord, FsError};

use crate::{
    context::SweepContext,
    matcher::helpers::{CmpOp, age_in_days, cmp_i64, cmp_u64},
    rules::Criteria,
};

/// Glob over a base name: `*` any run, `?` one character, `[...]` classes.
pub fn compile_glob(pattern: &str) -> Result<GlobMatcher, globset::Error> {
    Ok(GlobBuilder::new(pattern)
        .literal_separator(false)
        .backslash_escape(true)
        .build()?
        .compile_matcher())
}

/// One file-level criterion, ready to evaluate.
#[derive(Debug, Clone)]
pub enum Predicate {
    NameGlob(GlobMatcher),
    NameContains(Vec<String>),
    NameEndsWith(String),
    Extension(HashSet<String>),
    Size { op: CmpOp, bytes: u64 },
    SizeBetween { min: u64, max: Option<u64> },
    CreatedAge { days: i64 },
    ModifiedAge { days: i64 },
    ModifiedBetween { start: i64, end: Option<i64> },
    Contains(String),
}

impl Predicate {
    /// Config key this predicate came from.
    pub fn key(&self) -> &'static str {
        match self {
            Predicate::NameGlob(_) => "fileNamePattern",
            Predicate::NameContains(_) => "fileNameContains",
            Predicate::NameEndsWith(_) => "fileNameEndsWith",
            Predicate::Extension(_) => "fileExtensions",
            Predicate::Size { op: CmpOp::Lt, .. } => "fileSizeLessThan",
            Predicate::Size { .. } => "fileSizeGreaterThan",
            Predicate::SizeBetween { .. } => "fileSizeBetween",
            Predicate::CreatedAge { .. } => "createdAgeDays",
            Predicate::ModifiedAge { .. } => "modifiedAgeDays",
            Predicate::ModifiedBetween { .. } => "modifiedBetweenDays",
            Predicate::Contains(_) => "containsString",
        }
    }

    /// Rough evaluation cost; content reads come last.
    fn cost(&self) -> u8 {
        match self {
            Predicate::NameGlob(_)
            | Predicate::NameContains(_)
            | Predicate::NameEndsWith(_)
            | Predicate::Extension(_) => 0,
            Predicate::Size { .. } | Predicate::SizeBetween { .. } => 1,
            Predicate::CreatedAge { .. }
            | Predicate::ModifiedAge { .. }
            | Predicate::ModifiedBetween { .. } => 2,
            Predicate::Contains(_) => 3,
        }
    }

    pub fn eval(&self, rec: &FileRecord, now: DateTime<Utc>) -> Result<bool, FsError> {
        let hit = match self {
            Predicate::NameGlob(glob) => glob.is_match(&rec.name),
            Predicate::NameContains(fragments) => {
                fragments.iter().any(|f| rec.name.contains(f.as_str()))
            }
            Predicate::NameEndsWith(suffix) => rec.name.ends_with(suffix.as_str()),
            Predicate::Extension(set) => rec.ext.as_ref().is_some_and(|e| set.contains(e)),
            Predicate::Size { op, bytes } => cmp_u64(rec.size, *bytes, *op),
            Predicate::SizeBetween { min, max } => {
                cmp_u64(rec.size, *min, CmpOp::Ge)
                    && max.is_none_or(|max| cmp_u64(rec.size, max, CmpOp::Le))
            }
            Predicate::CreatedAge { days } => rec
                .created
                .is_some_and(|t| cmp_i64(age_in_days(now, t), *days, CmpOp::Ge)),
            Predicate::ModifiedAge { days } => rec
                .modified
                .is_some_and(|t| cmp_i64(age_in_days(now, t), *days, CmpOp::Ge)),
            Predicate::ModifiedBetween { start, end } => rec.modified.is_some_and(|t| {
                let age = age_in_days(now, t);
                cmp_i64(age, *start, CmpOp::Ge) && end.is_none_or(|end| cmp_i64(age, end, CmpOp::Le))
            }),
            Predicate::Contains(needle) => rec.content()?.contains(needle.as_str()),
        };
        Ok(hit)
    }
}

/// Outcome of matching one file.
#[derive(Debug)]
pub enum Verdict {
    Matched,
    /// The named criterion was not met.
    Rejected(&'static str),
    /// The file could not be read while evaluating the named criterion.
    Unreadable {
        predicate: &'static str,
        error: FsError,
    },
}

impl Verdict {
    pub fn is_match(&self) -> bool {
        matches!(self, Verdict::Matched)
    }
}

/// File-level criteria of one folder entry, ordered cheapest first.
#[derive(Debug, Clone, Default)]
pub struct CompiledCriteria {
    predicates: Vec<Predicate>,
}

impl CompiledCriteria {
    pub fn compile(c: &Criteria) -> Result<Self, globset::Error> {
        let mut predicates = Vec::new();

        if let Some(pattern) = &c.file_name_pattern {
            predicates.push(Predicate::NameGlob(compile_glob(pattern)?));
        }
        if let Some(fragments) = &c.file_name_contains {
            predicates.push(Predicate::NameContains(fragments.as_slice().to_vec()));
        }
        if let Some(suffix) = &c.file_name_ends_with {
            predicates.push(Predicate::NameEndsWith(suffix.clone()));
        }
        if let Some(exts) = &c.file_extensions {
            predicates.push(Predicate::Extension(exts.iter().cloned().collect()));
        }
        if let Some(bytes) = c.file_size_less_than {
            predicates.push(Predicate::Size {
                op: CmpOp::Lt,
                bytes,
            });
        }
        if let Some(bytes) = c.file_size_greater_than {
            predicates.push(Predicate::Size {
                op: CmpOp::Gt,
                bytes,
            });
        }
        if let Some(range) = c.file_size_between {
            predicates.push(Predicate::SizeBetween {
                min: range.min.unwrap_or(0),
                max: range.max,
            });
        }
        if let Some(days) = c.created_age_days {
            predicates.push(Predicate::CreatedAge { days });
        }
        if let Some(days) = c.modified_age_days {
            predicates.push(Predicate::ModifiedAge { days });
        }
        if let Some(range) = c.modified_between_days {
            predicates.push(Predicate::ModifiedBetween {
                start: range.start.unwrap_or(0),
                end: range.end,
            });
        }
        if let Some(needle) = &c.contains_string {
            predicates.push(Predicate::Contains(needle.clone()));
        }

        predicates.sort_by_key(Predicate::cost);
        Ok(Self { predicates })
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// No file-level criteria: every file matches.
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// AND of all predicates, stopping at the first one that fails.
    pub fn evaluate(&self, rec: &FileRecord, ctx: &SweepContext) -> Verdict {
        for pred in &self.predicates {
            match pred.eval(rec, ctx.now) {
                Ok(true) => {}
                Ok(false) => return Verdict::Rejected(pred.key()),
                Err(FsError::ContentRead { path }) => {
                    debug!("[match] {} is not text, treating as no match", path.display());
                    return Verdict::Rejected(pred.key());
                }
                Err(error) => {
                    return Verdict::Unreadable {
                        predicate: pred.key(),
                        error,
                    };
                }
            }
        }
        Verdict::Matched
    }
}

#[cfg(test)]
#[path = "predicates_tests.rs"]
mod tests;
