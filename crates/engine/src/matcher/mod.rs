mod folder;
mod helpers;
mod predicates;

pub use folder::{FolderVerdict, folder_verdict};
pub use helpers::{CmpOp, age_in_days, cmp_i64, cmp_u64};
pub use predicates::{CompiledCriteria, Predicate, Verdict, compile_glob};
