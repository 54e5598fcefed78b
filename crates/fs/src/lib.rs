mod error;
mod prune;
mod record;
mod remover;
mod walker;

pub use error::FsError;
pub use prune::{PruneReport, prune_empty_dirs};
pub use record::FileRecord;
pub use remover::{DryRunRemover, FsRemover, Remover};
pub use walker::{Walk, collect_files, tree_size};
