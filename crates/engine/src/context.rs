use chrono::{DateTime, Utc};

/// Run-wide values threaded through matching and deletion.
#[derive(Debug, Clone, Copy)]
pub struct SweepContext {
    /// Reference point for every age computation in the run.
    pub now: DateTime<Utc>,
    /// Report what would be deleted without deleting it.
    pub dry_run: bool,
}

impl SweepContext {
    pub fn new(dry_run: bool) -> Self {
        Self::at(Utc::now(), dry_run)
    }

    pub fn at(now: DateTime<Utc>, dry_run: bool) -> Self {
        Self { now, dry_run }
    }
}
