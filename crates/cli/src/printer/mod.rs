use std::{
    io::{self, Write},
    path::Path,
};

use humansize::{DECIMAL, format_size};
use reap_engine::{FolderEntry, SweepEvent, SweepObserver, SweepSummary};
use reap_runtime::ConfigLocation;

/// Trait for writing report lines.
pub trait StatusWriter {
    fn write_status(&mut self, msg: &str) -> io::Result<()>;
}

/// Default status writer that outputs to stdout.
pub struct StdoutWriter;

impl StatusWriter for StdoutWriter {
    fn write_status(&mut self, msg: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{}", msg)
    }
}

/// Buffering status writer for testing.
#[derive(Default)]
pub struct BufferedWriter {
    buf: Vec<String>,
}

impl BufferedWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.buf
    }
}

impl StatusWriter for BufferedWriter {
    fn write_status(&mut self, msg: &str) -> io::Result<()> {
        self.buf.push(msg.to_owned());
        Ok(())
    }
}

/// Turns sweep events into one console line each.
pub struct ConsolePrinter<W: StatusWriter> {
    out: W,
    dry_run: bool,
    verbose: bool,
}

impl<W: StatusWriter> ConsolePrinter<W> {
    pub fn new(out: W, dry_run: bool, verbose: bool) -> Self {
        Self {
            out,
            dry_run,
            verbose,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, msg: &str) {
        // A closed stdout must not abort the sweep
        let _ = self.out.write_status(msg);
    }

    fn deleted(&mut self, what: &str, path: &Path) {
        let line = if self.dry_run {
            format!("[dry-run] Would delete {what}: {}", path.display())
        } else {
            format!("Deleted {what}: {}", path.display())
        };
        self.emit(&line);
    }

    pub fn summary(&mut self, s: &SweepSummary) {
        let freed = format_size(s.bytes_freed, DECIMAL);
        let line = if self.dry_run {
            format!(
                "Dry run: {} of {} items would be deleted, {} skipped, {} failed, {} empty folders would be removed, {} would be freed",
                s.deleted, s.considered, s.skipped, s.failed, s.pruned, freed
            )
        } else {
            format!(
                "Done: {} of {} items deleted, {} skipped, {} failed, {} empty folders removed, {} freed",
                s.deleted, s.considered, s.skipped, s.failed, s.pruned, freed
            )
        };
        self.emit(&line);
    }

    /// Listing printed by `--check`.
    pub fn rules(&mut self, location: &ConfigLocation, folders: &[FolderEntry], warnings: &[String]) {
        self.emit(&format!(
            "Config: {} (from {})",
            location.path.display(),
            location.source
        ));

        for (index, entry) in folders.iter().enumerate() {
            self.emit(&format!(
                "folders[{index}] {} ({})",
                entry.path.display(),
                entry.mode()
            ));

            let criteria = entry.criteria.describe();
            if criteria.is_empty() {
                self.emit("    (no criteria)");
            }
            for c in criteria {
                self.emit(&format!("    {c}"));
            }
        }

        for w in warnings {
            self.emit(&format!("Warning: {w}"));
        }
        self.emit(&format!(
            "{} folder entries, {} warnings",
            folders.len(),
            warnings.len()
        ));
    }
}

impl<W: StatusWriter> SweepObserver for ConsolePrinter<W> {
    fn on_event(&mut self, event: &SweepEvent) {
        match event {
            SweepEvent::EntryStarted { index, path, mode } => {
                if self.verbose {
                    self.emit(&format!("== folders[{index}] {} ({mode})", path.display()));
                }
            }
            SweepEvent::FileDeleted { path, .. } => self.deleted("file", path),
            SweepEvent::FolderDeleted { path, .. } => self.deleted("entire folder", path),
            SweepEvent::Pruned { path } => self.deleted("empty folder", path),
            SweepEvent::Skipped { path, reason } => {
                self.emit(&format!("Skipped {}: {reason}", path.display()));
            }
            SweepEvent::Failed { path, reason } => {
                self.emit(&format!("Failed to delete {}: {reason}", path.display()));
            }
        }
    }
}

#[cfg(test)]
#[path = "printer_tests.rs"]
mod tests;
