use super::*;

use reap_engine::{Criteria, Mode, SkipReason};
use reap_runtime::ConfigSource;
use std::path::PathBuf;

fn printer(dry_run: bool, verbose: bool) -> ConsolePrinter<BufferedWriter> {
    ConsolePrinter::new(BufferedWriter::new(), dry_run, verbose)
}

fn feed(p: &mut ConsolePrinter<BufferedWriter>, events: &[SweepEvent]) {
    for e in events {
        p.on_event(e);
    }
}

fn sample_events() -> Vec<SweepEvent> {
    vec![
        SweepEvent::EntryStarted {
            index: 0,
            path: PathBuf::from("/var/tmp"),
            mode: Mode::Scan { recursive: true },
        },
        SweepEvent::FileDeleted {
            path: PathBuf::from("/var/tmp/a.tmp"),
            size: 50,
        },
        SweepEvent::FolderDeleted {
            path: PathBuf::from("/var/cache/old"),
            size: 4096,
            age_days: 40,
        },
        SweepEvent::Pruned {
            path: PathBuf::from("/var/tmp/empty"),
        },
        SweepEvent::Skipped {
            path: PathBuf::from("/var/builds"),
            reason: SkipReason::NotOldEnough {
                age_days: 10,
                required: 30,
            },
        },
        SweepEvent::Failed {
            path: PathBuf::from("/var/tmp/locked.tmp"),
            reason: "Permission denied (os error 13)".into(),
        },
    ]
}

#[test]
fn events_render_one_line_each() {
    let mut p = printer(false, false);
    feed(&mut p, &sample_events());

    assert_eq!(
        p.into_inner().lines(),
        [
            "Deleted file: /var/tmp/a.tmp",
            "Deleted entire folder: /var/cache/old",
            "Deleted empty folder: /var/tmp/empty",
            "Skipped /var/builds: not old enough (age: 10 days, required: 30 days)",
            "Failed to delete /var/tmp/locked.tmp: Permission denied (os error 13)",
        ]
    );
}

#[test]
fn dry_run_wording_and_verbose_headers() {
    let mut p = printer(true, true);
    feed(&mut p, &sample_events()[..4]);

    assert_eq!(
        p.into_inner().lines(),
        [
            "== folders[0] /var/tmp (recursive scan)",
            "[dry-run] Would delete file: /var/tmp/a.tmp",
            "[dry-run] Would delete entire folder: /var/cache/old",
            "[dry-run] Would delete empty folder: /var/tmp/empty",
        ]
    );
}

#[test]
fn summary_uses_human_sizes() {
    let summary = SweepSummary {
        entries: 2,
        considered: 12,
        deleted: 9,
        skipped: 2,
        failed: 1,
        pruned: 3,
        bytes_freed: 1_500_000,
    };

    let mut p = printer(false, false);
    p.summary(&summary);
    let mut dry = printer(true, false);
    dry.summary(&summary);

    assert_eq!(
        p.into_inner().lines(),
        ["Done: 9 of 12 items deleted, 2 skipped, 1 failed, 3 empty folders removed, 1.50 MB freed"]
    );
    let dry_lines = dry.into_inner();
    assert!(dry_lines.lines()[0].starts_with("Dry run: 9 of 12 items would be deleted"));
    assert!(dry_lines.lines()[0].ends_with("1.50 MB would be freed"));
}

#[test]
fn rules_listing_shows_mode_criteria_and_warnings() {
    let location = ConfigLocation {
        path: PathBuf::from("/etc/reap/config.json"),
        source: ConfigSource::Argument,
    };
    let folders = vec![
        FolderEntry {
            path: PathBuf::from("/var/builds"),
            delete_entire_folder: true,
            recursive: false,
            allow_unconditional_delete: false,
            criteria: Criteria {
                folder_age_days: Some(30),
                ..Criteria::default()
            },
        },
        FolderEntry {
            path: PathBuf::from("/var/tmp"),
            delete_entire_folder: false,
            recursive: false,
            allow_unconditional_delete: false,
            criteria: Criteria::default(),
        },
    ];
    let warnings = vec!["folders[1]: no file criteria".to_string()];

    let mut p = printer(false, false);
    p.rules(&location, &folders, &warnings);

    assert_eq!(
        p.into_inner().lines(),
        [
            "Config: /etc/reap/config.json (from --config)",
            "folders[0] /var/builds (whole folder)",
            "    folderAgeDays=30",
            "folders[1] /var/tmp (scan)",
            "    (no criteria)",
            "Warning: folders[1]: no file criteria",
            "2 folder entries, 1 warnings",
        ]
    );
}
