//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `skillradar_core` linkage.
//! - Optionally load an exported document and print what the core derives
//!   from it.
//!
//! Usage: `skillradar_cli [document.json]`

use skillradar_core::{core_version, CoreConfig, TrackerService};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("skillradar_core version={}", core_version());

    let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        return ExitCode::SUCCESS;
    };

    let mut tracker = TrackerService::new(CoreConfig::default());
    let report = match tracker.import_file(&path) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("import failed: {err}");
            return ExitCode::FAILURE;
        }
    };
    println!(
        "imported skills={} snapshots={} clamped_scores={} dropped_orphans={}",
        report.skills, report.snapshots, report.clamped_scores, report.dropped_orphans
    );

    for view in tracker.snapshot_views() {
        let marker = if view.selected { '*' } else { ' ' };
        println!("{marker} snapshot {} {} ({})", view.id, view.name, view.date);
    }
    for row in tracker.project() {
        let scores: Vec<String> = row
            .points
            .iter()
            .map(|point| point.score.to_string())
            .collect();
        println!("{:<24} {}", row.subject, scores.join(" "));
    }
    ExitCode::SUCCESS
}
