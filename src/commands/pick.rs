//! Pick command implementation.

use anyhow::Result;
use humansize::{format_size, BINARY};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::cli::PickArgs;
use crate::config::Config;
use crate::target::{
    format_selection, format_selection_json, RemovalResult, RemovalSummary, RemoveOptions,
    Remover, SelectionSummary,
};
use crate::tui::{self, PickOutcome};

/// Exit status when some targets could not be removed.
pub const PARTIAL_FAILURE_EXIT: i32 = 5;

/// Outcome of deleting an accepted selection.
#[derive(Debug, Serialize)]
pub struct DeleteReport {
    pub results: Vec<RemovalResult>,
    pub summary: RemovalSummary,
}

impl DeleteReport {
    pub fn exit_code(&self) -> i32 {
        if self.summary.failed_count > 0 {
            PARTIAL_FAILURE_EXIT
        } else {
            0
        }
    }
}

/// Run the pick command.
pub fn run(args: PickArgs, config: &Config) -> Result<()> {
    let path = args
        .path
        .canonicalize()
        .unwrap_or_else(|_| args.path.clone());

    let mut config = config.clone();
    if args.no_hidden {
        config.picker.show_hidden = false;
    }
    if args.no_color {
        config.tui.color = false;
    }

    let items = match tui::run(path, &config)? {
        PickOutcome::Accepted(items) => items,
        PickOutcome::Cancelled => {
            tracing::info!("Nothing picked");
            return Ok(());
        }
    };

    if !args.delete {
        if args.json {
            let summary = SelectionSummary::from_paths(&items);
            println!("{}", format_selection_json(&items, summary, true)?);
        } else if !items.is_empty() {
            println!("{}", format_selection(&items));
        }
        return Ok(());
    }

    let progress = ProgressBar::new(items.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {wide_msg}")?
            .progress_chars("=> "),
    );

    let report = delete_items(&items, args.dry_run, &progress);
    write_report(
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
        &report,
        args.dry_run,
        args.json,
    )?;

    let code = report.exit_code();
    if code != 0 {
        std::process::exit(code);
    }

    Ok(())
}

/// Remove every item, advancing `progress` once per item.
pub fn delete_items(items: &[PathBuf], dry_run: bool, progress: &ProgressBar) -> DeleteReport {
    let remover = Remover::new(RemoveOptions { dry_run });

    let mut results = Vec::with_capacity(items.len());
    for item in items {
        progress.set_message(item.display().to_string());
        results.push(remover.remove(item));
        progress.inc(1);
    }
    progress.finish_and_clear();

    let summary = Remover::summarize(&results);
    DeleteReport { results, summary }
}

/// Print a delete report. Failures go to `err` unless `json` is set.
pub fn write_report(
    out: &mut impl Write,
    err: &mut impl Write,
    report: &DeleteReport,
    dry_run: bool,
    json: bool,
) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, report)?;
        writeln!(out)?;
        return Ok(());
    }

    let summary = &report.summary;
    if dry_run {
        writeln!(out, "[DRY RUN] Would remove:")?;
        for result in &report.results {
            if let RemovalResult::Removed { path, .. } = result {
                writeln!(out, "  {}", path.display())?;
            }
        }
    }

    writeln!(out, "\nResults:")?;
    writeln!(out, "  Removed: {}", summary.removed_count)?;
    if summary.failed_count > 0 {
        writeln!(out, "  Failed:  {}", summary.failed_count)?;
    }
    if summary.skipped_count > 0 {
        writeln!(out, "  Skipped: {}", summary.skipped_count)?;
    }
    writeln!(out, "  Freed:   {}", format_size(summary.total_freed, BINARY))?;

    for result in &report.results {
        if let RemovalResult::Failed { path, error } = result {
            writeln!(err, "  Error removing {}: {}", path.display(), error)?;
        }
    }

    Ok(())
}
