//! Sync command implementation

use std::path::Path;

use colored::Colorize;
use iconsync_core::{Category, EventKind, SyncEngine, SyncOptions, SyncSummary};
use iconsync_remote::{ContentProcessor, FigmaClient, Passthrough, SvgProcessor};

use super::Project;
use crate::error::Result;

/// Run the sync command
pub fn run_sync(
    cwd: &Path,
    config: Option<&Path>,
    force: bool,
    dry_run: bool,
    json: bool,
) -> Result<()> {
    let project = Project::load(cwd, config)?;
    let (file_key, token) = project.config.remote_credentials()?;

    let remote = FigmaClient::new(file_key, token)
        .with_api_base(project.config.remote.api_base.as_str())
        .with_pages(project.config.remote.pages.clone());

    let processor: Box<dyn ContentProcessor> = match project.config.optimize.svg_options() {
        Some(options) => Box::new(SvgProcessor::new(options)),
        None => Box::new(Passthrough),
    };

    if !json {
        let verb = if dry_run { "Previewing" } else { "Syncing" };
        println!(
            "{} {} into {}...",
            "=>".blue().bold(),
            verb,
            project.output_dir().display()
        );
    }

    let engine = SyncEngine::new(&project.config, processor.as_ref());
    let mut store = project.store();
    let options = SyncOptions {
        force_all: force,
        dry_run,
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let summary = runtime.block_on(engine.run(&remote, &mut store, options))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn print_summary(summary: &SyncSummary) {
    let changelog = &summary.changelog;

    for (category, marker) in [
        (Category::Added, "+".green()),
        (Category::Modified, "*".yellow()),
        (Category::Restored, "^".cyan()),
        (Category::Removed, "-".red()),
    ] {
        for file in changelog.files(category) {
            println!("   {} {} ({})", marker, file.cyan(), category.as_str().dimmed());
        }
    }

    for event in &summary.events {
        let label = match event.kind {
            EventKind::RenamedSavedBoth => "RENAMED".blue().bold(),
            EventKind::RenameReminder => "REMINDER".blue().bold(),
            EventKind::RenamedUnableToSave | EventKind::UnableToSave => "CONFLICT".red().bold(),
        };
        println!();
        println!("{} [{}] {}", label, event.kind.as_str().dimmed(), event.message);
        for file in &event.affected_files {
            println!("   {} {}", "!".dimmed(), file);
        }
    }

    println!();
    if changelog.is_unchanged() {
        println!(
            "{} Up to date ({} unchanged).",
            "OK".green().bold(),
            changelog.unmodified.len()
        );
    } else if summary.dry_run {
        println!(
            "{} Dry run: {} file(s) would be written, {} download(s).",
            "DRY RUN".yellow().bold(),
            summary.written.len(),
            summary.total_fetches
        );
    } else {
        println!(
            "{} {} added, {} modified, {} restored, {} removed ({} download(s)).",
            "OK".green().bold(),
            changelog.added.len(),
            changelog.modified.len(),
            changelog.restored.len(),
            changelog.removed.len(),
            summary.total_fetches
        );
    }
}
