//! Status command implementation
//!
//! Reads only the local inventory; never contacts the remote.

use std::path::Path;

use colored::Colorize;
use iconsync_core::SyncEngine;
use iconsync_fs::FileStore;
use iconsync_remote::Passthrough;
use serde::Serialize;

use super::Project;
use crate::error::Result;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AssetStatus {
    id: String,
    file: String,
    previous_names: Vec<String>,
    hash: String,
    present: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusReport {
    config: String,
    output_dir: String,
    file_key: String,
    synced: bool,
    assets: Vec<AssetStatus>,
    missing: Vec<String>,
    earlier_names: Vec<String>,
}

/// Run the status command
pub fn run_status(cwd: &Path, config: Option<&Path>, json: bool) -> Result<()> {
    let project = Project::load(cwd, config)?;
    let store = project.store();
    let engine = SyncEngine::new(&project.config, &Passthrough);
    let inventory = engine.load_inventory(&store)?;

    let mut report = StatusReport {
        config: project.config_path.display().to_string(),
        output_dir: project.output_dir().display().to_string(),
        file_key: project.config.remote.file_key.clone(),
        synced: inventory.is_some(),
        assets: Vec::new(),
        missing: Vec::new(),
        earlier_names: Vec::new(),
    };

    if let Some(inventory) = &inventory {
        for record in inventory.records() {
            let path = project.config.file_path(&record.name);
            let present = store.exists(&path);
            if !present {
                report.missing.push(path.to_string());
            }
            report.assets.push(AssetStatus {
                id: record.identifier.clone(),
                file: path.to_string(),
                previous_names: record.previous_names.clone(),
                hash: record.content_hash.clone(),
                present,
            });
            report.earlier_names.extend(
                record
                    .previous_names
                    .iter()
                    .map(|n| project.config.file_path(n))
                    .filter(|p| store.exists(p))
                    .map(|p| p.to_string()),
            );
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", "iconsync status".bold());
    println!();
    println!("{}:     {}", "Config".dimmed(), report.config);
    println!("{}:     {}", "Output".dimmed(), report.output_dir);
    println!("{}:   {}", "File key".dimmed(), report.file_key.cyan());
    println!();

    if !report.synced {
        println!("{}", "Never synced".yellow().bold());
        println!();
        println!("Run {} to download assets.", "iconsync sync".cyan());
        return Ok(());
    }

    println!("{} ({}):", "Tracked assets".bold(), report.assets.len());
    for asset in &report.assets {
        let marker = if asset.present { "+".green() } else { "-".yellow() };
        println!("  {} {} {}", marker, asset.file.cyan(), short_hash(&asset.hash).dimmed());
        if !asset.previous_names.is_empty() {
            println!("      {} {}", "was".dimmed(), asset.previous_names.join(", "));
        }
    }

    if !report.missing.is_empty() {
        println!();
        println!("{} Missing locally (restored on next sync):", "MISSING".yellow().bold());
        for file in &report.missing {
            println!("   {} {}", "-".yellow(), file.cyan());
        }
    }

    if !report.earlier_names.is_empty() {
        println!();
        println!("{} Files kept under earlier names:", "RENAMED".blue().bold());
        for file in &report.earlier_names {
            println!("   {} {}", "~".blue(), file.cyan());
        }
    }

    Ok(())
}

/// First 12 hex digits of a `sha256:<hex>` digest.
fn short_hash(hash: &str) -> &str {
    let hex = hash.strip_prefix("sha256:").unwrap_or(hash);
    hex.get(..12).unwrap_or(hex)
}
