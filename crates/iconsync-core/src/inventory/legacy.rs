//! One-time migration from the legacy inventory format.
//!
//! The legacy file is a JSON object keyed by identifier:
//!
//! ```json
//! { "1:23": { "name": "arrows/left", "hash": "sha256:..." } }
//! ```
//!
//! It carries no rename history. Migration is best-effort: any failure is
//! logged and the run continues as if no legacy file existed.

use std::collections::BTreeMap;

use iconsync_fs::FileStore;
use serde::Deserialize;

use super::{Inventory, LocalRecord};
use crate::config::SyncConfig;

#[derive(Debug, Deserialize)]
struct LegacyEntry {
    name: String,
    hash: String,
}

/// Outcome of a migration attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Migration {
    /// A current-format inventory already exists, or there is no legacy file.
    NotNeeded,
    /// The legacy file was converted.
    Migrated(Inventory),
    /// The legacy file exists but could not be used.
    Skipped { reason: String },
}

/// Convert the legacy inventory, if one exists and no current one does.
///
/// The converted inventory is returned, not written; the caller persists it.
pub fn migrate(store: &dyn FileStore, config: &SyncConfig) -> Migration {
    if store.exists(&config.inventory_path()) {
        return Migration::NotNeeded;
    }
    let legacy_path = config.legacy_inventory_path();

    let bytes = match store.read_if_exists(&legacy_path) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return Migration::NotNeeded,
        Err(e) => {
            tracing::warn!(path = %legacy_path, error = %e, "could not read legacy inventory");
            return Migration::Skipped {
                reason: e.to_string(),
            };
        }
    };

    let entries: BTreeMap<String, LegacyEntry> = match serde_json::from_slice(&bytes) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(path = %legacy_path, error = %e, "legacy inventory is malformed, skipping migration");
            return Migration::Skipped {
                reason: e.to_string(),
            };
        }
    };

    let inventory: Inventory = entries
        .into_iter()
        .map(|(identifier, entry)| LocalRecord::new(identifier, entry.name, entry.hash))
        .collect();

    tracing::info!(count = inventory.len(), "migrated legacy inventory");
    Migration::Migrated(inventory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use iconsync_fs::MemoryStore;
    use pretty_assertions::assert_eq;

    #[test]
    fn converts_legacy_entries() {
        let store = MemoryStore::new().with_file(
            ".icons.json",
            r#"{"2:1": {"name": "logo", "hash": "h2"}, "1:1": {"name": "arrow", "hash": "h1"}}"#,
        );

        let Migration::Migrated(inventory) = migrate(&store, &SyncConfig::default()) else {
            panic!("expected migration");
        };
        assert_eq!(
            inventory.records(),
            &[LocalRecord::new("1:1", "arrow", "h1"), LocalRecord::new("2:1", "logo", "h2")]
        );
    }

    #[test]
    fn current_inventory_wins() {
        let store = MemoryStore::new()
            .with_file("_inventory.json", "[]")
            .with_file(".icons.json", r#"{"1:1": {"name": "a", "hash": "h"}}"#);
        assert_eq!(migrate(&store, &SyncConfig::default()), Migration::NotNeeded);
    }

    #[test]
    fn no_legacy_file() {
        assert_eq!(
            migrate(&MemoryStore::new(), &SyncConfig::default()),
            Migration::NotNeeded
        );
    }

    #[test]
    fn malformed_legacy_is_skipped() {
        let store = MemoryStore::new().with_file(".icons.json", "[1, 2");
        assert!(matches!(
            migrate(&store, &SyncConfig::default()),
            Migration::Skipped { .. }
        ));
    }
}
