//! Local inventory: the persisted record of previously synced assets
//!
//! The inventory is a single JSON array stored next to the assets it
//! describes. It is replaced as a whole at the end of a successful run and is
//! the source of truth for rename history between runs.

pub mod legacy;

use std::collections::HashSet;

use iconsync_fs::{FileStore, NormalizedPath};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One previously synced asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalRecord {
    #[serde(rename = "id")]
    pub identifier: String,

    /// Name the asset was last saved under.
    pub name: String,

    /// Earlier names, oldest first. Never contains `name` or duplicates.
    #[serde(default)]
    pub previous_names: Vec<String>,

    #[serde(rename = "hash")]
    pub content_hash: String,
}

impl LocalRecord {
    pub fn new(
        identifier: impl Into<String>,
        name: impl Into<String>,
        content_hash: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
            previous_names: Vec::new(),
            content_hash: content_hash.into(),
        }
    }

    pub fn with_previous_names(mut self, names: &[&str]) -> Self {
        self.previous_names = names.iter().map(|n| n.to_string()).collect();
        self.normalize();
        self
    }

    /// Restore the history invariant: no duplicates and no current name.
    pub fn normalize(&mut self) {
        let mut seen = Vec::with_capacity(self.previous_names.len());
        self.previous_names.retain(|n| {
            if *n == self.name || seen.contains(n) {
                false
            } else {
                seen.push(n.clone());
                true
            }
        });
    }
}

/// The full set of local records, in persisted order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    records: Vec<LocalRecord>,
}

impl Inventory {
    /// Build an inventory, keeping only the first record per identifier.
    pub fn new(records: Vec<LocalRecord>) -> Self {
        let mut seen = HashSet::with_capacity(records.len());
        let records = records
            .into_iter()
            .filter(|r| {
                let first = seen.insert(r.identifier.clone());
                if !first {
                    tracing::warn!(id = %r.identifier, name = %r.name, "dropping duplicate inventory record");
                }
                first
            })
            .map(|mut r| {
                r.normalize();
                r
            })
            .collect();
        Self { records }
    }

    pub fn records(&self) -> &[LocalRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, identifier: &str) -> Option<&LocalRecord> {
        self.records.iter().find(|r| r.identifier == identifier)
    }

    /// Load the inventory at `path`.
    ///
    /// Returns `Ok(None)` when no inventory exists yet (first run).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InventoryCorrupt`] if the file exists but is not a
    /// valid inventory.
    pub fn load(store: &dyn FileStore, path: &NormalizedPath) -> Result<Option<Self>> {
        let Some(bytes) = store.read_if_exists(path)? else {
            tracing::debug!(%path, "no inventory found");
            return Ok(None);
        };

        let records: Vec<LocalRecord> =
            serde_json::from_slice(&bytes).map_err(|e| Error::InventoryCorrupt {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        tracing::debug!(%path, count = records.len(), "loaded inventory");
        Ok(Some(Self::new(records)))
    }

    /// Replace the inventory at `path` with these records.
    pub fn save(&self, store: &mut dyn FileStore, path: &NormalizedPath) -> Result<()> {
        let mut content = serde_json::to_vec_pretty(&self.records)?;
        content.push(b'\n');
        store.write(path, &content)?;
        tracing::debug!(%path, count = self.records.len(), "saved inventory");
        Ok(())
    }
}

impl FromIterator<LocalRecord> for Inventory {
    fn from_iter<I: IntoIterator<Item = LocalRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iconsync_fs::MemoryStore;
    use pretty_assertions::assert_eq;

    #[test]
    fn normalize_drops_current_name_and_duplicates() {
        let mut record = LocalRecord::new("1:1", "b", "h");
        record.previous_names = vec!["a".into(), "b".into(), "a".into(), "c".into()];
        record.normalize();
        assert_eq!(record.previous_names, vec!["a", "c"]);
    }

    #[test]
    fn duplicate_identifiers_keep_first_record() {
        let inventory = Inventory::new(vec![
            LocalRecord::new("1:1", "logo", "h1"),
            LocalRecord::new("2:1", "arrow", "h2"),
            LocalRecord::new("1:1", "logo-copy", "h3"),
        ]);

        assert_eq!(inventory.len(), 2);
        assert_eq!(inventory.get("1:1").unwrap().name, "logo");
        assert_eq!(inventory.get("1:1").unwrap().content_hash, "h1");
        let ids: Vec<&str> = inventory.records().iter().map(|r| r.identifier.as_str()).collect();
        assert_eq!(ids, vec!["1:1", "2:1"]);
    }

    #[test]
    fn duplicate_identifiers_on_disk_are_saved_once() {
        let mut store = MemoryStore::new().with_file(
            "_inventory.json",
            r#"[{"id":"1:1","name":"logo","hash":"h1"},{"id":"1:1","name":"other","hash":"h2"}]"#,
        );
        let path: NormalizedPath = "_inventory.json".into();

        let inventory = Inventory::load(&store, &path).unwrap().unwrap();
        inventory.save(&mut store, &path).unwrap();

        let saved: Vec<LocalRecord> =
            serde_json::from_slice(&store.read_if_exists(&path).unwrap().unwrap()).unwrap();
        assert_eq!(saved, vec![LocalRecord::new("1:1", "logo", "h1")]);
    }

    #[test]
    fn absent_inventory_is_first_run() {
        let store = MemoryStore::new();
        let loaded = Inventory::load(&store, &"_inventory.json".into()).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn malformed_inventory_is_fatal() {
        let store = MemoryStore::new().with_file("_inventory.json", "{ not json");
        let err = Inventory::load(&store, &"_inventory.json".into()).unwrap_err();
        assert!(matches!(err, Error::InventoryCorrupt { .. }));
    }

    #[test]
    fn persisted_field_names() {
        let mut store = MemoryStore::new();
        let inventory = Inventory::new(vec![
            LocalRecord::new("1:1", "logo", "sha256:aa").with_previous_names(&["brand"]),
        ]);
        inventory.save(&mut store, &"_inventory.json".into()).unwrap();

        let raw: serde_json::Value =
            serde_json::from_slice(store.get("_inventory.json").unwrap()).unwrap();
        assert_eq!(
            raw,
            serde_json::json!([
                {"id": "1:1", "name": "logo", "previousNames": ["brand"], "hash": "sha256:aa"}
            ])
        );
    }
}
