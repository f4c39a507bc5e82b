//! SyncEngine implementation
//!
//! One run: migrate a legacy inventory if needed, list the remote, classify,
//! fetch content for changed items only, resolve each item in discovery
//! order, then replace the inventory. Any fatal error before the final save
//! leaves the previous inventory untouched.

use std::collections::HashMap;

use iconsync_fs::{FileStore, NormalizedPath};
use iconsync_remote::{ContentProcessor, RemoteItem, RemoteSource};

use super::overlay::OverlayStore;
use super::report::SyncSummary;
use crate::config::SyncConfig;
use crate::inventory::Inventory;
use crate::inventory::legacy::{self, Migration};
use crate::reconcile::{EventLog, ReconciledItem, Resolver, classify};
use crate::{Error, Result};

/// Per-run options, separate from the persistent configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// Treat every remote item as added, ignoring local history.
    pub force_all: bool,
    /// Compute everything but write nothing.
    pub dry_run: bool,
}

/// Engine for reconciling an output directory with the remote source.
pub struct SyncEngine<'a> {
    config: &'a SyncConfig,
    processor: &'a dyn ContentProcessor,
}

impl<'a> SyncEngine<'a> {
    pub fn new(config: &'a SyncConfig, processor: &'a dyn ContentProcessor) -> Self {
        Self { config, processor }
    }

    /// Load the persisted inventory, if any.
    pub fn load_inventory(&self, store: &dyn FileStore) -> Result<Option<Inventory>> {
        Inventory::load(store, &self.config.inventory_path())
    }

    /// Run one sync against `store`.
    ///
    /// # Errors
    ///
    /// Remote failures, a corrupt inventory, unreadable files and missing
    /// content are fatal. Naming conflicts are reported in the summary's
    /// events instead.
    pub async fn run(
        &self,
        remote: &dyn RemoteSource,
        store: &mut dyn FileStore,
        options: SyncOptions,
    ) -> Result<SyncSummary> {
        if options.dry_run {
            let mut overlay = OverlayStore::new(&*store);
            self.run_on(remote, &mut overlay, options).await
        } else {
            self.run_on(remote, store, options).await
        }
    }

    async fn run_on(
        &self,
        remote: &dyn RemoteSource,
        store: &mut dyn FileStore,
        options: SyncOptions,
    ) -> Result<SyncSummary> {
        let inventory_path = self.config.inventory_path();

        // A migrated inventory is only persisted by the final save below
        let local = match legacy::migrate(&*store, self.config) {
            Migration::Migrated(inventory) => Some(inventory),
            Migration::Skipped { .. } | Migration::NotNeeded => self.load_inventory(&*store)?,
        };

        let remote_items = remote.list_items().await?;
        tracing::info!(count = remote_items.len(), "remote inventory fetched");

        let mut changelog = classify(
            &remote_items,
            local.as_ref().map(Inventory::records),
            options.force_all,
            &*store,
            self.config,
        );

        let fetch_ids: Vec<String> = changelog
            .items()
            .iter()
            .filter(|i| i.category.needs_fetch())
            .map(|i| i.identifier.clone())
            .collect();

        let mut fetched = if fetch_ids.is_empty() {
            Default::default()
        } else {
            tracing::info!(count = fetch_ids.len(), "fetching changed assets");
            remote.fetch_contents(&fetch_ids).await?
        };

        let remote_by_id: HashMap<&str, &RemoteItem> = remote_items
            .iter()
            .map(|r| (r.identifier.as_str(), r))
            .collect();

        for item in changelog.items_mut() {
            if item.category.needs_fetch() {
                let bytes = fetched
                    .remove(&item.identifier)
                    .ok_or_else(|| Error::ContentMissing {
                        identifier: item.identifier.clone(),
                    })?;
                let source = remote_by_id
                    .get(item.identifier.as_str())
                    .ok_or_else(|| Error::ContentMissing {
                        identifier: item.identifier.clone(),
                    })?;
                item.content = Some(self.processor.process(source, bytes)?);
            } else {
                item.content = self.read_existing(&*store, item)?;
            }
        }

        let mut events = EventLog::new();
        let mut written = Vec::new();
        let mut kept: Vec<ReconciledItem> = Vec::with_capacity(changelog.len());

        for mut item in changelog.into_items() {
            let resolution = Resolver::new(self.config, &*store).resolve(&mut item)?;

            for action in &resolution.actions {
                if let Some(dir) = action.path.parent() {
                    store.ensure_dir(&dir)?;
                }
                store.write(&action.path, &action.content)?;
                written.push(action.path.to_string());
            }
            events.extend(resolution.events);

            if resolution.keep {
                kept.push(item);
            } else {
                tracing::info!(id = %item.identifier, name = %item.name, "asset not saved this run");
            }
        }

        let inventory: Inventory = kept.iter().map(ReconciledItem::to_record).collect();
        inventory.save(store, &inventory_path)?;

        let mut summary = SyncSummary {
            total_fetches: fetch_ids.len(),
            events: events.into_vec(),
            written,
            dry_run: options.dry_run,
            ..SyncSummary::default()
        };
        for item in &kept {
            summary
                .changelog
                .push(item.category, self.config.file_name(&item.name));
        }

        tracing::info!(
            written = summary.written.len(),
            events = summary.events.len(),
            dry_run = options.dry_run,
            "sync complete"
        );
        Ok(summary)
    }

    /// Bytes already on disk for an item.
    ///
    /// A renamed item's last saved file is under an earlier name, so earlier
    /// names (most recent first) are tried before the new one; otherwise the
    /// current name comes first.
    fn read_existing(&self, store: &dyn FileStore, item: &ReconciledItem) -> Result<Option<Vec<u8>>> {
        let mut candidates: Vec<&String> = item.previous_names.iter().rev().collect();
        if item.is_renamed {
            candidates.push(&item.name);
        } else {
            candidates.insert(0, &item.name);
        }
        for path in candidates
            .into_iter()
            .map(|n| self.config.file_path(n))
            .filter(NormalizedPath::is_contained)
        {
            if let Some(bytes) = store.read_if_exists(&path)? {
                return Ok(Some(bytes));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iconsync_fs::MemoryStore;
    use iconsync_remote::Passthrough;
    use iconsync_test_utils::FakeRemote;
    use pretty_assertions::assert_eq;

    /// Records directory requests before delegating to a [`MemoryStore`].
    #[derive(Default)]
    struct DirRecorder {
        inner: MemoryStore,
        dirs: Vec<String>,
    }

    impl FileStore for DirRecorder {
        fn exists(&self, path: &NormalizedPath) -> bool {
            self.inner.exists(path)
        }

        fn read(&self, path: &NormalizedPath) -> iconsync_fs::Result<Vec<u8>> {
            self.inner.read(path)
        }

        fn write(&mut self, path: &NormalizedPath, content: &[u8]) -> iconsync_fs::Result<()> {
            self.inner.write(path, content)
        }

        fn ensure_dir(&mut self, path: &NormalizedPath) -> iconsync_fs::Result<()> {
            self.dirs.push(path.to_string());
            self.inner.ensure_dir(path)
        }
    }

    #[tokio::test]
    async fn nested_names_create_their_directory() {
        let config = SyncConfig::default();
        let remote = FakeRemote::new()
            .with_asset("1:1", "logo", "<svg/>")
            .with_asset("1:2", "arrows/left", "<svg l/>");
        let mut store = DirRecorder::default();

        SyncEngine::new(&config, &Passthrough)
            .run(&remote, &mut store, SyncOptions::default())
            .await
            .unwrap();

        assert_eq!(store.dirs, vec!["arrows"]);
        assert_eq!(store.inner.get("arrows/left.svg"), Some(&b"<svg l/>"[..]));
    }
}
