//! Change classification.

use std::collections::{HashMap, HashSet};

use iconsync_fs::FileStore;
use iconsync_remote::RemoteItem;

use super::item::{Category, Changelog, ReconciledItem};
use crate::config::SyncConfig;
use crate::inventory::LocalRecord;

/// Classify every remote item against the local inventory.
///
/// `local` is `None` on a first run. With `force_all`, or on a first run,
/// every remote item is [`Category::Added`] and nothing is removed.
///
/// Remote items are keyed by identifier; a repeated identifier keeps its
/// first occurrence. The category of each item depends only on its own
/// remote and local views and on whether its last saved file exists, never
/// on list order.
pub fn classify(
    remote: &[RemoteItem],
    local: Option<&[LocalRecord]>,
    force_all: bool,
    store: &dyn FileStore,
    config: &SyncConfig,
) -> Changelog {
    let mut seen = HashSet::with_capacity(remote.len());
    let remote: Vec<&RemoteItem> = remote
        .iter()
        .filter(|item| {
            let first = seen.insert(item.identifier.as_str());
            if !first {
                tracing::warn!(id = %item.identifier, name = %item.name, "duplicate remote identifier ignored");
            }
            first
        })
        .collect();

    let local = match local {
        Some(records) if !force_all => records,
        _ => {
            tracing::debug!(force_all, "classifying every remote item as added");
            return Changelog::new(
                remote
                    .iter()
                    .map(|r| ReconciledItem::added(&r.identifier, &r.name, &r.content_hash))
                    .collect(),
            );
        }
    };

    let by_id: HashMap<&str, &LocalRecord> =
        local.iter().map(|r| (r.identifier.as_str(), r)).collect();

    let mut items: Vec<ReconciledItem> = remote
        .iter()
        .map(|r| match by_id.get(r.identifier.as_str()) {
            Some(record) => classify_known(r, record, store, config),
            None => ReconciledItem::added(&r.identifier, &r.name, &r.content_hash),
        })
        .collect();

    items.extend(
        local
            .iter()
            .filter(|record| !seen.contains(record.identifier.as_str()))
            .filter(|record| {
                let present = store.exists(&config.file_path(&record.name));
                if !present {
                    tracing::debug!(id = %record.identifier, name = %record.name, "forgetting removed asset with no local file");
                }
                present
            })
            .map(ReconciledItem::removed),
    );

    for item in &items {
        tracing::debug!(id = %item.identifier, name = %item.name, category = %item.category, renamed = item.is_renamed, "classified");
    }

    Changelog::new(items)
}

fn classify_known(
    remote: &RemoteItem,
    record: &LocalRecord,
    store: &dyn FileStore,
    config: &SyncConfig,
) -> ReconciledItem {
    let mut previous_names = record.previous_names.clone();
    let is_renamed = record.name != remote.name;
    if is_renamed && !previous_names.contains(&record.name) {
        previous_names.push(record.name.clone());
    }

    let same_hash = record.content_hash == remote.content_hash;
    let file_exists = store.exists(&config.file_path(&record.name));
    let category = match (same_hash, file_exists) {
        (true, true) => Category::Unmodified,
        (false, true) => Category::Modified,
        (_, false) => Category::Restored,
    };

    ReconciledItem {
        identifier: remote.identifier.clone(),
        name: remote.name.clone(),
        previous_names,
        content_hash: remote.content_hash.clone(),
        category,
        is_renamed,
        content: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iconsync_fs::MemoryStore;

    fn remote(id: &str, name: &str, hash: &str) -> RemoteItem {
        RemoteItem {
            identifier: id.into(),
            name: name.into(),
            content_hash: hash.into(),
        }
    }

    #[test]
    fn rename_appends_previous_name_once() {
        let store = MemoryStore::new().with_file("old.svg", "x");
        let local = [LocalRecord::new("1", "old", "h").with_previous_names(&["older"])];

        let changelog = classify(
            &[remote("1", "new", "h")],
            Some(&local),
            false,
            &store,
            &SyncConfig::default(),
        );

        let item = &changelog.items()[0];
        assert!(item.is_renamed);
        assert_eq!(item.previous_names, vec!["older", "old"]);
        assert_eq!(item.category, Category::Unmodified);
    }

    #[test]
    fn duplicate_remote_identifier_keeps_first() {
        let changelog = classify(
            &[remote("1", "a", "h1"), remote("1", "b", "h2")],
            None,
            false,
            &MemoryStore::new(),
            &SyncConfig::default(),
        );
        assert_eq!(changelog.len(), 1);
        assert_eq!(changelog.items()[0].name, "a");
    }
}
