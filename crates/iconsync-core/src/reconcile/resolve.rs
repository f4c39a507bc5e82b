//! Conflict resolution: deciding what gets written for a classified item.
//!
//! Rename handling takes precedence over category handling. Nothing here
//! deletes a file; every action is an additive write.

use iconsync_fs::{FileStore, NormalizedPath};

use super::events::{EventKind, NotificationEvent};
use super::item::{Category, ReconciledItem};
use crate::config::SyncConfig;
use crate::{Error, Result};

/// Write `content` to the file for asset name `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveAction {
    pub target: String,
    pub path: NormalizedPath,
    pub content: Vec<u8>,
}

/// The outcome of resolving one item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub actions: Vec<SaveAction>,
    pub events: Vec<NotificationEvent>,
    /// False when the item must not be persisted this cycle.
    pub keep: bool,
}

impl Resolution {
    fn kept() -> Self {
        Self {
            keep: true,
            ..Self::default()
        }
    }

    fn dropped(event: NotificationEvent) -> Self {
        Self {
            actions: Vec::new(),
            events: vec![event],
            keep: false,
        }
    }
}

/// Resolves items against the current state of a [`FileStore`].
pub struct Resolver<'a> {
    config: &'a SyncConfig,
    store: &'a dyn FileStore,
}

impl<'a> Resolver<'a> {
    pub fn new(config: &'a SyncConfig, store: &'a dyn FileStore) -> Self {
        Self { config, store }
    }

    /// Decide the writes and events for `item`.
    ///
    /// May rewrite `item.name` and `item.previous_names`; the caller persists
    /// the item as mutated here.
    ///
    /// # Errors
    ///
    /// Fails if an on-disk file cannot be read, or if a write is required and
    /// the item carries no content.
    pub fn resolve(&self, item: &mut ReconciledItem) -> Result<Resolution> {
        if item.is_renamed {
            self.resolve_renamed(item)
        } else if item.category == Category::Added {
            self.resolve_added(item)
        } else {
            self.resolve_existing(item)
        }
    }

    fn resolve_renamed(&self, item: &mut ReconciledItem) -> Result<Resolution> {
        // Renamed back to a name already in history
        if let Some(pos) = item.previous_names.iter().position(|n| *n == item.name) {
            item.previous_names.remove(pos);
            return self.save_all_names(item, EventKind::RenamedSavedBoth);
        }

        let new_path = self.config.file_path(&item.name);
        let Some(reason) = self.blocked(&new_path, content_of(item)?)? else {
            return self.save_all_names(item, EventKind::RenamedSavedBoth);
        };

        let attempted = item.name.clone();
        if let Some(previous) = item.previous_names.pop() {
            item.name = previous;
        }
        item.is_renamed = false;

        let mut resolution = Resolution::kept();
        resolution.events.push(NotificationEvent::new(
            EventKind::RenamedUnableToSave,
            format!(
                "'{}' was renamed to '{}', but {} {reason}. \
                 The rename was not applied; it will be retried on the next run.",
                item.name,
                attempted,
                self.config.file_name(&attempted),
            ),
            vec![
                self.config.file_name(&attempted),
                self.config.file_name(&item.name),
            ],
        ));

        // Keep the old-named file current so the persisted hash matches disk
        if item.category != Category::Unmodified {
            resolution.actions.push(self.action(&item.name, content_of(item)?.to_vec()));
        }

        Ok(resolution)
    }

    fn resolve_added(&self, item: &mut ReconciledItem) -> Result<Resolution> {
        let path = self.config.file_path(&item.name);
        let content = content_of(item)?;

        if let Some(reason) = self.blocked(&path, content)? {
            let file = path.to_string();
            return Ok(Resolution::dropped(NotificationEvent::new(
                EventKind::UnableToSave,
                format!("{file} {reason}; the new asset '{}' was not saved.", item.name),
                vec![file],
            )));
        }

        let mut resolution = Resolution::kept();
        resolution.actions.push(self.action(&item.name, content.to_vec()));
        Ok(resolution)
    }

    fn resolve_existing(&self, item: &mut ReconciledItem) -> Result<Resolution> {
        let path = self.config.file_path(&item.name);
        if !path.is_contained() {
            let file = path.to_string();
            return Ok(Resolution::dropped(NotificationEvent::new(
                EventKind::UnableToSave,
                format!("{file} is not a valid path inside the output directory; '{}' was not saved.", item.name),
                vec![file],
            )));
        }

        let name = item.name.clone();
        item.previous_names
            .retain(|n| *n != name && self.store.exists(&self.config.file_path(n)));

        let mut resolution = Resolution::kept();

        if !item.previous_names.is_empty() {
            let files: Vec<String> = item
                .previous_names
                .iter()
                .map(|n| self.config.file_name(n))
                .collect();
            resolution.events.push(NotificationEvent::new(
                EventKind::RenameReminder,
                format!(
                    "'{}' still has files under earlier names ({}). Remove them from consuming code, then delete them.",
                    item.name,
                    files.join(", ")
                ),
                files,
            ));
        }

        if matches!(item.category, Category::Unmodified | Category::Removed) {
            return Ok(resolution);
        }

        let content = content_of(item)?.to_vec();
        resolution.actions.push(self.action(&item.name, content.clone()));
        for previous in &item.previous_names {
            resolution.actions.push(self.action(previous, content.clone()));
        }
        Ok(resolution)
    }

    fn save_all_names(&self, item: &mut ReconciledItem, kind: EventKind) -> Result<Resolution> {
        let content = content_of(item)?.to_vec();
        let mut resolution = Resolution::kept();

        resolution.actions.push(self.action(&item.name, content.clone()));
        for previous in item
            .previous_names
            .iter()
            .filter(|n| self.config.file_path(n).is_contained())
        {
            resolution.actions.push(self.action(previous, content.clone()));
        }

        let files: Vec<String> = resolution.actions.iter().map(|a| a.path.to_string()).collect();
        resolution.events.push(NotificationEvent::new(
            kind,
            format!(
                "'{}' was renamed; it was saved under both its new and earlier names ({}). \
                 Update references to the earlier names, then delete those files.",
                item.name,
                files.join(", ")
            ),
            files,
        ));
        Ok(resolution)
    }

    /// Why `content` cannot be written to `path`, if it cannot.
    ///
    /// A file already holding exactly `content` does not block.
    fn blocked(&self, path: &NormalizedPath, content: &[u8]) -> Result<Option<&'static str>> {
        if !path.is_contained() {
            return Ok(Some("is not a valid path inside the output directory"));
        }
        let collides = self
            .store
            .read_if_exists(path)?
            .is_some_and(|existing| existing != content);
        Ok(collides.then_some("already exists with different content"))
    }

    fn action(&self, target: &str, content: Vec<u8>) -> SaveAction {
        SaveAction {
            target: target.to_string(),
            path: self.config.file_path(target),
            content,
        }
    }
}

fn content_of(item: &ReconciledItem) -> Result<&[u8]> {
    item.content.as_deref().ok_or_else(|| Error::ContentMissing {
        identifier: item.identifier.clone(),
    })
}
