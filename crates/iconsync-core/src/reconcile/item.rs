//! Working representation of an asset during one run.

use serde::{Deserialize, Serialize};

use crate::inventory::LocalRecord;

/// Change category of an asset for the current run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Not in the local inventory (or a forced/first run).
    Added,
    /// Content hash changed and the local file is present.
    Modified,
    /// The local file is missing.
    Restored,
    /// Same hash, file present.
    Unmodified,
    /// Gone remotely but the local file still exists.
    Removed,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Added,
        Category::Modified,
        Category::Restored,
        Category::Unmodified,
        Category::Removed,
    ];

    /// Whether content for this category must come from the remote.
    pub fn needs_fetch(self) -> bool {
        matches!(self, Self::Added | Self::Modified | Self::Restored)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Modified => "modified",
            Self::Restored => "restored",
            Self::Unmodified => "unmodified",
            Self::Removed => "removed",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An asset merged from its remote and local views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciledItem {
    pub identifier: String,
    pub name: String,
    /// Earlier names, oldest first.
    pub previous_names: Vec<String>,
    pub content_hash: String,
    /// Set once, during classification.
    pub category: Category,
    /// The remote name differs from the last saved one.
    pub is_renamed: bool,
    /// Bytes to write: fetched for added/modified/restored, read from disk otherwise.
    pub content: Option<Vec<u8>>,
}

impl ReconciledItem {
    /// A brand-new asset with no history.
    pub fn added(
        identifier: impl Into<String>,
        name: impl Into<String>,
        content_hash: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
            previous_names: Vec::new(),
            content_hash: content_hash.into(),
            category: Category::Added,
            is_renamed: false,
            content: None,
        }
    }

    /// A local record with no remote counterpart.
    pub fn removed(record: &LocalRecord) -> Self {
        Self {
            identifier: record.identifier.clone(),
            name: record.name.clone(),
            previous_names: record.previous_names.clone(),
            content_hash: record.content_hash.clone(),
            category: Category::Removed,
            is_renamed: false,
            content: None,
        }
    }

    /// The record persisted for this item. Transient fields are dropped.
    pub fn to_record(&self) -> LocalRecord {
        let mut record = LocalRecord {
            identifier: self.identifier.clone(),
            name: self.name.clone(),
            previous_names: self.previous_names.clone(),
            content_hash: self.content_hash.clone(),
        };
        record.normalize();
        record
    }
}

/// Classification result, in discovery order: remote items first, in the
/// order the remote reported them, then removed local records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Changelog {
    items: Vec<ReconciledItem>,
}

impl Changelog {
    pub fn new(items: Vec<ReconciledItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[ReconciledItem] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut [ReconciledItem] {
        &mut self.items
    }

    pub fn into_items(self) -> Vec<ReconciledItem> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
