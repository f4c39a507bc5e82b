//! Summary of a sync run.

use serde::{Deserialize, Serialize};

use crate::reconcile::{Category, NotificationEvent};

/// File names per change category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogSummary {
    pub added: Vec<String>,
    pub modified: Vec<String>,
    pub restored: Vec<String>,
    pub unmodified: Vec<String>,
    pub removed: Vec<String>,
}

impl ChangelogSummary {
    pub fn push(&mut self, category: Category, file: String) {
        self.files_mut(category).push(file);
    }

    pub fn files(&self, category: Category) -> &[String] {
        match category {
            Category::Added => &self.added,
            Category::Modified => &self.modified,
            Category::Restored => &self.restored,
            Category::Unmodified => &self.unmodified,
            Category::Removed => &self.removed,
        }
    }

    fn files_mut(&mut self, category: Category) -> &mut Vec<String> {
        match category {
            Category::Added => &mut self.added,
            Category::Modified => &mut self.modified,
            Category::Restored => &mut self.restored,
            Category::Unmodified => &mut self.unmodified,
            Category::Removed => &mut self.removed,
        }
    }

    /// True when nothing was added, modified, restored or removed.
    pub fn is_unchanged(&self) -> bool {
        self.added.is_empty()
            && self.modified.is_empty()
            && self.restored.is_empty()
            && self.removed.is_empty()
    }
}

/// Result of one run, returned to the caller and printed by the CLI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncSummary {
    pub changelog: ChangelogSummary,
    /// Number of assets whose content was requested from the remote.
    pub total_fetches: usize,
    pub events: Vec<NotificationEvent>,
    /// Asset files written (or, in a dry run, that would be written).
    pub written: Vec<String>,
    pub dry_run: bool,
}
