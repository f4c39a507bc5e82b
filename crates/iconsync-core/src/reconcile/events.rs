//! Advisory events raised while resolving a run.

use serde::{Deserialize, Serialize};

/// What needs a human's attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    /// A rename was applied; files under the old and new names both exist.
    RenamedSavedBoth,
    /// A rename collided with an unrelated file and was not applied.
    RenamedUnableToSave,
    /// A new asset collided with an unrelated file and was not saved.
    UnableToSave,
    /// Files under earlier names of an asset are still on disk.
    RenameReminder,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RenamedSavedBoth => "renamed-saved-both",
            Self::RenamedUnableToSave => "renamed-unable-to-save",
            Self::UnableToSave => "unable-to-save",
            Self::RenameReminder => "rename-reminder",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationEvent {
    pub kind: EventKind,
    pub message: String,
    pub affected_files: Vec<String>,
}

impl NotificationEvent {
    pub fn new(kind: EventKind, message: impl Into<String>, affected_files: Vec<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            affected_files,
        }
    }
}

/// Run-scoped sink for [`NotificationEvent`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<NotificationEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: NotificationEvent) {
        tracing::debug!(kind = %event.kind, files = ?event.affected_files, "event");
        self.events.push(event);
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = NotificationEvent>) {
        for event in events {
            self.push(event);
        }
    }

    pub fn into_vec(self) -> Vec<NotificationEvent> {
        self.events
    }
}
