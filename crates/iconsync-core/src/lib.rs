//! Reconciliation engine for iconsync
//!
//! Keeps a local directory of exported assets in step with a remote design
//! file across runs, tracking additions, content changes, renames, removals
//! and restorations:
//!
//! - **Inventory**: the persisted record of what was synced last time
//! - **Classification**: every asset gets exactly one [`Category`]
//! - **Resolution**: writes and [`NotificationEvent`]s per asset, with rename
//!   handling that never silently breaks existing file references
//! - **SyncEngine**: sequences the above and persists the new inventory
//!
//! # Architecture
//!
//! ```text
//!            iconsync-cli
//!                 |
//!           iconsync-core
//!                 |
//!       +---------+---------+
//!       |                   |
//! iconsync-fs        iconsync-remote
//! ```

pub mod config;
pub mod error;
pub mod inventory;
pub mod reconcile;
pub mod sync;

pub use config::{NamingPolicy, OptimizeSection, RemoteSection, SyncConfig};
pub use error::{Error, Result};
pub use inventory::{Inventory, LocalRecord};
pub use reconcile::{
    Category, Changelog, EventKind, EventLog, NotificationEvent, ReconciledItem, Resolution,
    Resolver, SaveAction, classify,
};
pub use sync::{ChangelogSummary, OverlayStore, SyncEngine, SyncOptions, SyncSummary};

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn error_inventory_corrupt_displays_path() {
        let error = Error::InventoryCorrupt {
            path: "icons/_inventory.json".to_string(),
            message: "expected value".to_string(),
        };
        let display = error.to_string();
        assert!(display.contains("icons/_inventory.json"));
        assert!(display.contains("corrupt"));
    }

    #[test]
    fn error_config_not_found_displays_path() {
        let error = Error::ConfigNotFound {
            path: PathBuf::from("/work/iconsync.toml"),
        };
        assert!(error.to_string().contains("/work/iconsync.toml"));
    }
}
