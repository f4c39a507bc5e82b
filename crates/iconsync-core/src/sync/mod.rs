//! Sync orchestration
//!
//! - **engine**: classify, fetch, resolve and persist one run
//! - **overlay**: copy-on-write store backing dry runs
//! - **report**: the summary returned to callers

mod engine;
mod overlay;
mod report;

pub use engine::{SyncEngine, SyncOptions};
pub use overlay::OverlayStore;
pub use report::{ChangelogSummary, SyncSummary};
