//! Reconciliation of the remote inventory against the local one
//!
//! - **classify**: assign every asset exactly one [`Category`]
//! - **resolve**: turn a classified asset into file writes and advisories

mod classify;
mod events;
mod item;
mod resolve;

pub use classify::classify;
pub use events::{EventKind, EventLog, NotificationEvent};
pub use item::{Category, Changelog, ReconciledItem};
pub use resolve::{Resolution, Resolver, SaveAction};
