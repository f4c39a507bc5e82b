//! The remote-source seam consumed by the sync engine.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// One asset as reported by the remote source for the current run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteItem {
    /// Stable identifier assigned by the remote source.
    pub identifier: String,
    /// Human-editable name, `/`-separated for grouping.
    pub name: String,
    /// Structural digest of the asset's visual description.
    pub content_hash: String,
}

/// A source of remote assets.
///
/// Implementations fetch sequentially; a failure for any identifier fails the
/// whole call.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Fetch the current remote inventory.
    async fn list_items(&self) -> Result<Vec<RemoteItem>>;

    /// Fetch exported bytes for each identifier.
    ///
    /// The returned map holds an entry for every requested identifier.
    async fn fetch_contents(&self, identifiers: &[String]) -> Result<BTreeMap<String, Vec<u8>>>;
}
