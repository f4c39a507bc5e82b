//! [`FakeRemote`]: an in-memory remote source whose inventory tests edit
//! between runs.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use iconsync_fs::checksum::compute_checksum;
use iconsync_remote::{Error, RemoteItem, RemoteSource, Result};

#[derive(Debug, Clone)]
struct Asset {
    item: RemoteItem,
    content: Vec<u8>,
}

/// A remote source backed by a list of assets.
///
/// Content hashes are derived from the content, so changing an asset's bytes
/// changes its hash unless [`FakeRemote::set_hash`] overrides it.
///
/// # Example
///
/// ```rust,no_run
/// use iconsync_test_utils::FakeRemote;
///
/// let mut remote = FakeRemote::new().with_asset("1:1", "logo", "<svg/>");
/// remote.rename("1:1", "brand/logo");
/// ```
#[derive(Debug, Default)]
pub struct FakeRemote {
    assets: Vec<Asset>,
    fail_fetch: bool,
    fail_list: bool,
    fetch_log: Mutex<Vec<Vec<String>>>,
}

impl FakeRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_asset(mut self, id: &str, name: &str, content: &str) -> Self {
        self.set_asset(id, name, content);
        self
    }

    /// Insert or replace an asset, keeping its position if it already exists.
    pub fn set_asset(&mut self, id: &str, name: &str, content: &str) {
        let asset = Asset {
            item: RemoteItem {
                identifier: id.to_string(),
                name: name.to_string(),
                content_hash: compute_checksum(content.as_bytes()),
            },
            content: content.as_bytes().to_vec(),
        };
        match self.assets.iter_mut().find(|a| a.item.identifier == id) {
            Some(existing) => *existing = asset,
            None => self.assets.push(asset),
        }
    }

    /// Change only the name of an asset.
    pub fn rename(&mut self, id: &str, name: &str) {
        self.asset_mut(id).item.name = name.to_string();
    }

    /// Change only the content of an asset (and therefore its hash).
    pub fn set_content(&mut self, id: &str, content: &str) {
        let asset = self.asset_mut(id);
        asset.content = content.as_bytes().to_vec();
        asset.item.content_hash = compute_checksum(content.as_bytes());
    }

    /// Override the reported hash without touching the content.
    pub fn set_hash(&mut self, id: &str, hash: &str) {
        self.asset_mut(id).item.content_hash = hash.to_string();
    }

    pub fn remove(&mut self, id: &str) {
        self.assets.retain(|a| a.item.identifier != id);
    }

    /// Make every subsequent `fetch_contents` call fail.
    pub fn fail_fetches(&mut self, fail: bool) {
        self.fail_fetch = fail;
    }

    /// Make every subsequent `list_items` call fail.
    pub fn fail_listing(&mut self, fail: bool) {
        self.fail_list = fail;
    }

    /// Identifiers requested by each `fetch_contents` call, in order.
    pub fn fetch_log(&self) -> Vec<Vec<String>> {
        self.fetch_log.lock().map(|log| log.clone()).unwrap_or_default()
    }

    /// Identifiers requested by the most recent `fetch_contents` call.
    pub fn last_fetch(&self) -> Vec<String> {
        self.fetch_log().pop().unwrap_or_default()
    }

    pub fn clear_fetch_log(&self) {
        if let Ok(mut log) = self.fetch_log.lock() {
            log.clear();
        }
    }

    fn asset_mut(&mut self, id: &str) -> &mut Asset {
        self.assets
            .iter_mut()
            .find(|a| a.item.identifier == id)
            .unwrap_or_else(|| panic!("FakeRemote: no asset with id {id}"))
    }
}

#[async_trait]
impl RemoteSource for FakeRemote {
    async fn list_items(&self) -> Result<Vec<RemoteItem>> {
        if self.fail_list {
            return Err(Error::Api {
                status: 500,
                message: "listing failed".to_string(),
            });
        }
        Ok(self.assets.iter().map(|a| a.item.clone()).collect())
    }

    async fn fetch_contents(&self, identifiers: &[String]) -> Result<BTreeMap<String, Vec<u8>>> {
        if let Ok(mut log) = self.fetch_log.lock() {
            log.push(identifiers.to_vec());
        }
        if self.fail_fetch {
            return Err(Error::Api {
                status: 503,
                message: "export failed".to_string(),
            });
        }

        identifiers
            .iter()
            .map(|id| {
                self.assets
                    .iter()
                    .find(|a| a.item.identifier == *id)
                    .map(|a| (id.clone(), a.content.clone()))
                    .ok_or_else(|| Error::MissingExport { id: id.clone() })
            })
            .collect()
    }
}
