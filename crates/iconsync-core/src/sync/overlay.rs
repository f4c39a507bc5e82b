//! Copy-on-write [`FileStore`] used for dry runs.

use iconsync_fs::{FileStore, MemoryStore, NormalizedPath, Result};

/// Reads fall through to `base`; writes stay in memory.
pub struct OverlayStore<'a> {
    base: &'a dyn FileStore,
    pending: MemoryStore,
}

impl<'a> OverlayStore<'a> {
    pub fn new(base: &'a dyn FileStore) -> Self {
        Self {
            base,
            pending: MemoryStore::new(),
        }
    }
}

impl FileStore for OverlayStore<'_> {
    fn exists(&self, path: &NormalizedPath) -> bool {
        self.pending.exists(path) || self.base.exists(path)
    }

    fn read(&self, path: &NormalizedPath) -> Result<Vec<u8>> {
        if self.pending.exists(path) {
            self.pending.read(path)
        } else {
            self.base.read(path)
        }
    }

    fn write(&mut self, path: &NormalizedPath, content: &[u8]) -> Result<()> {
        self.pending.write(path, content)
    }

    fn ensure_dir(&mut self, path: &NormalizedPath) -> Result<()> {
        self.pending.ensure_dir(path)
    }
}
