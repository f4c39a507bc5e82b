//! The narrow filesystem capability the sync engine is given.
//!
//! All paths handed to a [`FileStore`] are relative to the store root (the
//! configured output directory). Writes are additive: nothing in this trait
//! deletes a file.

use std::collections::BTreeMap;

use crate::{Error, NormalizedPath, Result, io};

/// Filesystem operations needed to reconcile an asset directory.
pub trait FileStore {
    /// True if a file exists at `path`.
    fn exists(&self, path: &NormalizedPath) -> bool;

    /// Read the full contents of the file at `path`.
    fn read(&self, path: &NormalizedPath) -> Result<Vec<u8>>;

    /// Replace the file at `path` with `content`, creating parents as needed.
    fn write(&mut self, path: &NormalizedPath, content: &[u8]) -> Result<()>;

    /// Create `path` and all missing ancestors as directories.
    fn ensure_dir(&mut self, path: &NormalizedPath) -> Result<()>;

    /// Read `path` if it exists.
    fn read_if_exists(&self, path: &NormalizedPath) -> Result<Option<Vec<u8>>> {
        if self.exists(path) {
            self.read(path).map(Some)
        } else {
            Ok(None)
        }
    }
}

/// A [`FileStore`] rooted at a directory on disk.
#[derive(Debug, Clone)]
pub struct DiskStore {
    root: NormalizedPath,
}

impl DiskStore {
    pub fn new(root: impl Into<NormalizedPath>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    fn resolve(&self, path: &NormalizedPath) -> Result<NormalizedPath> {
        if !path.is_contained() {
            return Err(Error::OutsideRoot {
                path: path.to_string(),
            });
        }
        Ok(self.root.join(path.as_str()))
    }
}

impl FileStore for DiskStore {
    fn exists(&self, path: &NormalizedPath) -> bool {
        self.resolve(path).map(|p| p.is_file()).unwrap_or(false)
    }

    fn read(&self, path: &NormalizedPath) -> Result<Vec<u8>> {
        io::read_bytes(&self.resolve(path)?)
    }

    fn write(&mut self, path: &NormalizedPath, content: &[u8]) -> Result<()> {
        let target = self.resolve(path)?;
        tracing::debug!(path = %target, bytes = content.len(), "writing file");
        io::write_atomic(&target, content)
    }

    fn ensure_dir(&mut self, path: &NormalizedPath) -> Result<()> {
        let target = self.resolve(path)?;
        std::fs::create_dir_all(target.to_native()).map_err(|e| Error::io(target.to_native(), e))
    }
}

/// In-memory [`FileStore`] used by tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    files: BTreeMap<NormalizedPath, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file.
    pub fn with_file(mut self, path: &str, content: impl Into<Vec<u8>>) -> Self {
        self.insert(path, content);
        self
    }

    /// Seed a file.
    pub fn insert(&mut self, path: &str, content: impl Into<Vec<u8>>) {
        self.files.insert(NormalizedPath::new(path), content.into());
    }

    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.files.get(&NormalizedPath::new(path)).map(Vec::as_slice)
    }
}

impl FileStore for MemoryStore {
    fn exists(&self, path: &NormalizedPath) -> bool {
        self.files.contains_key(path)
    }

    fn read(&self, path: &NormalizedPath) -> Result<Vec<u8>> {
        self.files.get(path).cloned().ok_or_else(|| Error::NotFound {
            path: path.to_native(),
        })
    }

    fn write(&mut self, path: &NormalizedPath, content: &[u8]) -> Result<()> {
        if !path.is_contained() {
            return Err(Error::OutsideRoot {
                path: path.to_string(),
            });
        }
        self.files.insert(path.clone(), content.to_vec());
        Ok(())
    }

    fn ensure_dir(&mut self, path: &NormalizedPath) -> Result<()> {
        if !path.is_contained() {
            return Err(Error::OutsideRoot {
                path: path.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_holds_seeds_and_writes() {
        let mut store = MemoryStore::new().with_file("a.svg", "<svg/>");
        store.write(&"arrows/b.svg".into(), b"<svg/>").unwrap();

        assert!(store.exists(&"a.svg".into()));
        assert!(store.exists(&"arrows/b.svg".into()));
        assert!(!store.exists(&"arrows".into()));
    }

    #[test]
    fn memory_store_read_missing_is_not_found() {
        let store = MemoryStore::new();
        let err = store.read(&"missing.svg".into()).unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn read_if_exists_returns_none_for_missing() {
        let store = MemoryStore::new().with_file("x.svg", "x");
        assert_eq!(store.read_if_exists(&"x.svg".into()).unwrap(), Some(b"x".to_vec()));
        assert_eq!(store.read_if_exists(&"y.svg".into()).unwrap(), None);
    }

    #[test]
    fn writes_outside_root_are_rejected() {
        let mut store = MemoryStore::new();
        let err = store.write(&"../escape.svg".into(), b"x").unwrap_err();
        assert!(matches!(err, Error::OutsideRoot { .. }));
        let err = store.ensure_dir(&"../escape".into()).unwrap_err();
        assert!(matches!(err, Error::OutsideRoot { .. }));
    }
}
