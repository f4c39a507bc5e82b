//! Filesystem abstraction for iconsync
//!
//! Provides normalized path handling, atomic I/O, content checksums and the
//! [`FileStore`] capability the reconciliation engine reads and writes through.

pub mod checksum;
pub mod config;
pub mod error;
pub mod io;
pub mod path;
pub mod store;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use path::NormalizedPath;
pub use store::{DiskStore, FileStore, MemoryStore};
