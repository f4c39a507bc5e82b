//! Remote design-file access for iconsync
//!
//! Everything the reconciliation engine needs from the design tool lives
//! behind [`RemoteSource`]: a flat list of [`RemoteItem`]s and, on demand,
//! the exported bytes for a set of identifiers. [`FigmaClient`] is the HTTP
//! implementation; [`flatten`] turns a document tree into items and computes
//! their structural content hashes.
//!
//! Exported bytes pass through a [`ContentProcessor`] before they are written.

pub mod error;
pub mod figma;
pub mod flatten;
mod http;
pub mod node;
pub mod processor;
pub mod source;

pub use error::{Error, Result};
pub use figma::FigmaClient;
pub use flatten::{FlattenOptions, content_hash, flatten, normalize_name};
pub use node::{Node, NodeKind};
pub use processor::{ContentProcessor, Passthrough, SvgOptions, SvgProcessor};
pub use source::{RemoteItem, RemoteSource};
