//! Shared test utilities for the iconsync workspace.
//!
//! This crate provides standardised test fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`remote`]: [`FakeRemote`], a scripted [`iconsync_remote::RemoteSource`]
//! - [`output`]: [`TestOutput`], a temporary output directory with assertions

pub mod output;
pub mod remote;

pub use output::TestOutput;
pub use remote::FakeRemote;
