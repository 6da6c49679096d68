//! Shared test utilities for the mockfs workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`logging`]: idempotent tracing setup for test binaries
//! - [`tree`]: [`TestTree`] builder for seeded in-memory filesystems

pub mod logging;
pub mod tree;

pub use tree::TestTree;
