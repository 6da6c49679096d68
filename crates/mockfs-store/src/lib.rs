//! Entry store for the mockfs in-memory filesystem
//!
//! Provides the path-indexed table of file and directory entries, path
//! normalization, and fixture seeding.

pub mod entry;
pub mod error;
pub mod fixture;
pub mod path;
pub mod store;

pub use entry::{DirectoryData, Entry, FileAttributes, FileData, TextEncoding};
pub use error::{Error, Result};
pub use fixture::{FileSeed, FixtureConfig, FixtureFormat};
pub use store::{DEFAULT_CURRENT_DIRECTORY, EntryStore};
