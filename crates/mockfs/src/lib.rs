//! In-memory filesystem substitute for deterministic tests
//!
//! [`MockFileSystem`] owns one [`EntryStore`] and hands out facades that
//! read and write it: [`MockFile`] for file content and metadata,
//! [`MockDirectory`] for directory trees and the current directory, and
//! the read-only [`MockFileInfo`] / [`MockDirectoryInfo`] views.
//!
//! ```
//! use mockfs::{FileData, MockFileSystem};
//!
//! let fs = MockFileSystem::new();
//! fs.add_file("/data/users.csv", FileData::from_text("id,name")).unwrap();
//!
//! assert!(fs.directory().exists("/data"));
//! assert_eq!(fs.file().read_all_text("/DATA/USERS.CSV").unwrap(), "id,name");
//! ```

pub mod directory;
pub mod file;
pub mod file_system;
pub mod info;
pub mod pattern;

pub use directory::MockDirectory;
pub use file::MockFile;
pub use file_system::MockFileSystem;
pub use info::{DirectoryInfoFactory, FileInfoFactory, MockDirectoryInfo, MockFileInfo};
pub use pattern::SearchPattern;

pub use mockfs_store::{
    DirectoryData, Entry, EntryStore, Error, FileAttributes, FileData, FileSeed, FixtureConfig,
    FixtureFormat, Result, TextEncoding, path,
};
