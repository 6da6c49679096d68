//! The filesystem aggregate handed to code under test

use crate::directory::MockDirectory;
use crate::file::MockFile;
use crate::info::{DirectoryInfoFactory, FileInfoFactory};
use mockfs_store::{Entry, EntryStore, FileData, FixtureConfig, Result};
use std::sync::Arc;

/// An in-memory filesystem.
///
/// Owns one [`EntryStore`] and the facades that share it. Cloning a
/// `MockFileSystem` shares the same store.
#[derive(Debug, Clone)]
pub struct MockFileSystem {
    store: Arc<EntryStore>,
    file: MockFile,
    directory: MockDirectory,
    file_info: FileInfoFactory,
    directory_info: DirectoryInfoFactory,
}

impl MockFileSystem {
    /// An empty filesystem whose current directory is `/`.
    pub fn new() -> Self {
        Self::from_store(Arc::new(EntryStore::new()))
    }

    /// A filesystem seeded with `files`, each added through the normal
    /// insert path.
    pub fn with_files<I, P>(files: I, current_directory: Option<&str>) -> Result<Self>
    where
        I: IntoIterator<Item = (P, FileData)>,
        P: AsRef<str>,
    {
        Self::with_entries(
            files.into_iter().map(|(path, data)| (path, Entry::File(data))),
            current_directory,
        )
    }

    /// Like [`MockFileSystem::with_files`], but seeds may also be
    /// directories.
    pub fn with_entries<I, P>(entries: I, current_directory: Option<&str>) -> Result<Self>
    where
        I: IntoIterator<Item = (P, Entry)>,
        P: AsRef<str>,
    {
        let store = EntryStore::with_entries(entries, current_directory)?;
        Ok(Self::from_store(Arc::new(store)))
    }

    /// A filesystem holding the tree described by a fixture.
    pub fn from_fixture(fixture: &FixtureConfig) -> Result<Self> {
        Ok(Self::from_store(Arc::new(fixture.build_store()?)))
    }

    /// Wrap an existing store.
    pub fn from_store(store: Arc<EntryStore>) -> Self {
        Self {
            file: MockFile::new(Arc::clone(&store)),
            directory: MockDirectory::new(Arc::clone(&store)),
            file_info: FileInfoFactory::new(Arc::clone(&store)),
            directory_info: DirectoryInfoFactory::new(Arc::clone(&store)),
            store,
        }
    }

    pub fn file(&self) -> &MockFile {
        &self.file
    }

    pub fn directory(&self) -> &MockDirectory {
        &self.directory
    }

    pub fn file_info(&self) -> &FileInfoFactory {
        &self.file_info
    }

    pub fn directory_info(&self) -> &DirectoryInfoFactory {
        &self.directory_info
    }

    pub fn store(&self) -> &Arc<EntryStore> {
        &self.store
    }

    /// Store `data` at `path`, creating parent directories.
    pub fn add_file(&self, path: &str, data: impl Into<FileData>) -> Result<()> {
        self.store
            .insert(&self.store.resolve(path), Entry::File(data.into()))
    }

    /// Store an empty directory at `path`. Parents are not created.
    pub fn add_directory(&self, path: &str) -> Result<()> {
        self.store.insert_directory(&self.store.resolve(path))
    }

    /// The file stored at `path`; `None` if absent or a directory.
    pub fn get_file(&self, path: &str) -> Option<FileData> {
        self.get_entry(path).and_then(Entry::into_file)
    }

    /// The file stored at `path`, or the null-object file.
    pub fn get_file_or_placeholder(&self, path: &str) -> FileData {
        self.get_file(path).unwrap_or_else(FileData::null_object)
    }

    pub fn get_entry(&self, path: &str) -> Option<Entry> {
        self.store.lookup(&self.store.resolve(path))
    }

    /// Remove whatever is stored at `path`. Missing paths are ignored.
    pub fn remove_file(&self, path: &str) {
        self.store.remove(&self.store.resolve(path));
    }

    /// Whether anything, file or directory, is stored at `path`.
    pub fn file_exists(&self, path: &str) -> bool {
        self.store.exists(&self.store.resolve(path))
    }

    pub fn all_paths(&self) -> Vec<String> {
        self.store.paths()
    }

    pub fn all_files(&self) -> Vec<String> {
        self.store.files()
    }

    pub fn all_directories(&self) -> Vec<String> {
        self.store.directories()
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}
