//! Read-only metadata views of files and directories
//!
//! A view captures the entry at construction time. Call `refresh` to
//! re-read it from the store.

use crate::directory::MockDirectory;
use chrono::{DateTime, Utc};
use mockfs_store::{Entry, EntryStore, Error, FileAttributes, FileData, Result, path};
use std::sync::Arc;

/// Builds [`MockFileInfo`] views.
#[derive(Debug, Clone)]
pub struct FileInfoFactory {
    store: Arc<EntryStore>,
}

impl FileInfoFactory {
    pub fn new(store: Arc<EntryStore>) -> Self {
        Self { store }
    }

    pub fn from_file_name(&self, file_name: &str) -> MockFileInfo {
        MockFileInfo::new(Arc::clone(&self.store), file_name)
    }
}

/// Builds [`MockDirectoryInfo`] views.
#[derive(Debug, Clone)]
pub struct DirectoryInfoFactory {
    store: Arc<EntryStore>,
}

impl DirectoryInfoFactory {
    pub fn new(store: Arc<EntryStore>) -> Self {
        Self { store }
    }

    pub fn from_directory_name(&self, directory_name: &str) -> MockDirectoryInfo {
        MockDirectoryInfo::new(Arc::clone(&self.store), directory_name)
    }
}

/// Snapshot of a file's metadata.
///
/// For a missing path (or a path holding a directory) the view reports
/// `exists() == false` and the null-object file's metadata.
#[derive(Debug, Clone)]
pub struct MockFileInfo {
    store: Arc<EntryStore>,
    full_name: String,
    exists: bool,
    data: FileData,
}

impl MockFileInfo {
    fn new(store: Arc<EntryStore>, file_name: &str) -> Self {
        let full_name = store.resolve(file_name);
        let mut info = Self {
            store,
            full_name,
            exists: false,
            data: FileData::null_object(),
        };
        info.refresh();
        info
    }

    /// Re-read the entry from the store.
    pub fn refresh(&mut self) {
        if let Some(stored) = self.store.stored_path(&self.full_name) {
            self.full_name = stored;
        }
        match self.store.lookup_or_placeholder(&self.full_name) {
            Entry::File(data) => {
                self.exists = self.store.exists(&self.full_name);
                self.data = data;
            }
            Entry::Directory(_) => {
                self.exists = false;
                self.data = FileData::null_object();
            }
        }
    }

    pub fn exists(&self) -> bool {
        self.exists
    }

    /// Absolute normalized path, in the stored casing when the file exists.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn name(&self) -> String {
        path::file_name(&self.full_name)
    }

    pub fn extension(&self) -> Option<String> {
        path::extension(&self.full_name)
    }

    pub fn directory_name(&self) -> Option<String> {
        path::parent(&self.full_name)
    }

    /// View of the containing directory.
    pub fn directory(&self) -> Option<MockDirectoryInfo> {
        self.directory_name()
            .map(|dir| MockDirectoryInfo::new(Arc::clone(&self.store), &dir))
    }

    /// Size in bytes. Fails with [`Error::NotFound`] for a missing file.
    pub fn length(&self) -> Result<u64> {
        if !self.exists {
            return Err(Error::not_found(&self.full_name));
        }
        Ok(self.data.len() as u64)
    }

    pub fn attributes(&self) -> FileAttributes {
        self.data.attributes()
    }

    pub fn is_read_only(&self) -> bool {
        self.data.is_read_only()
    }

    pub fn creation_time(&self) -> DateTime<Utc> {
        self.data.created()
    }

    pub fn last_write_time(&self) -> DateTime<Utc> {
        self.data.last_written()
    }

    pub fn last_access_time(&self) -> DateTime<Utc> {
        self.data.last_accessed()
    }
}

/// Snapshot of a directory's metadata.
#[derive(Debug, Clone)]
pub struct MockDirectoryInfo {
    store: Arc<EntryStore>,
    full_name: String,
    entry: Option<Entry>,
}

impl MockDirectoryInfo {
    fn new(store: Arc<EntryStore>, directory_name: &str) -> Self {
        let full_name = store.resolve(directory_name);
        let mut info = Self {
            store,
            full_name,
            entry: None,
        };
        info.refresh();
        info
    }

    pub fn refresh(&mut self) {
        if let Some(stored) = self.store.stored_path(&self.full_name) {
            self.full_name = stored;
        }
        self.entry = self
            .store
            .lookup(&self.full_name)
            .filter(|entry| entry.is_directory());
    }

    /// Whether the directory exists. Roots always exist.
    pub fn exists(&self) -> bool {
        self.entry.is_some() || path::is_root(&self.full_name)
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Last path segment; the root itself for a root.
    pub fn name(&self) -> String {
        match path::file_name(&self.full_name) {
            name if name.is_empty() => self.full_name.clone(),
            name => name,
        }
    }

    pub fn parent(&self) -> Option<MockDirectoryInfo> {
        path::parent(&self.full_name).map(|dir| Self::new(Arc::clone(&self.store), &dir))
    }

    pub fn root(&self) -> Option<MockDirectoryInfo> {
        path::root(&self.full_name).map(|dir| Self::new(Arc::clone(&self.store), &dir))
    }

    /// Attributes of the directory; `DIRECTORY` alone when it is not stored.
    pub fn attributes(&self) -> FileAttributes {
        self.entry
            .as_ref()
            .map_or(FileAttributes::DIRECTORY, Entry::attributes)
    }

    pub fn creation_time(&self) -> Option<DateTime<Utc>> {
        self.entry.as_ref().map(Entry::created)
    }

    pub fn last_write_time(&self) -> Option<DateTime<Utc>> {
        self.entry.as_ref().map(Entry::last_written)
    }

    /// Paths of files directly in this directory matching `pattern`.
    pub fn get_files(&self, pattern: &str) -> Result<Vec<String>> {
        MockDirectory::new(Arc::clone(&self.store)).get_files(&self.full_name, pattern, false)
    }

    pub fn get_directories(&self, pattern: &str) -> Result<Vec<String>> {
        MockDirectory::new(Arc::clone(&self.store)).get_directories(&self.full_name, pattern, false)
    }
}
