//! Directory tree operations and the current directory

use crate::pattern::SearchPattern;
use mockfs_store::{Entry, EntryStore, Error, Result, path};
use std::sync::Arc;

/// Which entries a listing returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Listing {
    Files,
    Directories,
    All,
}

/// Directory operations backed by an [`EntryStore`].
///
/// Directory creation goes through [`EntryStore::ensure_directory`] once
/// per level, since that primitive does not create ancestors itself.
#[derive(Debug, Clone)]
pub struct MockDirectory {
    store: Arc<EntryStore>,
}

impl MockDirectory {
    pub fn new(store: Arc<EntryStore>) -> Self {
        Self { store }
    }

    /// Whether `path` is a directory. Roots always exist.
    pub fn exists(&self, path: &str) -> bool {
        let resolved = self.store.resolve(path);
        if resolved.is_empty() {
            return false;
        }
        path::is_root(&resolved)
            || self
                .store
                .lookup(&resolved)
                .is_some_and(|entry| entry.is_directory())
    }

    /// Create `path` and every missing directory above it.
    ///
    /// Existing directories along the way are left untouched. Fails with
    /// [`Error::NotADirectory`] if any level is a file.
    pub fn create_directory(&self, path: &str) -> Result<()> {
        let resolved = self.store.resolve(path);
        if resolved.is_empty() {
            return Err(Error::InvalidPath {
                path: path.to_string(),
            });
        }

        let mut levels = path::ancestors(&resolved);
        levels.push(resolved);
        for level in levels {
            if self.store.ensure_directory(&level)? {
                tracing::debug!(path = %level, "Created directory");
            }
        }
        Ok(())
    }

    /// Delete the directory at `path`.
    ///
    /// Without `recursive`, a directory with anything below it fails with
    /// [`Error::NotEmpty`]. Nothing is removed if any affected entry is
    /// read-only. Roots cannot be deleted and fail with
    /// [`Error::InvalidPath`].
    pub fn delete(&self, path: &str, recursive: bool) -> Result<()> {
        let resolved = self.store.resolve(path);
        if path::is_root(&resolved) {
            tracing::warn!(path = %resolved, "Refusing to delete a root");
            return Err(Error::InvalidPath {
                path: path.to_string(),
            });
        }

        let removed = self.store.remove_with(&resolved, |entry, below| match entry {
            None => Err(Error::not_found(path)),
            Some(Entry::File(_)) => Err(Error::NotADirectory {
                path: path.to_string(),
            }),
            Some(Entry::Directory(_)) if below > 0 && !recursive => Err(Error::NotEmpty {
                path: path.to_string(),
            }),
            Some(Entry::Directory(_)) => Ok(()),
        })?;
        tracing::debug!(path = %resolved, removed, "Deleted directory");
        Ok(())
    }

    /// Files directly in `path` (or anywhere below it when `recursive`)
    /// whose name matches `pattern`, sorted.
    pub fn get_files(&self, path: &str, pattern: &str, recursive: bool) -> Result<Vec<String>> {
        self.list(path, pattern, recursive, Listing::Files)
    }

    pub fn get_directories(
        &self,
        path: &str,
        pattern: &str,
        recursive: bool,
    ) -> Result<Vec<String>> {
        self.list(path, pattern, recursive, Listing::Directories)
    }

    pub fn get_file_system_entries(
        &self,
        path: &str,
        pattern: &str,
        recursive: bool,
    ) -> Result<Vec<String>> {
        self.list(path, pattern, recursive, Listing::All)
    }

    fn list(
        &self,
        path: &str,
        pattern: &str,
        recursive: bool,
        listing: Listing,
    ) -> Result<Vec<String>> {
        let resolved = self.store.resolve(path);
        if !self.exists(&resolved) {
            return Err(Error::not_found(path));
        }
        let pattern = SearchPattern::new(pattern)?;
        let parent_key = path::lookup_key(&resolved);

        let candidates = match listing {
            Listing::Files => self.store.files(),
            Listing::Directories => self.store.directories(),
            Listing::All => self.store.paths(),
        };

        let mut found: Vec<String> = candidates
            .into_iter()
            .filter(|candidate| path::is_within(candidate, &resolved))
            .filter(|candidate| {
                recursive
                    || path::parent(candidate).is_some_and(|p| path::lookup_key(&p) == parent_key)
            })
            .filter(|candidate| pattern.matches(&path::file_name(candidate)))
            .collect();
        found.sort();
        Ok(found)
    }

    /// The directory containing `path`, or `None` at a root.
    pub fn get_parent(&self, path: &str) -> Option<String> {
        path::parent(&self.store.resolve(path))
    }

    /// The root of `path`, resolved against the current directory.
    pub fn get_directory_root(&self, path: &str) -> Option<String> {
        path::root(&self.store.resolve(path))
    }

    pub fn get_current_directory(&self) -> String {
        self.store.current_directory()
    }

    /// Change the current directory. The target does not have to exist.
    pub fn set_current_directory(&self, path: &str) {
        self.store.set_current_directory(path);
    }
}
