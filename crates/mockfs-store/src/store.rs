//! The path-indexed entry table
//!
//! [`EntryStore`] is the only owner of the path -> [`Entry`] table. Every
//! facade goes through its primitives (lookup, insert, remove, enumerate),
//! and every primitive normalizes its path argument first.
//!
//! Keys compare case-insensitively; the spelling used by the first insert
//! at a key is the one reported by enumeration.

use crate::entry::{Entry, FileData};
use crate::path;
use crate::{Error, Result};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Current directory of a store built without one.
pub const DEFAULT_CURRENT_DIRECTORY: &str = "/";

#[derive(Debug)]
struct Slot {
    /// Normalized path with its original casing
    path: String,
    entry: Entry,
}

#[derive(Debug)]
struct Table {
    /// Keyed by [`path::lookup_key`]
    entries: HashMap<String, Slot>,
    current_directory: String,
}

impl Table {
    fn get(&self, key: &str) -> Option<&Slot> {
        self.entries.get(key)
    }

    /// Fail if the entry currently stored at `key` is read-only.
    fn guard_writable(&self, key: &str, requested: &str) -> Result<()> {
        match self.get(key) {
            Some(slot) if slot.entry.is_read_only() => {
                tracing::warn!(path = requested, "Write to read-only entry denied");
                Err(Error::access_denied(requested))
            }
            _ => Ok(()),
        }
    }

    /// Ancestors of `normalized` that are not stored yet, as (key, path)
    /// pairs. Fails with [`Error::NotADirectory`] when one is a file.
    fn missing_ancestors(&self, normalized: &str) -> Result<Vec<(String, String)>> {
        let mut missing = Vec::new();
        for ancestor in path::ancestors(normalized) {
            let ancestor_key = ancestor.to_lowercase();
            match self.get(&ancestor_key) {
                Some(slot) if slot.entry.is_file() => {
                    return Err(Error::NotADirectory {
                        path: slot.path.clone(),
                    });
                }
                Some(_) => {}
                None => missing.push((ancestor_key, ancestor)),
            }
        }
        Ok(missing)
    }

    fn create_ancestors(&mut self, missing: Vec<(String, String)>) {
        for (ancestor_key, ancestor) in missing {
            tracing::debug!(path = %ancestor, "Creating implicit parent directory");
            self.put(ancestor_key, ancestor, Entry::directory());
        }
    }

    /// Store `entry`, keeping the casing of any existing key.
    fn put(&mut self, key: String, normalized: String, entry: Entry) {
        match self.entries.get_mut(&key) {
            Some(slot) => slot.entry = entry,
            None => {
                self.entries.insert(
                    key,
                    Slot {
                        path: normalized,
                        entry,
                    },
                );
            }
        }
    }
}

/// Key and normalized spelling of a path an entry can be written to.
///
/// The empty path and roots are rejected with [`Error::InvalidPath`].
fn write_target(path: &str) -> Result<(String, String)> {
    let normalized = path::normalize(path);
    if normalized.is_empty() || path::is_root(&normalized) {
        return Err(Error::InvalidPath {
            path: path.to_string(),
        });
    }
    Ok((normalized.to_lowercase(), normalized))
}

/// In-memory table of file and directory entries.
///
/// All reads and writes are serialized behind one lock, so a store can be
/// shared between threads through an `Arc`.
#[derive(Debug)]
pub struct EntryStore {
    table: Mutex<Table>,
}

impl EntryStore {
    /// Create an empty store whose current directory is
    /// [`DEFAULT_CURRENT_DIRECTORY`].
    pub fn new() -> Self {
        Self::with_current_directory(DEFAULT_CURRENT_DIRECTORY)
    }

    /// Create an empty store with the given current directory.
    pub fn with_current_directory(current_directory: &str) -> Self {
        let current_directory = match path::normalize(current_directory) {
            dir if dir.is_empty() => DEFAULT_CURRENT_DIRECTORY.to_string(),
            dir => dir,
        };
        Self {
            table: Mutex::new(Table {
                entries: HashMap::new(),
                current_directory,
            }),
        }
    }

    /// Create a store pre-populated with `entries`.
    ///
    /// Relative seed paths resolve against the current directory. Each
    /// entry goes through [`EntryStore::insert`], so seed data gets the
    /// same ancestor creation and read-only checks as runtime writes.
    pub fn with_entries<I, P>(entries: I, current_directory: Option<&str>) -> Result<Self>
    where
        I: IntoIterator<Item = (P, Entry)>,
        P: AsRef<str>,
    {
        let store = Self::with_current_directory(
            current_directory.unwrap_or(DEFAULT_CURRENT_DIRECTORY),
        );
        for (path, entry) in entries {
            store.insert(&store.resolve(path.as_ref()), entry)?;
        }
        Ok(store)
    }

    fn table(&self) -> MutexGuard<'_, Table> {
        // Mutations validate before writing, so a poisoned table is still consistent
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Canonical spelling of `path`. See [`path::normalize`].
    pub fn normalize(&self, path: &str) -> String {
        path::normalize(path)
    }

    pub fn current_directory(&self) -> String {
        self.table().current_directory.clone()
    }

    /// Change the directory relative paths resolve against.
    ///
    /// The directory does not have to exist.
    pub fn set_current_directory(&self, dir: &str) {
        let resolved = self.resolve(dir);
        if resolved.is_empty() {
            return;
        }
        let mut table = self.table();
        tracing::debug!(
            from = %table.current_directory,
            to = %resolved,
            "Changing current directory"
        );
        table.current_directory = resolved;
    }

    /// Make `path` absolute against the current directory and normalize it.
    ///
    /// The empty path stays empty.
    pub fn resolve(&self, path: &str) -> String {
        if path.is_empty() {
            return String::new();
        }
        if path::is_rooted(path) {
            return path::normalize(path);
        }
        let current = self.current_directory();
        path::combine(&current, path)
    }

    /// The entry at `path`, if any.
    pub fn lookup(&self, path: &str) -> Option<Entry> {
        if path.is_empty() {
            return None;
        }
        let key = path::lookup_key(path);
        self.table().get(&key).map(|slot| slot.entry.clone())
    }

    /// The entry at `path`, or the null-object file when absent.
    pub fn lookup_or_placeholder(&self, path: &str) -> Entry {
        self.lookup(path)
            .unwrap_or_else(|| Entry::File(FileData::null_object()))
    }

    /// The stored spelling of `path`, if an entry exists there.
    pub fn stored_path(&self, path: &str) -> Option<String> {
        if path.is_empty() {
            return None;
        }
        let key = path::lookup_key(path);
        self.table().get(&key).map(|slot| slot.path.clone())
    }

    /// Whether an entry exists at `path`. The empty path never exists.
    pub fn exists(&self, path: &str) -> bool {
        if path.is_empty() {
            return false;
        }
        let key = path::lookup_key(path);
        self.table().entries.contains_key(&key)
    }

    /// Write `entry` at `path`, creating every missing ancestor directory.
    ///
    /// Fails with [`Error::AccessDenied`] when the entry already stored at
    /// `path` is read-only; the flags of `entry` itself are not consulted.
    /// Fails with [`Error::NotADirectory`] when an ancestor is a file. On
    /// failure the table is unchanged.
    pub fn insert(&self, path: &str, entry: Entry) -> Result<()> {
        if entry.is_directory() && path::is_root(path) {
            // Roots are implicit
            return Ok(());
        }
        self.write_with(path, |_| Ok(entry))
    }

    /// Replace the entry at `path` with the one `build` returns.
    ///
    /// `build` sees the entry currently stored at `path` and runs under the
    /// table lock, after the read-only guard and the ancestor check, so a
    /// read-modify-write through it cannot interleave with other writers.
    /// An error from `build` is returned as is and leaves the table
    /// unchanged. Missing ancestors are created as for
    /// [`EntryStore::insert`].
    pub fn write_with(
        &self,
        path: &str,
        build: impl FnOnce(Option<&Entry>) -> Result<Entry>,
    ) -> Result<()> {
        let (key, normalized) = write_target(path)?;

        let mut table = self.table();
        table.guard_writable(&key, path)?;
        let missing = table.missing_ancestors(&normalized)?;
        let entry = build(table.get(&key).map(|slot| &slot.entry))?;

        table.create_ancestors(missing);
        tracing::debug!(path = %normalized, is_directory = entry.is_directory(), "Writing entry");
        table.put(key, normalized, entry);
        Ok(())
    }

    /// Store an empty directory at `path`.
    ///
    /// Unlike [`EntryStore::insert`], missing ancestors are not created;
    /// callers that need a chain create each level themselves.
    pub fn insert_directory(&self, path: &str) -> Result<()> {
        let normalized = path::normalize(path);
        if normalized.is_empty() {
            return Err(Error::InvalidPath {
                path: path.to_string(),
            });
        }
        if path::is_root(&normalized) {
            return Ok(());
        }

        let key = normalized.to_lowercase();
        let mut table = self.table();
        table.guard_writable(&key, path)?;

        tracing::debug!(path = %normalized, "Inserting directory");
        table.put(key, normalized, Entry::directory());
        Ok(())
    }

    /// Store an empty directory at `path` unless a directory is already
    /// there. Returns whether one was created.
    ///
    /// The check and the insert happen under one lock. Ancestors are not
    /// created, as with [`EntryStore::insert_directory`]. Fails with
    /// [`Error::NotADirectory`] when a file occupies `path`.
    pub fn ensure_directory(&self, path: &str) -> Result<bool> {
        let normalized = path::normalize(path);
        if normalized.is_empty() {
            return Err(Error::InvalidPath {
                path: path.to_string(),
            });
        }
        if path::is_root(&normalized) {
            return Ok(false);
        }

        let key = normalized.to_lowercase();
        let mut table = self.table();
        match table.get(&key) {
            Some(slot) if slot.entry.is_directory() => Ok(false),
            Some(slot) => Err(Error::NotADirectory {
                path: slot.path.clone(),
            }),
            None => {
                tracing::debug!(path = %normalized, "Inserting directory");
                table.put(key, normalized, Entry::directory());
                Ok(true)
            }
        }
    }

    /// Copy the entry at `source` to `destination` under one lock.
    ///
    /// `check` sees the source and destination entries and may veto the
    /// transfer; a missing source is [`Error::NotFound`] once `check` has
    /// passed. The destination gets the read-only guard and ancestor
    /// creation of [`EntryStore::insert`]. With `remove_source` the source
    /// is removed afterwards, making this a move. Transferring an entry
    /// onto itself changes nothing.
    pub fn transfer(
        &self,
        source: &str,
        destination: &str,
        remove_source: bool,
        check: impl FnOnce(Option<&Entry>, Option<&Entry>) -> Result<()>,
    ) -> Result<()> {
        let source_key = path::lookup_key(source);
        let (key, normalized) = write_target(destination)?;

        let mut table = self.table();
        let entry = table.get(&source_key).map(|slot| slot.entry.clone());
        check(entry.as_ref(), table.get(&key).map(|slot| &slot.entry))?;
        let entry = entry.ok_or_else(|| Error::not_found(source))?;
        if source_key == key {
            return Ok(());
        }

        table.guard_writable(&key, destination)?;
        let missing = table.missing_ancestors(&normalized)?;
        table.create_ancestors(missing);
        tracing::debug!(from = source, to = %normalized, remove_source, "Transferring entry");
        table.put(key, normalized, entry);
        if remove_source {
            table.entries.remove(&source_key);
        }
        Ok(())
    }

    /// Remove the entry at `path`, returning it. Absent paths are a no-op.
    ///
    /// Only the entry itself is removed, not anything stored below it.
    pub fn remove(&self, path: &str) -> Option<Entry> {
        if path.is_empty() {
            return None;
        }
        let key = path::lookup_key(path);
        let removed = self.table().entries.remove(&key);
        if let Some(slot) = &removed {
            tracing::debug!(path = %slot.path, "Removed entry");
        }
        removed.map(|slot| slot.entry)
    }

    /// Remove the entry at `path` and everything stored below it.
    ///
    /// `check` sees the entry and the number of entries below it, and may
    /// veto the removal. Unlike [`EntryStore::remove`] this honours the
    /// read-only flag: nothing is removed when any affected entry is
    /// read-only. The whole operation runs under one lock. Returns the
    /// number of entries removed, zero when nothing is stored at `path`.
    pub fn remove_with(
        &self,
        path: &str,
        check: impl FnOnce(Option<&Entry>, usize) -> Result<()>,
    ) -> Result<usize> {
        let normalized = path::normalize(path);
        let key = normalized.to_lowercase();

        let mut table = self.table();
        let below: Vec<String> = table
            .entries
            .iter()
            .filter(|(_, slot)| path::is_within(&slot.path, &normalized))
            .map(|(below_key, _)| below_key.clone())
            .collect();
        check(table.get(&key).map(|slot| &slot.entry), below.len())?;
        if table.get(&key).is_none() {
            return Ok(0);
        }

        let doomed: Vec<String> = below.into_iter().chain([key]).collect();
        if let Some(locked) = doomed
            .iter()
            .filter_map(|doomed_key| table.get(doomed_key))
            .find(|slot| slot.entry.is_read_only())
        {
            tracing::warn!(path = %locked.path, "Removal of read-only entry denied");
            return Err(Error::access_denied(locked.path.clone()));
        }

        for doomed_key in &doomed {
            table.entries.remove(doomed_key);
        }
        tracing::debug!(path = %normalized, removed = doomed.len(), "Removed entry tree");
        Ok(doomed.len())
    }

    /// Apply `f` to the entry at `path` in place, under the table lock.
    ///
    /// Returns `None` when nothing is stored at `path`. This bypasses the
    /// read-only guard; it exists for metadata changes such as clearing
    /// the read-only flag itself.
    pub fn update<R>(&self, path: &str, f: impl FnOnce(&mut Entry) -> R) -> Option<R> {
        if path.is_empty() {
            return None;
        }
        let key = path::lookup_key(path);
        let mut table = self.table();
        table.entries.get_mut(&key).map(|slot| f(&mut slot.entry))
    }

    /// Every stored path.
    pub fn paths(&self) -> Vec<String> {
        self.collect_paths(|_| true)
    }

    /// Every path whose entry is a file.
    pub fn files(&self) -> Vec<String> {
        self.collect_paths(Entry::is_file)
    }

    /// Every path whose entry is a directory.
    pub fn directories(&self) -> Vec<String> {
        self.collect_paths(Entry::is_directory)
    }

    fn collect_paths(&self, keep: impl Fn(&Entry) -> bool) -> Vec<String> {
        self.table()
            .entries
            .values()
            .filter(|slot| keep(&slot.entry))
            .map(|slot| slot.path.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.table().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table().entries.is_empty()
    }
}

impl Default for EntryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        let store = EntryStore::new();
        store.insert("/Foo/Bar.txt", Entry::file("x")).unwrap();
        assert!(store.lookup("/foo/bar.TXT").is_some());
        assert_eq!(store.stored_path("/FOO/BAR.TXT").as_deref(), Some("/Foo/Bar.txt"));
    }

    #[test]
    fn overwrite_keeps_first_spelling() {
        let store = EntryStore::new();
        store.insert("/Data.bin", Entry::file("a")).unwrap();
        store.insert("/DATA.BIN", Entry::file("b")).unwrap();
        assert_eq!(store.files(), vec!["/Data.bin"]);
    }

    #[test]
    fn placeholder_for_absent_path() {
        let store = EntryStore::new();
        assert_eq!(
            store.lookup_or_placeholder("/missing"),
            Entry::File(FileData::null_object())
        );
        assert!(store.is_empty());
    }

    #[test]
    fn insert_under_file_is_rejected() {
        let store = EntryStore::new();
        store.insert("/a", Entry::file("x")).unwrap();
        let err = store.insert("/a/b.txt", Entry::file("y")).unwrap_err();
        assert!(matches!(err, Error::NotADirectory { ref path } if path == "/a"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn resolve_uses_current_directory() {
        let store = EntryStore::with_current_directory("C:\\Foo\\Bar");
        assert_eq!(store.resolve("baz.txt"), "C:/Foo/Bar/baz.txt");
        assert_eq!(store.resolve("..\\qux"), "C:/Foo/qux");
        assert_eq!(store.resolve("/abs"), "/abs");
        assert_eq!(store.resolve(""), "");
    }

    #[test]
    fn roots_are_implicit() {
        let store = EntryStore::new();
        store.insert_directory("/").unwrap();
        store.insert("C:\\", Entry::directory()).unwrap();
        assert!(store.is_empty());
        assert!(store.insert("/", Entry::file("x")).is_err());
    }

    #[test]
    fn update_bypasses_read_only_guard() {
        let store = EntryStore::new();
        store.insert("/r.txt", Entry::file(FileData::from_text("x").read_only())).unwrap();
        let cleared = store.update("/R.TXT", |entry| {
            let mut attrs = entry.attributes();
            attrs.remove(crate::FileAttributes::READ_ONLY);
            entry.set_attributes(attrs);
        });
        assert!(cleared.is_some());
        assert!(store.insert("/r.txt", Entry::file("y")).is_ok());
    }
}
