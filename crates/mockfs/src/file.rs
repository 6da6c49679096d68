//! File content and metadata operations

use chrono::{DateTime, Utc};
use mockfs_store::{
    Entry, EntryStore, Error, FileAttributes, FileData, Result, TextEncoding, path,
};
use std::sync::Arc;

/// File operations backed by an [`EntryStore`].
///
/// Relative paths resolve against the store's current directory. Writes go
/// through [`EntryStore::insert`], so they create missing parent
/// directories and fail with [`Error::AccessDenied`] on read-only files.
#[derive(Debug, Clone)]
pub struct MockFile {
    store: Arc<EntryStore>,
}

impl MockFile {
    pub fn new(store: Arc<EntryStore>) -> Self {
        Self { store }
    }

    /// Whether a file (not a directory) exists at `path`.
    pub fn exists(&self, path: &str) -> bool {
        self.store
            .lookup(&self.store.resolve(path))
            .is_some_and(|entry| entry.is_file())
    }

    fn read(&self, path: &str) -> Result<FileData> {
        match self.store.lookup(&self.store.resolve(path)) {
            Some(Entry::File(data)) => Ok(data),
            Some(Entry::Directory(_)) => Err(Error::IsDirectory {
                path: path.to_string(),
            }),
            None => Err(Error::not_found(path)),
        }
    }

    pub fn read_all_bytes(&self, path: &str) -> Result<Vec<u8>> {
        Ok(self.read(path)?.contents().to_vec())
    }

    /// Read text using the encoding the file was written with.
    pub fn read_all_text(&self, path: &str) -> Result<String> {
        Ok(self.read(path)?.text_contents())
    }

    pub fn read_all_text_with_encoding(
        &self,
        path: &str,
        encoding: TextEncoding,
    ) -> Result<String> {
        Ok(encoding.decode(self.read(path)?.contents()))
    }

    pub fn read_all_lines(&self, path: &str) -> Result<Vec<String>> {
        Ok(self
            .read_all_text(path)?
            .lines()
            .map(str::to_string)
            .collect())
    }

    /// Replace or create the file at `path` with the result of `build`.
    ///
    /// `build` receives the current file, if one exists. It runs under the
    /// store lock, so concurrent read-modify-writes of one file serialize.
    fn write_with(
        &self,
        path: &str,
        build: impl FnOnce(Option<FileData>) -> FileData,
    ) -> Result<()> {
        self.store
            .write_with(&self.store.resolve(path), |existing| match existing {
                Some(Entry::Directory(_)) => Err(Error::IsDirectory {
                    path: path.to_string(),
                }),
                Some(Entry::File(data)) => Ok(Entry::File(build(Some(data.clone())))),
                None => Ok(Entry::File(build(None))),
            })
    }

    pub fn write_all_bytes(&self, path: &str, bytes: &[u8]) -> Result<()> {
        self.write_with(path, |existing| match existing {
            Some(mut data) => {
                data.set_contents(bytes);
                data
            }
            None => FileData::new(bytes),
        })
    }

    pub fn write_all_text(&self, path: &str, text: &str) -> Result<()> {
        self.write_all_text_with_encoding(path, text, TextEncoding::Utf8)
    }

    pub fn write_all_text_with_encoding(
        &self,
        path: &str,
        text: &str,
        encoding: TextEncoding,
    ) -> Result<()> {
        self.write_with(path, |existing| match existing {
            Some(mut data) => {
                data.set_text(text, encoding);
                data
            }
            None => FileData::from_text_with_encoding(text, encoding),
        })
    }

    pub fn write_all_lines<I, S>(&self, path: &str, lines: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut text = String::new();
        for line in lines {
            text.push_str(line.as_ref());
            text.push('\n');
        }
        self.write_all_text(path, &text)
    }

    /// Append text, encoded like the existing file. Creates the file when
    /// missing.
    pub fn append_all_text(&self, path: &str, text: &str) -> Result<()> {
        self.write_with(path, |existing| match existing {
            Some(mut data) => {
                let bytes = data.encoding().encode(text);
                data.append(&bytes);
                data
            }
            None => FileData::from_text(text),
        })
    }

    /// Delete the file at `path`. Deleting a missing file is not an error.
    pub fn delete(&self, path: &str) -> Result<()> {
        self.store
            .remove_with(&self.store.resolve(path), |entry, _| match entry {
                Some(Entry::Directory(_)) => Err(Error::IsDirectory {
                    path: path.to_string(),
                }),
                _ => Ok(()),
            })?;
        Ok(())
    }

    /// Copy `source` to `destination`. An existing destination file is
    /// replaced only when `overwrite` is set.
    pub fn copy(&self, source: &str, destination: &str, overwrite: bool) -> Result<()> {
        tracing::debug!(source, destination, "Copying file");
        self.store.transfer(
            &self.store.resolve(source),
            &self.store.resolve(destination),
            false,
            |from, to| check_transfer(source, from, destination, to, overwrite),
        )
    }

    /// Move `source` to `destination`, which must not exist. Moving a file
    /// onto itself changes nothing.
    pub fn move_to(&self, source: &str, destination: &str) -> Result<()> {
        let from_path = self.store.resolve(source);
        let to_path = self.store.resolve(destination);
        let onto_itself = path::paths_equal(&from_path, &to_path);

        tracing::debug!(source, destination, "Moving file");
        self.store.transfer(&from_path, &to_path, true, |from, to| {
            check_transfer(source, from, destination, to, onto_itself)
        })
    }

    /// Attributes of the file or directory at `path`.
    pub fn get_attributes(&self, path: &str) -> Result<FileAttributes> {
        self.store
            .lookup(&self.store.resolve(path))
            .map(|entry| entry.attributes())
            .ok_or_else(|| Error::not_found(path))
    }

    /// Replace the attributes of the entry at `path`.
    ///
    /// Works on read-only entries, which is how the read-only flag is
    /// cleared.
    pub fn set_attributes(&self, path: &str, attributes: FileAttributes) -> Result<()> {
        self.store
            .update(&self.store.resolve(path), |entry| entry.set_attributes(attributes))
            .ok_or_else(|| Error::not_found(path))
    }

    pub fn get_creation_time(&self, path: &str) -> Result<DateTime<Utc>> {
        Ok(self.read(path)?.created())
    }

    pub fn get_last_write_time(&self, path: &str) -> Result<DateTime<Utc>> {
        Ok(self.read(path)?.last_written())
    }

    pub fn get_last_access_time(&self, path: &str) -> Result<DateTime<Utc>> {
        Ok(self.read(path)?.last_accessed())
    }

    pub fn set_creation_time(&self, path: &str, at: DateTime<Utc>) -> Result<()> {
        self.update_file(path, |data| data.set_created(at))
    }

    pub fn set_last_write_time(&self, path: &str, at: DateTime<Utc>) -> Result<()> {
        self.update_file(path, |data| data.set_last_written(at))
    }

    pub fn set_last_access_time(&self, path: &str, at: DateTime<Utc>) -> Result<()> {
        self.update_file(path, |data| data.set_last_accessed(at))
    }

    fn update_file(&self, path: &str, f: impl FnOnce(&mut FileData)) -> Result<()> {
        let outcome = self
            .store
            .update(&self.store.resolve(path), |entry| match entry.as_file_mut() {
                Some(data) => {
                    f(data);
                    true
                }
                None => false,
            });
        match outcome {
            Some(true) => Ok(()),
            Some(false) => Err(Error::IsDirectory {
                path: path.to_string(),
            }),
            None => Err(Error::not_found(path)),
        }
    }
}

/// Veto a copy or move unless `from` is a file and `to` is free, or is a
/// file that may be overwritten.
fn check_transfer(
    source: &str,
    from: Option<&Entry>,
    destination: &str,
    to: Option<&Entry>,
    overwrite: bool,
) -> Result<()> {
    match from {
        None => return Err(Error::not_found(source)),
        Some(Entry::Directory(_)) => {
            return Err(Error::IsDirectory {
                path: source.to_string(),
            });
        }
        Some(Entry::File(_)) => {}
    }
    match to {
        Some(Entry::Directory(_)) => Err(Error::IsDirectory {
            path: destination.to_string(),
        }),
        Some(Entry::File(_)) if !overwrite => Err(Error::AlreadyExists {
            path: destination.to_string(),
        }),
        _ => Ok(()),
    }
}
