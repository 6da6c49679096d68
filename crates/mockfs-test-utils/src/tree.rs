//! [`TestTree`] builder for mockfs test scenarios.

use mockfs::{FileData, MockFileSystem};
use mockfs_store::FixtureConfig;
use std::fs;
use tempfile::TempDir;

/// A seeded in-memory filesystem with assertion helpers.
///
/// # Example
///
/// ```rust
/// use mockfs_test_utils::TestTree;
///
/// let tree = TestTree::new()
///     .file("/data/users.csv", "id,name")
///     .directory("/empty");
/// tree.assert_file_contains("/DATA/USERS.CSV", "id");
/// tree.assert_directory_exists("/empty");
/// ```
pub struct TestTree {
    fs: MockFileSystem,
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTree {
    /// An empty tree rooted at `/`.
    pub fn new() -> Self {
        Self {
            fs: MockFileSystem::new(),
        }
    }

    /// Load a tree from fixture text by writing it to a temporary file
    /// named `fixture.<extension>` and going through [`FixtureConfig::load`].
    pub fn from_fixture_text(extension: &str, content: &str) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join(format!("fixture.{extension}"));
        fs::write(&file, content).unwrap();

        let config = FixtureConfig::load(&file)
            .unwrap_or_else(|e| panic!("TestTree: fixture {} did not load: {e}", file.display()));
        let fs = MockFileSystem::from_fixture(&config)
            .unwrap_or_else(|e| panic!("TestTree: fixture did not build: {e}"));
        Self { fs }
    }

    /// Add a file, creating its parents.
    pub fn file(self, path: &str, data: impl Into<FileData>) -> Self {
        self.fs
            .add_file(path, data)
            .unwrap_or_else(|e| panic!("TestTree::file({path}): {e}"));
        self
    }

    /// Add a directory and every missing parent.
    pub fn directory(self, path: &str) -> Self {
        self.fs
            .directory()
            .create_directory(path)
            .unwrap_or_else(|e| panic!("TestTree::directory({path}): {e}"));
        self
    }

    pub fn fs(&self) -> &MockFileSystem {
        &self.fs
    }

    pub fn into_fs(self) -> MockFileSystem {
        self.fs
    }

    /// # Panics
    /// Panics if no file is stored at `path`.
    pub fn assert_file_exists(&self, path: &str) {
        assert!(self.fs.file().exists(path), "Expected file to exist: {path}");
    }

    /// # Panics
    /// Panics if anything is stored at `path`.
    pub fn assert_not_exists(&self, path: &str) {
        assert!(!self.fs.file_exists(path), "Expected nothing at: {path}");
    }

    /// # Panics
    /// Panics if `path` is not a directory.
    pub fn assert_directory_exists(&self, path: &str) {
        assert!(
            self.fs.directory().exists(path),
            "Expected directory to exist: {path}"
        );
    }

    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, path: &str, content: &str) {
        let text = self
            .fs
            .file()
            .read_all_text(path)
            .unwrap_or_else(|e| panic!("Could not read file {path}: {e}"));
        assert!(
            text.contains(content),
            "File {path} does not contain expected content.\nExpected: {content}\nActual: {text}"
        );
    }
}
