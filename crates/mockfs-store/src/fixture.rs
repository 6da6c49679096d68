//! Fixture manifests for seeding a store
//!
//! A fixture describes the initial tree of a test filesystem. It can be
//! written in TOML, JSON or YAML; the format is detected from the file
//! extension when loading from disk.
//!
//! ```toml
//! current_directory = "/work"
//! directories = ["/work/empty"]
//!
//! [files."/work/readme.md"]
//! text = "hello"
//!
//! [files."/etc/locked.conf"]
//! text = "x=1"
//! read_only = true
//! ```

use crate::entry::{Entry, FileAttributes, FileData, TextEncoding};
use crate::store::EntryStore;
use crate::{Error, Result, path};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Serialization format of a fixture manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureFormat {
    Toml,
    Json,
    Yaml,
}

impl FixtureFormat {
    /// Detect the format from a file extension.
    pub fn from_extension(extension: &str) -> Result<Self> {
        match extension.to_lowercase().as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(Error::UnsupportedFormat {
                extension: extension.to_string(),
            }),
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Toml => "TOML",
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        }
    }
}

/// Initial content and flags of one seeded file.
///
/// `bytes` wins over `text` when both are given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSeed {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes: Option<Vec<u8>>,

    #[serde(default)]
    pub encoding: TextEncoding,

    #[serde(default)]
    pub read_only: bool,

    #[serde(default)]
    pub hidden: bool,
}

impl FileSeed {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn to_file_data(&self) -> FileData {
        let mut data = match (&self.bytes, &self.text) {
            (Some(bytes), _) => FileData::new(bytes.clone()),
            (None, Some(text)) => FileData::from_text_with_encoding(text, self.encoding),
            (None, None) => FileData::new(Vec::new()),
        };

        let mut attributes = data.attributes();
        if self.read_only {
            attributes.insert(FileAttributes::READ_ONLY);
        }
        if self.hidden {
            attributes.insert(FileAttributes::HIDDEN);
        }
        data.set_attributes(attributes);
        data
    }
}

/// Initial tree of a test filesystem.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureConfig {
    /// Directory relative paths resolve against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_directory: Option<String>,

    /// Directories to create, including their ancestors
    #[serde(default)]
    pub directories: Vec<String>,

    /// Files keyed by path; ancestors are created implicitly
    #[serde(default)]
    pub files: BTreeMap<String, FileSeed>,
}

impl FixtureConfig {
    /// Load a fixture from disk, detecting the format from the extension.
    pub fn load(file: impl AsRef<Path>) -> Result<Self> {
        let file = file.as_ref();
        let extension = file
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default();
        let format = FixtureFormat::from_extension(&extension)?;

        let content = std::fs::read_to_string(file).map_err(|e| Error::io(file, e))?;
        tracing::debug!(path = %file.display(), format = format.label(), "Loading fixture");
        Self::parse(&content, format, file.to_path_buf())
    }

    /// Parse a fixture held in memory.
    pub fn parse_str(content: &str, format: FixtureFormat) -> Result<Self> {
        Self::parse(content, format, PathBuf::from("<inline>"))
    }

    fn parse(content: &str, format: FixtureFormat, origin: PathBuf) -> Result<Self> {
        let parsed: std::result::Result<Self, String> = match format {
            FixtureFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
            FixtureFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            FixtureFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        };
        parsed.map_err(|message| Error::FixtureParse {
            path: origin,
            format: format.label().into(),
            message,
        })
    }

    /// Serialize the fixture in the given format.
    pub fn render(&self, format: FixtureFormat) -> Result<String> {
        let rendered = match format {
            FixtureFormat::Toml => toml::to_string_pretty(self).map_err(|e| e.to_string()),
            FixtureFormat::Json => serde_json::to_string_pretty(self).map_err(|e| e.to_string()),
            FixtureFormat::Yaml => serde_yaml::to_string(self).map_err(|e| e.to_string()),
        };
        rendered.map_err(|message| Error::FixtureSerialize {
            format: format.label().into(),
            message,
        })
    }

    pub fn with_current_directory(mut self, dir: impl Into<String>) -> Self {
        self.current_directory = Some(dir.into());
        self
    }

    pub fn with_directory(mut self, dir: impl Into<String>) -> Self {
        self.directories.push(dir.into());
        self
    }

    pub fn with_file(mut self, file: impl Into<String>, seed: FileSeed) -> Self {
        self.files.insert(file.into(), seed);
        self
    }

    /// Build a store holding this tree.
    ///
    /// Directories are created first, one level at a time; files follow in
    /// path order through the normal insert path.
    pub fn build_store(&self) -> Result<EntryStore> {
        let store = match &self.current_directory {
            Some(dir) => EntryStore::with_current_directory(dir),
            None => EntryStore::new(),
        };

        for dir in &self.directories {
            let resolved = store.resolve(dir);
            let mut chain = path::ancestors(&resolved);
            chain.push(resolved);
            for level in chain {
                store.ensure_directory(&level)?;
            }
        }

        for (file, seed) in &self.files {
            let resolved = store.resolve(file);
            store.insert(&resolved, Entry::File(seed.to_file_data()))?;
        }

        tracing::debug!(
            directories = self.directories.len(),
            files = self.files.len(),
            "Seeded store from fixture"
        );
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(FixtureFormat::from_extension("YML").unwrap(), FixtureFormat::Yaml);
        assert!(matches!(
            FixtureFormat::from_extension("ini"),
            Err(Error::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn seed_bytes_win_over_text() {
        let seed = FileSeed {
            text: Some("text".into()),
            bytes: Some(vec![1, 2, 3]),
            ..FileSeed::default()
        };
        assert_eq!(seed.to_file_data().contents(), &[1, 2, 3]);
    }

    #[test]
    fn seed_flags_become_attributes() {
        let seed = FileSeed {
            read_only: true,
            hidden: true,
            ..FileSeed::text("x")
        };
        let attrs = seed.to_file_data().attributes();
        assert!(attrs.contains(FileAttributes::READ_ONLY | FileAttributes::HIDDEN));
    }
}
