//! Stored entries: file data and directory markers

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

/// Seconds between 1601-01-01 and 1970-01-01.
const FILE_TIME_EPOCH_OFFSET_SECS: i64 = 11_644_473_600;

/// 1601-01-01T00:00:00Z, the zero value of a Windows file time.
///
/// Used for every timestamp of the null-object file.
pub fn file_time_epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH - TimeDelta::seconds(FILE_TIME_EPOCH_OFFSET_SECS)
}

/// Attribute flags carried by every entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileAttributes(u32);

impl FileAttributes {
    pub const READ_ONLY: Self = Self(0x0001);
    pub const HIDDEN: Self = Self(0x0002);
    pub const SYSTEM: Self = Self(0x0004);
    pub const DIRECTORY: Self = Self(0x0010);
    pub const ARCHIVE: Self = Self(0x0020);
    pub const NORMAL: Self = Self(0x0080);
    pub const TEMPORARY: Self = Self(0x0100);

    const NAMES: [(Self, &'static str); 7] = [
        (Self::READ_ONLY, "ReadOnly"),
        (Self::HIDDEN, "Hidden"),
        (Self::SYSTEM, "System"),
        (Self::DIRECTORY, "Directory"),
        (Self::ARCHIVE, "Archive"),
        (Self::NORMAL, "Normal"),
        (Self::TEMPORARY, "Temporary"),
    ];

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when every flag in `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }
}

impl BitOr for FileAttributes {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for FileAttributes {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for FileAttributes {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl fmt::Display for FileAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = Self::NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        if names.is_empty() {
            write!(f, "None")
        } else {
            write!(f, "{}", names.join(", "))
        }
    }
}

/// Encoding used to turn text into stored bytes and back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextEncoding {
    #[default]
    Utf8,
    Utf16Le,
    Utf16Be,
    Ascii,
    Latin1,
}

impl TextEncoding {
    /// Encode text. Characters the encoding cannot represent become `?`.
    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            Self::Utf8 => text.as_bytes().to_vec(),
            Self::Utf16Le => text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
            Self::Utf16Be => text.encode_utf16().flat_map(u16::to_be_bytes).collect(),
            Self::Ascii => text
                .chars()
                .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
                .collect(),
            Self::Latin1 => text
                .chars()
                .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
                .collect(),
        }
    }

    /// Decode bytes lossily.
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Self::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Self::Utf16Le => decode_utf16(bytes, u16::from_le_bytes),
            Self::Utf16Be => decode_utf16(bytes, u16::from_be_bytes),
            Self::Ascii => bytes
                .iter()
                .map(|&b| if b.is_ascii() { b as char } else { '?' })
                .collect(),
            Self::Latin1 => bytes.iter().map(|&b| b as char).collect(),
        }
    }
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> String {
    let units = bytes.chunks(2).map(|pair| match pair {
        [a, b] => unit([*a, *b]),
        _ => 0xFFFD,
    });
    char::decode_utf16(units)
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

/// Content and metadata of a stored file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileData {
    contents: Vec<u8>,
    encoding: TextEncoding,
    attributes: FileAttributes,
    created: DateTime<Utc>,
    last_accessed: DateTime<Utc>,
    last_written: DateTime<Utc>,
}

impl FileData {
    /// A new file holding `contents`, stamped with the current time.
    pub fn new(contents: impl Into<Vec<u8>>) -> Self {
        let now = Utc::now();
        Self {
            contents: contents.into(),
            encoding: TextEncoding::default(),
            attributes: FileAttributes::ARCHIVE,
            created: now,
            last_accessed: now,
            last_written: now,
        }
    }

    /// A new file holding UTF-8 text.
    pub fn from_text(text: &str) -> Self {
        Self::from_text_with_encoding(text, TextEncoding::Utf8)
    }

    pub fn from_text_with_encoding(text: &str, encoding: TextEncoding) -> Self {
        let mut data = Self::new(encoding.encode(text));
        data.encoding = encoding;
        data
    }

    /// The empty placeholder file returned for absent paths.
    pub fn null_object() -> Self {
        let epoch = file_time_epoch();
        Self {
            contents: Vec::new(),
            encoding: TextEncoding::default(),
            attributes: FileAttributes::empty(),
            created: epoch,
            last_accessed: epoch,
            last_written: epoch,
        }
    }

    /// Builder form: mark the file read-only.
    pub fn read_only(mut self) -> Self {
        self.attributes.insert(FileAttributes::READ_ONLY);
        self
    }

    /// Builder form: replace the attribute flags.
    pub fn with_attributes(mut self, attributes: FileAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn contents(&self) -> &[u8] {
        &self.contents
    }

    /// Contents decoded with the encoding the file was written with.
    pub fn text_contents(&self) -> String {
        self.encoding.decode(&self.contents)
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    pub fn attributes(&self) -> FileAttributes {
        self.attributes
    }

    pub fn set_attributes(&mut self, attributes: FileAttributes) {
        self.attributes = attributes;
    }

    pub fn is_read_only(&self) -> bool {
        self.attributes.contains(FileAttributes::READ_ONLY)
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn last_accessed(&self) -> DateTime<Utc> {
        self.last_accessed
    }

    pub fn last_written(&self) -> DateTime<Utc> {
        self.last_written
    }

    pub fn set_created(&mut self, at: DateTime<Utc>) {
        self.created = at;
    }

    pub fn set_last_accessed(&mut self, at: DateTime<Utc>) {
        self.last_accessed = at;
    }

    pub fn set_last_written(&mut self, at: DateTime<Utc>) {
        self.last_written = at;
    }

    /// Replace the contents and bump the write and access times.
    pub fn set_contents(&mut self, contents: impl Into<Vec<u8>>) {
        self.contents = contents.into();
        self.touch();
    }

    pub fn set_text(&mut self, text: &str, encoding: TextEncoding) {
        self.encoding = encoding;
        self.set_contents(encoding.encode(text));
    }

    pub fn append(&mut self, bytes: &[u8]) {
        self.contents.extend_from_slice(bytes);
        self.touch();
    }

    fn touch(&mut self) {
        let now = Utc::now();
        self.last_written = now;
        self.last_accessed = now;
    }
}

impl From<&str> for FileData {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

impl From<String> for FileData {
    fn from(text: String) -> Self {
        Self::from_text(&text)
    }
}

impl From<Vec<u8>> for FileData {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<&[u8]> for FileData {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes)
    }
}

/// Metadata of a stored directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryData {
    attributes: FileAttributes,
    created: DateTime<Utc>,
    last_written: DateTime<Utc>,
}

impl DirectoryData {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            attributes: FileAttributes::DIRECTORY,
            created: now,
            last_written: now,
        }
    }

    pub fn attributes(&self) -> FileAttributes {
        self.attributes
    }

    /// The `DIRECTORY` flag is always kept.
    pub fn set_attributes(&mut self, attributes: FileAttributes) {
        self.attributes = attributes | FileAttributes::DIRECTORY;
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn last_written(&self) -> DateTime<Utc> {
        self.last_written
    }

    pub fn set_last_written(&mut self, at: DateTime<Utc>) {
        self.last_written = at;
    }
}

impl Default for DirectoryData {
    fn default() -> Self {
        Self::new()
    }
}

/// A stored unit in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    File(FileData),
    Directory(DirectoryData),
}

impl Entry {
    pub fn file(data: impl Into<FileData>) -> Self {
        Self::File(data.into())
    }

    pub fn directory() -> Self {
        Self::Directory(DirectoryData::new())
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Self::File(_))
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, Self::Directory(_))
    }

    pub fn attributes(&self) -> FileAttributes {
        match self {
            Self::File(data) => data.attributes(),
            Self::Directory(data) => data.attributes(),
        }
    }

    pub fn set_attributes(&mut self, attributes: FileAttributes) {
        match self {
            Self::File(data) => data.set_attributes(attributes),
            Self::Directory(data) => data.set_attributes(attributes),
        }
    }

    pub fn is_read_only(&self) -> bool {
        self.attributes().contains(FileAttributes::READ_ONLY)
    }

    pub fn created(&self) -> DateTime<Utc> {
        match self {
            Self::File(data) => data.created(),
            Self::Directory(data) => data.created(),
        }
    }

    pub fn last_written(&self) -> DateTime<Utc> {
        match self {
            Self::File(data) => data.last_written(),
            Self::Directory(data) => data.last_written(),
        }
    }

    pub fn as_file(&self) -> Option<&FileData> {
        match self {
            Self::File(data) => Some(data),
            Self::Directory(_) => None,
        }
    }

    pub fn as_file_mut(&mut self) -> Option<&mut FileData> {
        match self {
            Self::File(data) => Some(data),
            Self::Directory(_) => None,
        }
    }

    pub fn into_file(self) -> Option<FileData> {
        match self {
            Self::File(data) => Some(data),
            Self::Directory(_) => None,
        }
    }
}

impl From<FileData> for Entry {
    fn from(data: FileData) -> Self {
        Self::File(data)
    }
}

impl From<DirectoryData> for Entry {
    fn from(data: DirectoryData) -> Self {
        Self::Directory(data)
    }
}
