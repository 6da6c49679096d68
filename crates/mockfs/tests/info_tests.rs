//! Metadata views

use chrono::{TimeZone, Utc};
use mockfs::{Error, FileAttributes, FileData, MockFileSystem};
use mockfs_store::entry::file_time_epoch;
use pretty_assertions::assert_eq;

#[test]
fn test_file_info_of_existing_file() {
    let fs = MockFileSystem::new();
    fs.add_file("/Data/Report.Final.csv", "a,b,c").unwrap();

    let info = fs.file_info().from_file_name("/data/report.final.CSV");
    assert!(info.exists());
    assert_eq!(info.full_name(), "/Data/Report.Final.csv");
    assert_eq!(info.name(), "Report.Final.csv");
    assert_eq!(info.extension().as_deref(), Some("csv"));
    assert_eq!(info.directory_name().as_deref(), Some("/Data"));
    assert_eq!(info.length().unwrap(), 5);
    assert_eq!(info.attributes(), FileAttributes::ARCHIVE);
}

#[test]
fn test_file_info_of_missing_file() {
    let fs = MockFileSystem::new();
    let info = fs.file_info().from_file_name("/missing.txt");

    assert!(!info.exists());
    assert_eq!(info.creation_time(), file_time_epoch());
    assert!(info.attributes().is_empty());
    assert!(matches!(info.length(), Err(Error::NotFound { .. })));
}

#[test]
fn test_file_info_of_directory_does_not_exist() {
    let fs = MockFileSystem::new();
    fs.directory().create_directory("/dir").unwrap();
    assert!(!fs.file_info().from_file_name("/dir").exists());
}

#[test]
fn test_file_info_refresh() {
    let fs = MockFileSystem::new();
    let mut info = fs.file_info().from_file_name("/later.txt");
    assert!(!info.exists());

    fs.add_file("/later.txt", FileData::from_text("now").read_only()).unwrap();
    assert!(!info.exists());

    info.refresh();
    assert!(info.exists());
    assert!(info.is_read_only());
    assert_eq!(info.length().unwrap(), 3);
}

#[test]
fn test_file_info_timestamps() {
    let fs = MockFileSystem::new();
    fs.add_file("/t.txt", "x").unwrap();
    let at = Utc.with_ymd_and_hms(2021, 6, 1, 12, 0, 0).unwrap();
    fs.file().set_last_write_time("/t.txt", at).unwrap();

    let info = fs.file_info().from_file_name("/t.txt");
    assert_eq!(info.last_write_time(), at);
}

#[test]
fn test_file_info_relative_name() {
    let fs = MockFileSystem::new();
    fs.directory().set_current_directory("/home/user");
    fs.add_file("todo.md", "- [ ] x").unwrap();

    let info = fs.file_info().from_file_name("todo.md");
    assert_eq!(info.full_name(), "/home/user/todo.md");
    let dir = info.directory().unwrap();
    assert!(dir.exists());
    assert_eq!(dir.name(), "user");
}

#[test]
fn test_directory_info() {
    let fs = MockFileSystem::new();
    fs.add_file("/Projects/app/main.rs", "fn main() {}").unwrap();
    fs.add_file("/Projects/app/lib.rs", "").unwrap();
    fs.directory().create_directory("/Projects/app/tests").unwrap();

    let info = fs.directory_info().from_directory_name("/projects/APP");
    assert!(info.exists());
    assert_eq!(info.full_name(), "/Projects/app");
    assert_eq!(info.name(), "app");
    assert!(info.attributes().contains(FileAttributes::DIRECTORY));
    assert!(info.creation_time().is_some());
    assert_eq!(
        info.get_files("*.rs").unwrap(),
        vec!["/Projects/app/lib.rs", "/Projects/app/main.rs"]
    );
    assert_eq!(info.get_directories("*").unwrap(), vec!["/Projects/app/tests"]);

    let parent = info.parent().unwrap();
    assert_eq!(parent.full_name(), "/Projects");
    let root = info.root().unwrap();
    assert!(root.exists());
    assert_eq!(root.name(), "/");
}

#[test]
fn test_directory_info_of_missing_directory() {
    let fs = MockFileSystem::new();
    let info = fs.directory_info().from_directory_name("/ghost");

    assert!(!info.exists());
    assert_eq!(info.attributes(), FileAttributes::DIRECTORY);
    assert_eq!(info.creation_time(), None);
    assert!(matches!(info.get_files("*"), Err(Error::NotFound { .. })));
}
