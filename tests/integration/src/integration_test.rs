//! End-to-end integration test for a fixture-seeded filesystem
//!
//! Exercises the complete flow: fixture file on disk -> store -> facades.

use mockfs::{FixtureConfig, FixtureFormat, MockFileSystem};
use mockfs_test_utils::logging;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

/// Write a fixture describing a small project checkout
fn setup_fixture() -> (TempDir, std::path::PathBuf) {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("project.toml");
    fs::write(
        &file,
        r#"
current_directory = "/repo"
directories = ["/repo/target", "/repo/.cache/empty"]

[files."Cargo.toml"]
text = "[package]\nname = \"demo\"\n"

[files."src/main.rs"]
text = "fn main() {}\n"

[files."src/lib.rs"]
text = ""

[files."/repo/.git/HEAD"]
text = "ref: refs/heads/main\n"
read_only = true
hidden = true
"#,
    )
    .unwrap();
    (temp, file)
}

#[test]
fn test_full_fixture_flow() {
    logging::init();
    let (_temp, file) = setup_fixture();

    // 1. Load and build
    let config = FixtureConfig::load(&file).unwrap();
    let fs = MockFileSystem::from_fixture(&config).unwrap();
    assert_eq!(fs.directory().get_current_directory(), "/repo");

    // 2. Relative reads resolve against the current directory
    assert_eq!(
        fs.file().read_all_lines("Cargo.toml").unwrap(),
        vec!["[package]", "name = \"demo\""]
    );
    assert_eq!(
        fs.directory().get_files("src", "*.rs", false).unwrap(),
        vec!["/repo/src/lib.rs", "/repo/src/main.rs"]
    );

    // 3. Protected files stay protected
    let err = fs
        .file()
        .write_all_text("/repo/.git/HEAD", "detached")
        .unwrap_err();
    assert!(err.is_access_denied());
    let head = fs.file_info().from_file_name(".git/HEAD");
    assert!(head.is_read_only());

    // 4. Build output goes into the pre-created directory
    fs.file().write_all_bytes("target/demo", &[0x7f, b'E', b'L', b'F']).unwrap();
    assert_eq!(
        fs.directory().get_files("/repo/target", "*", false).unwrap(),
        vec!["/repo/target/demo"]
    );

    // 5. Cleaning the target directory
    fs.directory().delete("target", true).unwrap();
    assert!(!fs.directory().exists("/repo/target"));
    assert!(fs.directory().exists("/repo/.cache/empty"));
}

#[test]
fn test_fixture_survives_format_conversion() {
    let (_temp, file) = setup_fixture();
    let config = FixtureConfig::load(&file).unwrap();

    let json = config.render(FixtureFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["current_directory"], "/repo");

    let reparsed = FixtureConfig::parse_str(&json, FixtureFormat::Json).unwrap();
    assert_eq!(reparsed, config);

    let original = MockFileSystem::from_fixture(&config).unwrap();
    let rebuilt = MockFileSystem::from_fixture(&reparsed).unwrap();
    let mut expected = original.all_paths();
    let mut actual = rebuilt.all_paths();
    expected.sort();
    actual.sort();
    assert_eq!(actual, expected);
}
