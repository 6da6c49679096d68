//! Scenario tests for the in-memory filesystem as seen by code under test

use mockfs::{Error, FileData, MockFileSystem};
use mockfs_test_utils::{TestTree, logging};

// =============================================================================
// Seeding and lookup
// =============================================================================

mod seeding {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn seeded_file_is_found_with_any_casing() {
        logging::init();
        let fs = MockFileSystem::with_files(
            [("/data/users.csv", FileData::from_text("id,name"))],
            None,
        )
        .unwrap();

        assert_eq!(fs.get_file("/data/USERS.CSV").unwrap().text_contents(), "id,name");
        assert_eq!(fs.all_paths().len(), 2);
    }

    #[test]
    fn yaml_fixture_text() {
        let tree = TestTree::from_fixture_text(
            "yaml",
            "directories:\n  - /empty\nfiles:\n  /logs/app.log:\n    text: started\n",
        );
        tree.assert_directory_exists("/empty");
        tree.assert_file_contains("/LOGS/APP.LOG", "started");
    }
}

// =============================================================================
// Protection and edge cases
// =============================================================================

mod protection {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn read_only_file_refuses_every_kind_of_write() {
        let tree = TestTree::new().file("/etc/passwd", FileData::from_text("root").read_only());
        let fs = tree.fs();

        assert!(matches!(fs.add_file("/etc/passwd", "x"), Err(Error::AccessDenied { .. })));
        assert!(fs.file().write_all_bytes("/ETC/passwd", b"x").unwrap_err().is_access_denied());
        assert!(fs.file().delete("/etc/passwd").unwrap_err().is_access_denied());
        assert!(fs.directory().delete("/etc", true).unwrap_err().is_access_denied());
        tree.assert_file_contains("/etc/passwd", "root");
    }

    #[test]
    fn empty_path_is_never_present() {
        let fs = TestTree::new().file("/a", "x").into_fs();
        assert!(!fs.file_exists(""));
        assert!(!fs.file().exists(""));
        assert!(!fs.directory().exists(""));
    }

    #[test]
    fn explicit_empty_directory_is_listed() {
        let fs = MockFileSystem::new();
        fs.add_directory("/empty").unwrap();
        assert_eq!(fs.all_directories(), vec!["/empty"]);
        assert!(fs.all_files().is_empty());
    }
}

// =============================================================================
// Shared access
// =============================================================================

mod concurrency {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Barrier};
    use std::thread;

    #[test]
    fn threads_writing_distinct_files() {
        let fs = MockFileSystem::new();
        let num_threads = 8;
        let files_per_thread = 25;
        let barrier = Arc::new(Barrier::new(num_threads));

        let handles: Vec<_> = (0..num_threads)
            .map(|thread_id| {
                let fs = fs.clone();
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    for i in 0..files_per_thread {
                        fs.file()
                            .write_all_text(&format!("/out/t{thread_id}/f{i}.txt"), "x")
                            .unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().expect("Thread should not panic");
        }

        assert_eq!(fs.all_files().len(), num_threads * files_per_thread);
        // /out plus one directory per thread
        assert_eq!(fs.all_directories().len(), num_threads + 1);
    }

    #[test]
    fn concurrent_appends_are_never_lost() {
        let fs = MockFileSystem::new();
        let num_threads = 4;
        let barrier = Arc::new(Barrier::new(num_threads));

        let handles: Vec<_> = (0..num_threads)
            .map(|thread_id| {
                let fs = fs.clone();
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    let path = format!("/log{thread_id}.txt");
                    for _ in 0..10 {
                        fs.file().append_all_text(&path, "line\n").unwrap();
                        fs.file().append_all_text("/shared.log", "line\n").unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().expect("Thread should not panic");
        }

        for thread_id in 0..num_threads {
            let lines = fs.file().read_all_lines(&format!("/log{thread_id}.txt")).unwrap();
            assert_eq!(lines.len(), 10);
        }
        let shared = fs.file().read_all_lines("/shared.log").unwrap();
        assert_eq!(shared.len(), num_threads * 10);
    }
}
