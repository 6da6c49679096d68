use mockfs_store::path;
use rstest::rstest;

#[rstest]
#[case("/foo/bar", "/foo/bar")]
#[case("\\foo\\bar", "/foo/bar")]
#[case("/foo\\bar/", "/foo/bar")]
#[case("/foo//bar", "/foo/bar")]
#[case("/foo/./bar", "/foo/bar")]
#[case("/foo/../bar", "/bar")]
#[case("/../..", "/")]
#[case("C:\\Foo\\..\\Bar", "C:/Bar")]
#[case("C:\\", "C:/")]
#[case("../a", "../a")]
#[case("a/../../b", "../b")]
fn test_normalize(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(path::normalize(input), expected);
}

#[rstest]
#[case("/Foo/Bar.txt", "/foo/bar.txt")]
#[case("\\FOO\\bar.TXT", "/foo/bar.txt")]
#[case("C:\\Users\\ME", "c:/users/me")]
fn test_lookup_key_folds_case(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(path::lookup_key(input), expected);
}

#[rstest]
#[case("/", true)]
#[case("\\", true)]
#[case("C:/", true)]
#[case("c:", true)]
#[case("/a", false)]
#[case("a", false)]
#[case("", false)]
fn test_is_root(#[case] input: &str, #[case] expected: bool) {
    assert_eq!(path::is_root(input), expected);
}

#[test]
fn test_is_rooted() {
    assert!(path::is_rooted("/a"));
    assert!(path::is_rooted("\\a"));
    assert!(path::is_rooted("D:\\a"));
    assert!(!path::is_rooted("a/b"));
    assert!(!path::is_rooted(""));
}

#[test]
fn test_combine() {
    assert_eq!(path::combine("/base", "child.txt"), "/base/child.txt");
    assert_eq!(path::combine("/base", "/abs.txt"), "/abs.txt");
    assert_eq!(path::combine("/base/", "..\\up.txt"), "/up.txt");
    assert_eq!(path::combine("/base", ""), "/base");
    assert_eq!(path::combine("", "rel"), "rel");
}

#[test]
fn test_file_name_parts() {
    assert_eq!(path::file_name("/dir/report.final.pdf"), "report.final.pdf");
    assert_eq!(path::extension("/dir/report.final.pdf").as_deref(), Some("pdf"));
    assert_eq!(path::file_name_without_extension("/dir/report.final.pdf"), "report.final");
    assert_eq!(path::file_name("/"), "");
    assert_eq!(path::extension("/dir/noext"), None);
}

#[test]
fn test_root() {
    assert_eq!(path::root("/a/b").as_deref(), Some("/"));
    assert_eq!(path::root("c:\\a").as_deref(), Some("c:/"));
    assert_eq!(path::root("a/b"), None);
}

#[test]
fn test_paths_equal() {
    assert!(path::paths_equal("/Data/Users.csv", "\\data\\USERS.CSV"));
    assert!(!path::paths_equal("/data/users.csv", "/data/users.tsv"));
}
