//! Path string handling for store keys
//!
//! Every path is reduced to one canonical spelling before it reaches the
//! table: forward slashes only, no empty or `.` segments, `..` folded into
//! the preceding segment where there is one, and no trailing separator
//! except on a root. Roots are `/` and drive roots such as `C:/`.
//!
//! Case is preserved by normalization. Case-insensitive identity is a
//! separate step, see [`lookup_key`].

/// Separator used in every normalized path.
pub const DIRECTORY_SEPARATOR: char = '/';

/// Separator accepted on input and rewritten to [`DIRECTORY_SEPARATOR`].
pub const ALT_DIRECTORY_SEPARATOR: char = '\\';

/// Normalize a path to its canonical spelling.
///
/// Idempotent: `normalize(&normalize(p)) == normalize(p)`. The empty string
/// stays empty; a relative path that reduces to nothing becomes `"."`.
pub fn normalize(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }

    let unified = path.replace(ALT_DIRECTORY_SEPARATOR, "/");
    let root = &unified[..root_len(&unified)];

    let mut segments: Vec<&str> = Vec::new();
    for segment in unified[root.len()..].split(DIRECTORY_SEPARATOR) {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(last) if *last != ".." => {
                    segments.pop();
                }
                // Cannot climb above a root
                _ if !root.is_empty() => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    if root.is_empty() && segments.is_empty() {
        return ".".to_string();
    }

    let mut normalized = String::with_capacity(unified.len());
    normalized.push_str(root);
    normalized.push_str(&segments.join("/"));
    normalized
}

/// Case-folded normalized form used as the table key.
///
/// Folding is Unicode lowercase, which does not depend on the process
/// locale.
pub fn lookup_key(path: &str) -> String {
    normalize(path).to_lowercase()
}

/// Whether two paths name the same entry.
pub fn paths_equal(a: &str, b: &str) -> bool {
    lookup_key(a) == lookup_key(b)
}

/// Length of the root prefix of an already separator-unified path.
fn root_len(unified: &str) -> usize {
    let bytes = unified.as_bytes();
    if bytes.first() == Some(&b'/') {
        return 1;
    }
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        return if bytes.get(2) == Some(&b'/') { 3 } else { 2 };
    }
    0
}

/// Whether the path carries a root (`/...` or `X:...`).
pub fn is_rooted(path: &str) -> bool {
    root_len(&path.replace(ALT_DIRECTORY_SEPARATOR, "/")) > 0
}

/// Whether the path is nothing but a root.
pub fn is_root(path: &str) -> bool {
    let normalized = normalize(path);
    !normalized.is_empty() && root_len(&normalized) == normalized.len()
}

/// The root prefix of the path, if any.
pub fn root(path: &str) -> Option<String> {
    let normalized = normalize(path);
    match root_len(&normalized) {
        0 => None,
        len => Some(normalized[..len].to_string()),
    }
}

/// The directory containing `path`, or `None` for roots and single-segment
/// relative paths.
pub fn parent(path: &str) -> Option<String> {
    let normalized = normalize(path);
    let root = root_len(&normalized);
    if normalized.is_empty() || normalized == "." || normalized.len() == root {
        return None;
    }

    match normalized[root..].rfind(DIRECTORY_SEPARATOR) {
        Some(idx) => Some(normalized[..root + idx].to_string()),
        None if root > 0 => Some(normalized[..root].to_string()),
        None => None,
    }
}

/// Every proper ancestor of `path` below its root, outermost first.
///
/// `ancestors("/a/b/c.txt")` is `["/a", "/a/b"]`.
pub fn ancestors(path: &str) -> Vec<String> {
    let mut chain = Vec::new();
    let mut current = parent(path);
    while let Some(dir) = current {
        if is_root(&dir) || file_name(&dir) == ".." {
            break;
        }
        current = parent(&dir);
        chain.push(dir);
    }
    chain.reverse();
    chain
}

/// The last segment of the path; empty for roots.
pub fn file_name(path: &str) -> String {
    let normalized = normalize(path);
    let root = root_len(&normalized);
    normalized[root..]
        .rsplit(DIRECTORY_SEPARATOR)
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Extension of the last segment, without the leading dot.
pub fn extension(path: &str) -> Option<String> {
    let name = file_name(path);
    let idx = name.rfind('.')?;
    if idx == 0 || idx + 1 == name.len() {
        None
    } else {
        Some(name[idx + 1..].to_string())
    }
}

/// The last segment with its extension stripped.
pub fn file_name_without_extension(path: &str) -> String {
    let name = file_name(path);
    match extension(&name) {
        Some(ext) => name[..name.len() - ext.len() - 1].to_string(),
        None => name,
    }
}

/// Join `relative` onto `base`. A rooted `relative` replaces `base`.
pub fn combine(base: &str, relative: &str) -> String {
    if relative.is_empty() {
        return normalize(base);
    }
    if base.is_empty() || is_rooted(relative) {
        return normalize(relative);
    }
    normalize(&format!("{base}/{relative}"))
}

/// Whether `path` lies strictly below `dir`, compared case-insensitively
/// on whole segments.
pub fn is_within(path: &str, dir: &str) -> bool {
    let path = lookup_key(path);
    let dir = lookup_key(dir);
    if path.is_empty() || dir.is_empty() || path == dir {
        return false;
    }
    if dir.ends_with(DIRECTORY_SEPARATOR) || is_root(&dir) {
        path.starts_with(&dir)
    } else {
        path.strip_prefix(&dir)
            .is_some_and(|rest| rest.starts_with(DIRECTORY_SEPARATOR))
    }
}
