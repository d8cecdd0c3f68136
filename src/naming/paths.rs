/// Trim whitespace and strip every leading and trailing `/` from a request path.
///
/// Whitespace uncovered by removing a slash is trimmed as well, which keeps the operation
/// idempotent. Empty input comes back empty.
pub fn normalize_path(path: &str) -> &str {
    path.trim_matches(|c: char| c == '/' || c.is_whitespace())
}

/// Split a path into its parent directory and final segment.
///
/// The path is normalised first. A path without any `/` has an empty parent.
pub fn split_parent_and_name(path: &str) -> (&str, &str) {
    let path = normalize_path(path);
    match path.rsplit_once('/') {
        Some((parent, name)) => (parent, name),
        None => ("", path),
    }
}

/// Remove the final `.extension` segment from a file name.
///
/// Only the last segment is dropped, so `a.b.c` becomes `a.b`. Names without a dot are
/// returned unchanged.
pub fn strip_extension(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, _)) => stem,
        None => name,
    }
}

/// Join a relative parent directory and a file name with a forward slash.
///
/// An empty parent yields the bare name, mirroring how the content root is addressed.
pub fn join_relative(parent: &str, name: &str) -> String {
    let parent = parent.trim_end_matches('/');
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}
