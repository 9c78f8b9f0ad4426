//! Path comparison and normalization helpers.
//!
//! Debugger backends report paths in their own OS conventions, so every
//! comparison here tolerates both `/` and `\` separators and ignores case.

use std::path::{Path, PathBuf};

/// Compare two strings ignoring case.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Test whether `s` starts with `prefix`, ignoring case.
pub fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    match s.get(..prefix.len()) {
        Some(head) => eq_ignore_case(head, prefix),
        None => false,
    }
}

/// Split a path string into its segments, accepting both separator styles.
///
/// Empty segments and `.` are dropped, so `"/a//b/./c"` and `"a\b\c"` both
/// yield three segments.
pub fn split_segments(s: &str) -> Vec<&str> {
    s.split(['/', '\\'])
        .filter(|seg| !seg.is_empty() && *seg != ".")
        .collect()
}

/// Whether the backend would consider this path absolute on its own OS:
/// a leading `/`, a drive prefix like `C:\` or `C:/`, or a UNC `\\server`.
pub fn is_backend_absolute(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.first() == Some(&b'/') || s.starts_with("\\\\") {
        return true;
    }
    bytes.len() >= 3
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes[2] == b'\\' || bytes[2] == b'/')
}

/// Strip `prefix` from the front of `name`, ignoring case, requiring a
/// separator boundary after the match. Returns the remainder with leading
/// separators removed; `None` when the prefix does not match at a boundary,
/// so `/hello` never matches `/hello2/a.c`.
pub fn strip_prefix_boundary<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    let prefix = prefix.trim_end_matches(['/', '\\']);
    if prefix.is_empty() || !starts_with_ignore_case(name, prefix) {
        return None;
    }
    let rest = &name[prefix.len()..];
    if rest.is_empty() {
        return Some("");
    }
    if rest.starts_with(['/', '\\']) {
        Some(rest.trim_start_matches(['/', '\\']))
    } else {
        None
    }
}

/// Strip `prefix` from `name` segment-by-segment, ignoring case and
/// separator style. Returns the remaining segments of `name`.
pub fn strip_segment_prefix<'a>(name: &'a str, prefix: &str) -> Option<Vec<&'a str>> {
    let name_segs = split_segments(name);
    let prefix_segs = split_segments(prefix);
    if name_segs.len() <= prefix_segs.len() {
        return None;
    }
    let matches = prefix_segs
        .iter()
        .zip(&name_segs)
        .all(|(p, n)| eq_ignore_case(p, n));
    matches.then(|| name_segs[prefix_segs.len()..].to_vec())
}

/// Whether `name` addresses a direct child of `base`: every segment of
/// `base` matches (ignoring case) and `name` has exactly one more.
pub fn is_direct_child(base: &Path, name: &str) -> bool {
    let base = base.to_string_lossy();
    match strip_segment_prefix(name, &base) {
        Some(rest) => rest.len() == 1,
        None => false,
    }
}

/// Interpret a name as a relative path on the local OS, regardless of the
/// separator style it was reported with. Returns `None` for paths the
/// backend considers absolute.
pub fn as_relative_path(name: &str) -> Option<PathBuf> {
    if is_backend_absolute(name) || Path::new(name).is_absolute() {
        return None;
    }
    let mut path = PathBuf::new();
    for seg in split_segments(name) {
        path.push(seg);
    }
    if path.as_os_str().is_empty() {
        None
    } else {
        Some(path)
    }
}

/// Join a backend-reported relative fragment onto a local base path,
/// re-splitting it so foreign separators survive the trip.
pub fn join_backend_relative(base: &Path, rest: &str) -> PathBuf {
    let mut path = base.to_path_buf();
    for seg in split_segments(rest) {
        path.push(seg);
    }
    path
}

/// The last segment of a path string, in either separator style.
pub fn file_segment(name: &str) -> Option<&str> {
    split_segments(name).last().copied()
}

/// Canonicalize a path, but don't fail if it doesn't exist yet.
/// Returns the path as-is if canonicalization fails.
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
