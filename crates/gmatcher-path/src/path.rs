//! Dot-delimited path helpers

use memchr::memchr_iter;

/// Trim one trailing `.` and count the segments of `path`.
///
/// # Returns
///
/// The trimmed path and its segment count; an empty path has no segments.
///
/// # Example
///
/// ```
/// use gmatcher_path::path_level;
///
/// assert_eq!(path_level("a.b.c"), ("a.b.c", 3));
/// assert_eq!(path_level("a.b."), ("a.b", 2));
/// assert_eq!(path_level(""), ("", 0));
/// ```
pub fn path_level(path: &str) -> (&str, usize) {
    let trimmed = path.strip_suffix('.').unwrap_or(path);
    if trimmed.is_empty() {
        return (trimmed, 0);
    }
    (trimmed, memchr_iter(b'.', trimmed.as_bytes()).count() + 1)
}

/// Split `path` into segments, reusing `parts` as the output buffer
pub fn split_path<'p>(path: &'p str, parts: &mut Vec<&'p str>) {
    parts.clear();
    let (trimmed, level) = path_level(path);
    if level == 0 {
        return;
    }
    parts.reserve(level);
    parts.extend(trimmed.split('.'));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_level() {
        assert_eq!(path_level("a"), ("a", 1));
        assert_eq!(path_level("a..b"), ("a..b", 3));
        assert_eq!(path_level("."), ("", 0));
        assert_eq!(path_level("a.."), ("a.", 2));
    }

    #[test]
    fn test_split_path_reuses_buffer() {
        let mut parts = Vec::new();
        split_path("DB.host.cpu.", &mut parts);
        assert_eq!(parts, vec!["DB", "host", "cpu"]);
        split_path("x", &mut parts);
        assert_eq!(parts, vec!["x"]);
        split_path("", &mut parts);
        assert!(parts.is_empty());
    }
}
