// src/pipeline/extract.rs

//! Focus window extraction.
//!
//! Pages are handled as raw bytes; no text encoding is assumed.

/// Return the part of `text` from the first `start_marker` up to the first
/// `end_marker`.
///
/// The start marker is part of the window, the end marker is not. The
/// window is empty when either marker is missing or when the end marker
/// first appears before the start marker.
pub fn extract<'a>(text: &'a [u8], start_marker: &[u8], end_marker: &[u8]) -> &'a [u8] {
    match (find(text, start_marker), find(text, end_marker)) {
        (Some(start), Some(end)) if start <= end => &text[start..end],
        _ => &[],
    }
}

/// Byte offset of the first occurrence of `needle` in `haystack`.
///
/// An empty needle matches at offset 0.
pub(crate) fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text() {
        assert_eq!(extract(b"", b"a", b"b"), b"");
    }

    #[test]
    fn test_window_includes_start_marker_only() {
        assert_eq!(extract(b"xaYbz", b"a", b"b"), b"aY");
        assert_eq!(
            extract(
                b"<html><h1>AEngineerBEngineerC<footer>x</footer>",
                b"<h1>",
                b"<footer>"
            ),
            b"<h1>AEngineerBEngineerC"
        );
    }

    #[test]
    fn test_missing_marker_yields_empty() {
        assert_eq!(extract(b"xaYz", b"a", b"b"), b"");
        assert_eq!(extract(b"xYbz", b"a", b"b"), b"");
        assert_eq!(extract(b"xYz", b"a", b"b"), b"");
    }

    #[test]
    fn test_first_occurrences_are_used() {
        assert_eq!(extract(b"a1b2a3b", b"a", b"b"), b"a1");
    }

    #[test]
    fn test_end_before_start_yields_empty() {
        assert_eq!(extract(b"xbYaz", b"a", b"b"), b"");
        // a later end marker does not rescue the window
        assert_eq!(extract(b"bxaYb", b"a", b"b"), b"");
    }

    #[test]
    fn test_coinciding_markers_yield_empty() {
        assert_eq!(extract(b"x<div>y", b"<div>", b"<div>"), b"");
        assert_eq!(extract(b"x<div>y", b"<div>", b"<di"), b"");
    }

    #[test]
    fn test_multibyte_text() {
        assert_eq!(
            extract(
                "채용: 엔지니어 모집 끝".as_bytes(),
                "엔지니어".as_bytes(),
                "끝".as_bytes()
            ),
            "엔지니어 모집 ".as_bytes()
        );
    }

    #[test]
    fn test_non_utf8_page() {
        // EUC-KR encoded listing
        let page = b"<h1>\xc3\xa4\xbf\xeb<footer>";
        assert_eq!(extract(page, b"<h1>", b"<footer>"), b"<h1>\xc3\xa4\xbf\xeb");
    }

    #[test]
    fn test_find() {
        assert_eq!(find(b"abcabc", b"ca"), Some(2));
        assert_eq!(find(b"abc", b"abcd"), None);
        assert_eq!(find(b"abc", b""), Some(0));
    }
}
