// src/pipeline/fingerprint.rs

//! Structural fingerprints of a focus window.
//!
//! A fingerprint lists the byte lengths of the text between consecutive
//! occurrences of a keyword, each followed by `_`. Text before the first and
//! after the last occurrence does not contribute. Two windows with the same
//! spacing produce the same fingerprint even if their content differs.

use crate::pipeline::extract::find;

/// Compute the fingerprint of `text` for `keyword`.
///
/// Occurrences are matched left to right without overlap. Fewer than two
/// occurrences, or an empty keyword, give an empty fingerprint.
pub fn fingerprint(text: &[u8], keyword: &[u8]) -> String {
    let mut out = String::new();
    if keyword.is_empty() {
        return out;
    }

    let Some(first) = find(text, keyword) else {
        return out;
    };
    let mut rest = &text[first + keyword.len()..];
    while let Some(next) = find(rest, keyword) {
        out.push_str(&next.to_string());
        out.push('_');
        rest = &rest[next + keyword.len()..];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_occurrence() {
        assert_eq!(fingerprint(b"", b"K"), "");
        assert_eq!(fingerprint(b"abc", b"K"), "");
    }

    #[test]
    fn test_single_occurrence() {
        assert_eq!(fingerprint(b"K", b"K"), "");
        assert_eq!(fingerprint(b"aaKbb", b"K"), "");
    }

    #[test]
    fn test_outer_segments_ignored() {
        assert_eq!(fingerprint(b"aKbbKccc", b"K"), "2_");
        assert_eq!(fingerprint(b"KbbK", b"K"), "2_");
    }

    #[test]
    fn test_adjacent_occurrences() {
        assert_eq!(fingerprint(b"KK", b"K"), "0_");
        assert_eq!(fingerprint(b"xKKKy", b"K"), "0_0_");
    }

    #[test]
    fn test_occurrences_do_not_overlap() {
        assert_eq!(fingerprint(b"aaaaa", b"aa"), "0_");
    }

    #[test]
    fn test_segment_count_follows_occurrences() {
        for n in 0..6 {
            let text = "K-".repeat(n);
            let fp = fingerprint(text.as_bytes(), b"K");
            assert_eq!(fp.matches('_').count(), n.saturating_sub(1), "n = {n}");
        }
    }

    #[test]
    fn test_lengths_are_bytes() {
        assert_eq!(
            fingerprint("Engineer채용Engineer".as_bytes(), b"Engineer"),
            "6_"
        );
    }

    #[test]
    fn test_invalid_utf8_counts_raw_bytes() {
        assert_eq!(
            fingerprint(b"<h1>AEngineer\xb1\xe2Engineer<footer>", b"Engineer"),
            "2_"
        );
        assert_eq!(fingerprint(b"Engineer\xffEngineer\xff\xffEngineer", b"Engineer"), "1_2_");
    }

    #[test]
    fn test_job_listing_window() {
        let window = b"<h1>AEngineerBEngineerC";
        assert_eq!(fingerprint(window, b"Engineer"), "1_");

        let window = b"<ul><li>Senior Engineer</li><li>Staff Engineer</li><li>Data Engineer</li>";
        assert_eq!(fingerprint(window, b"Engineer"), "15_14_");
    }

    #[test]
    fn test_empty_keyword() {
        assert_eq!(fingerprint(b"abc", b""), "");
    }
}
