// src/models/site.rs

//! Monitored site entries and the site list format.
//!
//! One site per line: `url,startMarker,endMarker`. Markers are taken
//! verbatim and cannot contain commas.

use crate::error::{AppError, Result};

/// A career page to watch and the markers bounding its focus window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteEntry {
    /// Page URL, also the site identifier in the signature store
    pub url: String,

    /// Text that opens the focus window (included in the window)
    pub scope_start: String,

    /// Text that closes the focus window (excluded from the window)
    pub scope_end: String,
}

impl SiteEntry {
    pub fn new(
        url: impl Into<String>,
        scope_start: impl Into<String>,
        scope_end: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            scope_start: scope_start.into(),
            scope_end: scope_end.into(),
        }
    }

    /// Parse one site list line. `line_no` is 1-based and only used for errors.
    pub fn parse_line(line: &str, source: &str, line_no: usize) -> Result<Self> {
        let cols: Vec<&str> = line.split(',').collect();
        match cols.as_slice() {
            [url, start, end] => {
                if url.is_empty() {
                    return Err(AppError::parse(source, line_no, "empty URL"));
                }
                Ok(Self::new(*url, *start, *end))
            }
            _ => Err(AppError::parse(
                source,
                line_no,
                format!("expected 3 fields (url,start,end), found {}", cols.len()),
            )),
        }
    }
}

/// Parse a whole site list. Blank lines are skipped; any other malformed
/// line aborts the parse.
pub fn parse_site_list(content: &str, source: &str) -> Result<Vec<SiteEntry>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| SiteEntry::parse_line(line.trim_end_matches('\r'), source, idx + 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        let site = SiteEntry::parse_line("http://x,<h1>,<footer>", "sites", 1).unwrap();
        assert_eq!(site, SiteEntry::new("http://x", "<h1>", "<footer>"));
    }

    #[test]
    fn test_parse_line_keeps_marker_whitespace() {
        let site = SiteEntry::parse_line("http://x,<div class=\"jobs\">, </ul>", "sites", 1)
            .unwrap();
        assert_eq!(site.scope_start, "<div class=\"jobs\">");
        assert_eq!(site.scope_end, " </ul>");
    }

    #[test]
    fn test_comma_in_marker_is_rejected() {
        let err = SiteEntry::parse_line("http://x,<a,b>,<footer>", "sites", 4).unwrap_err();
        match err {
            AppError::Parse { line, .. } => assert_eq!(line, 4),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_site_list_skips_blank_lines() {
        let content = "http://a,<h1>,<footer>\n\nhttp://b,<ul>,</ul>\r\n";
        let sites = parse_site_list(content, "sites").unwrap();
        assert_eq!(sites.len(), 2);
        assert_eq!(sites[0].url, "http://a");
        assert_eq!(sites[1].scope_end, "</ul>");
    }

    #[test]
    fn test_parse_site_list_reports_line_number() {
        let content = "http://a,<h1>,<footer>\n\nhttp://b\n";
        match parse_site_list(content, "career_pages.cdf") {
            Err(AppError::Parse { file, line, .. }) => {
                assert_eq!(file, "career_pages.cdf");
                assert_eq!(line, 3);
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
