//! Utility functions and helpers.

pub mod http;

use std::path::{Path, PathBuf};

use url::Url;

/// Check that a site identifier is an absolute http(s) URL.
pub fn parse_page_url(url_str: &str) -> crate::error::Result<Url> {
    let url = Url::parse(url_str)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(crate::error::AppError::validation(format!(
            "unsupported scheme '{other}' in {url_str}"
        ))),
    }
}

/// Resolve `file` against `base` unless it is already absolute.
pub fn resolve_path(base: &Path, file: &Path) -> PathBuf {
    if file.is_absolute() {
        file.to_path_buf()
    } else {
        base.join(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_url() {
        assert!(parse_page_url("https://example.com/careers").is_ok());
        assert!(parse_page_url("http://x").is_ok());
        assert!(parse_page_url("ftp://example.com/jobs").is_err());
        assert!(parse_page_url("not a url").is_err());
    }

    #[test]
    fn test_resolve_path() {
        let base = Path::new("/srv/jobwatch");
        assert_eq!(
            resolve_path(base, Path::new("sites.data")),
            PathBuf::from("/srv/jobwatch/sites.data")
        );
        assert_eq!(
            resolve_path(base, Path::new("/etc/jobwatch.conf")),
            PathBuf::from("/etc/jobwatch.conf")
        );
    }
}
