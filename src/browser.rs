// src/browser.rs
// =============================================================================
// Opening the picked path in the user's browser.
//
// The picker shows `github.com/<user>/<repo>` without a scheme, so we add
// `https://` before handing it to the OS.
// =============================================================================

use anyhow::{Context, Result};
use tracing::info;
use url::Url;

// Turns whatever is in the field into an absolute URL
//
// Examples:
//   "github.com/octo/repo"          -> "https://github.com/octo/repo"
//   "http://github.com/octo/repo"   -> unchanged
pub fn to_browser_url(text: &str) -> Result<Url, url::ParseError> {
    let text = text.trim();
    if text.starts_with("http://") || text.starts_with("https://") {
        Url::parse(text)
    } else {
        Url::parse(&format!("https://{}", text))
    }
}

// Hands the URL to the platform's default browser (xdg-open, open, start)
pub fn open_in_browser(url: &Url) -> Result<()> {
    info!(%url, "opening in browser");
    open::that(url.as_str()).with_context(|| format!("failed to open {} in a browser", url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adds_https_scheme() {
        let url = to_browser_url("github.com/IsaacSSilva/Portfolio").unwrap();
        assert_eq!(url.as_str(), "https://github.com/IsaacSSilva/Portfolio");
    }

    #[test]
    fn test_keeps_existing_scheme() {
        let url = to_browser_url("http://github.com/octo").unwrap();
        assert_eq!(url.scheme(), "http");
    }

    #[test]
    fn test_trailing_slash_survives() {
        let url = to_browser_url("github.com/octo/").unwrap();
        assert_eq!(url.path(), "/octo/");
    }

    #[test]
    fn test_garbage_is_an_error() {
        assert!(to_browser_url("http://").is_err());
    }
}
