//! Document locator resolution.
//!
//! The viewer entry point receives the document address through a `file`
//! query parameter. The value arrives percent-encoded and, for documents
//! uploaded from Windows clients, may carry backslash path separators;
//! both are normalized here.

use std::fmt;

use url::Url;

/// A resolved document address: an http(s) URL or a local path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator(String);

impl Locator {
    /// Normalizes a raw locator value: backslashes become forward slashes.
    pub fn parse(raw: &str) -> Self {
        Self(raw.replace('\\', "/"))
    }

    /// Extracts the locator from a viewer entry URL's `file` query parameter.
    ///
    /// `query_pairs` percent-decodes the value; normalization then applies.
    /// Returns `None` when the URL is malformed or carries no `file` param.
    pub fn from_viewer_url(viewer_url: &str) -> Option<Self> {
        let url = Url::parse(viewer_url).ok()?;
        let raw = url
            .query_pairs()
            .find(|(key, _)| key == "file")
            .map(|(_, value)| value.into_owned())?;
        if raw.is_empty() {
            return None;
        }
        Some(Self::parse(&raw))
    }

    /// Returns true if the locator is an http(s) URL (as opposed to a local
    /// path).
    pub fn is_remote(&self) -> bool {
        self.0.starts_with("http://") || self.0.starts_with("https://")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewer_url_param_is_percent_decoded() {
        let locator =
            Locator::from_viewer_url("http://localhost/viewer?file=http%3A%2F%2Fhost%2Fa%20b.pdf")
                .unwrap();
        assert_eq!(locator.as_str(), "http://host/a b.pdf");
        assert!(locator.is_remote());
    }

    #[test]
    fn backslashes_are_normalized() {
        let locator = Locator::from_viewer_url(
            "http://localhost/viewer?file=uploads%5Cbooks%5Cdune.pdf",
        )
        .unwrap();
        assert_eq!(locator.as_str(), "uploads/books/dune.pdf");
        assert!(!locator.is_remote());
    }

    #[test]
    fn missing_or_empty_param_yields_none() {
        assert!(Locator::from_viewer_url("http://localhost/viewer").is_none());
        assert!(Locator::from_viewer_url("http://localhost/viewer?file=").is_none());
        assert!(Locator::from_viewer_url("not a url").is_none());
    }

    #[test]
    fn parse_normalizes_direct_input() {
        assert_eq!(Locator::parse(r"C:\docs\x.pdf").as_str(), "C:/docs/x.pdf");
    }
}
