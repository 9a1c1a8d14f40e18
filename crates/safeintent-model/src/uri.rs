//! Lenient data URI.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

/// The data reference of an intent.
///
/// Parsing never fails: the raw text is kept as sent, the way the platform's
/// own URI type behaves. Use [`DataUri::to_url`] when a strictly valid URL is
/// required.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataUri(String);

impl DataUri {
    /// Wrap arbitrary text as a data URI.
    pub fn parse(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The raw text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The scheme, if the text starts with a valid RFC 3986 scheme and `:`.
    pub fn scheme(&self) -> Option<&str> {
        let (candidate, _) = self.0.split_once(':')?;
        let mut chars = candidate.chars();
        let first = chars.next()?;
        let valid = first.is_ascii_alphabetic()
            && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        valid.then_some(candidate)
    }

    /// Strict parse as an absolute URL.
    pub fn to_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.0)
    }

    /// Everything after `prefix`, reparsed, if the text starts with it.
    pub fn strip_prefix(&self, prefix: &str) -> Option<DataUri> {
        self.0.strip_prefix(prefix).map(DataUri::parse)
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DataUri {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl From<Url> for DataUri {
    fn from(url: Url) -> Self {
        Self(url.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_raw_text() {
        let uri = DataUri::parse("not a url at all");
        assert_eq!(uri.as_str(), "not a url at all");
        assert_eq!(uri.to_string(), "not a url at all");
        assert!(uri.to_url().is_err());
    }

    #[test]
    fn test_scheme() {
        assert_eq!(DataUri::parse("https://example.com").scheme(), Some("https"));
        assert_eq!(DataUri::parse("about:reader?url=x").scheme(), Some("about"));
        assert_eq!(DataUri::parse("/relative/path").scheme(), None);
        assert_eq!(DataUri::parse("1abc:foo").scheme(), None);
        assert_eq!(DataUri::parse(":empty").scheme(), None);
    }

    #[test]
    fn test_strip_prefix() {
        let uri = DataUri::parse("about:reader?url=https://example.com/page");
        assert_eq!(
            uri.strip_prefix("about:reader?url="),
            Some(DataUri::parse("https://example.com/page"))
        );
        assert_eq!(uri.strip_prefix("https://"), None);
    }

    #[test]
    fn test_to_url_on_valid_text() {
        let url = DataUri::parse("https://example.com/page").to_url().unwrap();
        assert_eq!(url.host_str(), Some("example.com"));
        assert_eq!(DataUri::from(url).as_str(), "https://example.com/page");
    }
}
