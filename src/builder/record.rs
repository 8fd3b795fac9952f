//! Serialized URL records.

use url::Url;

use crate::Result;
use crate::entry::SitemapUrl;
use crate::template::SearchEngine;

/// The serialized XML fragment for one URL entry.
///
/// Records are immutable once built. The builder only looks at their
/// length and their news flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    bytes: Vec<u8>,
    news: bool,
}

impl Record {
    /// Wraps an already serialized fragment.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            news: false,
        }
    }

    /// Wraps an already serialized fragment that counts as a news entry.
    pub fn news(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            news: true,
        }
    }

    /// Serializes a URL entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`](crate::Error::InvalidUrl) if the entry
    /// cannot be serialized.
    pub fn from_url(url: &SitemapUrl, default_host: &Url, engine: SearchEngine) -> Result<Self> {
        let bytes = url.to_xml(default_host, engine)?;
        Ok(Self {
            bytes,
            news: url.is_news(),
        })
    }

    /// Returns the serialized bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the serialized length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the record has no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns `true` if the record counts against the news limit.
    pub fn is_news(&self) -> bool {
        self.news
    }
}
