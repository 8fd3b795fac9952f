//! Capacity limits for sitemap files.

use crate::{Error, Result};

/// Capacity limits applied to every sitemap file and to the index.
///
/// `max_file_size` caps the raw record payload of one file. Header and
/// footer bytes are added at flush time and are not counted, so a finished
/// document may exceed the cap by
/// [`BuilderFile::document_overhead`](crate::builder::BuilderFile::document_overhead).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Payload bytes per file; a record is accepted only while the total stays below it.
    pub max_file_size: usize,
    /// Links per file.
    pub max_links: usize,
    /// News entries per file.
    pub max_news: usize,
    /// Files referenced by one sitemap index.
    pub max_sitemaps: usize,
}

impl Default for Limits {
    /// Creates limits matching the sitemaps.org protocol:
    ///
    /// | Limit | Default Value |
    /// |-------|---------------|
    /// | `max_file_size` | 50,000,000 bytes |
    /// | `max_links` | 50,000 |
    /// | `max_news` | 1,000 |
    /// | `max_sitemaps` | 50,000 |
    fn default() -> Self {
        Self {
            max_file_size: 50_000_000,
            max_links: 50_000,
            max_news: 1_000,
            max_sitemaps: 50_000,
        }
    }
}

impl Limits {
    /// Creates limits with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum payload size in bytes.
    pub fn max_file_size(mut self, bytes: usize) -> Self {
        self.max_file_size = bytes;
        self
    }

    /// Sets the maximum number of links per file.
    pub fn max_links(mut self, count: usize) -> Self {
        self.max_links = count;
        self
    }

    /// Sets the maximum number of news entries per file.
    pub fn max_news(mut self, count: usize) -> Self {
        self.max_news = count;
        self
    }

    /// Sets the maximum number of files in one index.
    pub fn max_sitemaps(mut self, count: usize) -> Self {
        self.max_sitemaps = count;
        self
    }

    /// Rejects limits that would make every add overflow.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOption`] if any limit is zero.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("max_file_size", self.max_file_size),
            ("max_links", self.max_links),
            ("max_news", self.max_news),
            ("max_sitemaps", self.max_sitemaps),
        ];
        match fields.iter().find(|(_, value)| *value == 0) {
            Some((name, _)) => Err(Error::InvalidOption(format!("{name} must be non-zero"))),
            None => Ok(()),
        }
    }
}
