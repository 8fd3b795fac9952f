//! Builder for the sitemap index document.

use crate::entry::format_time;
use crate::limits::Limits;
use crate::location::{Location, WrittenFile};
use crate::template::{INDEX_XML_FOOTER, INDEX_XML_HEADER, normalize_header};
use crate::{Error, Result};

/// Accumulates `<sitemap>` entries for the index document.
#[derive(Debug, Clone)]
pub struct IndexBuilder {
    content: Vec<u8>,
    sitemap_count: usize,
    total_links: usize,
    max_sitemaps: usize,
    header: String,
}

impl IndexBuilder {
    /// Creates an empty index builder.
    pub fn new(limits: &Limits) -> Self {
        Self {
            content: Vec::new(),
            sitemap_count: 0,
            total_links: 0,
            max_sitemaps: limits.max_sitemaps,
            header: normalize_header(INDEX_XML_HEADER),
        }
    }

    /// References a written sitemap file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TooManySitemaps`] once `max_sitemaps` files are
    /// referenced.
    pub fn add(&mut self, file: &WrittenFile) -> Result<()> {
        if self.sitemap_count >= self.max_sitemaps {
            return Err(Error::TooManySitemaps {
                limit: self.max_sitemaps,
            });
        }

        let entry = format!(
            "<sitemap><loc>{}</loc><lastmod>{}</lastmod></sitemap>",
            quick_xml::escape::escape(file.url.as_str()),
            format_time(&file.written_at)
        );
        self.content.extend_from_slice(entry.as_bytes());
        self.sitemap_count += 1;
        self.total_links += file.link_count;
        Ok(())
    }

    /// Returns the complete index document.
    pub fn document(&self) -> Vec<u8> {
        let mut doc = Vec::with_capacity(
            self.header.len() + self.content.len() + INDEX_XML_FOOTER.len(),
        );
        doc.extend_from_slice(self.header.as_bytes());
        doc.extend_from_slice(&self.content);
        doc.extend_from_slice(INDEX_XML_FOOTER.as_bytes());
        doc
    }

    /// Writes the index through `location` and resets the builder.
    ///
    /// The written file's link count is the total across all referenced
    /// sitemaps.
    pub fn write(&mut self, location: &mut Location) -> Result<WrittenFile> {
        let reserved = location.reserve_name()?;
        let doc = self.document();
        let total_links = self.total_links;
        self.content.clear();
        self.sitemap_count = 0;
        self.total_links = 0;
        location.write(reserved, &doc, total_links)
    }

    /// Returns `true` if no further sitemap can be referenced.
    pub fn is_full(&self) -> bool {
        self.sitemap_count >= self.max_sitemaps
    }

    /// Returns the number of referenced sitemaps.
    pub fn sitemap_count(&self) -> usize {
        self.sitemap_count
    }

    /// Returns the sum of links across referenced sitemaps.
    pub fn total_links(&self) -> usize {
        self.total_links
    }
}
