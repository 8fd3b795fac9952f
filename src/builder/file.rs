//! Capacity-aware builder for a single sitemap file.

use crate::Result;
use crate::limits::Limits;
use crate::location::{Location, WrittenFile};
use crate::template::{SearchEngine, XML_FOOTER, normalize_header};

use super::{Full, FullReason, Record};

/// Accumulates records for one sitemap file.
///
/// Records are appended by [`add`](Self::add) until one of the limits would
/// be exceeded. [`write`](Self::write) then wraps the payload in the header
/// and footer, persists it through a [`Location`], and empties the builder
/// so it can be reused for the next file.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use sitemap_writer::adapter::MemoryAdapter;
/// use sitemap_writer::builder::{BuilderFile, Record};
/// use sitemap_writer::location::{Location, Namer, NamerOptions};
/// use sitemap_writer::{Limits, SearchEngine};
///
/// let adapter = Arc::new(MemoryAdapter::new());
/// let namer = Namer::new(NamerOptions::new("sitemap"))?;
/// let mut location = Location::new(namer, "http://www.example.com", adapter.clone())?;
///
/// let mut builder = BuilderFile::new(Limits::new().max_links(1), SearchEngine::Common);
/// builder.add(&Record::new("<url><loc>http://www.example.com/</loc></url>"))?;
/// assert!(builder.add(&Record::new("<url/>")).is_err());
///
/// let written = builder.write(&mut location)?;
/// assert_eq!(written.filename, "sitemap.xml");
/// assert!(builder.is_empty());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct BuilderFile {
    content: Vec<u8>,
    link_count: usize,
    news_count: usize,
    limits: Limits,
    header: String,
}

impl BuilderFile {
    /// Creates an empty builder.
    ///
    /// The header for `engine` is normalized once here and reused by every
    /// flush.
    pub fn new(limits: Limits, engine: SearchEngine) -> Self {
        Self {
            content: Vec::new(),
            link_count: 0,
            news_count: 0,
            limits,
            header: normalize_header(engine.header()),
        }
    }

    /// Appends a record if it fits.
    ///
    /// # Errors
    ///
    /// Returns [`Full`] if the record would push the payload to
    /// `max_file_size` bytes or beyond, or if the link or news count has
    /// already reached its limit. The builder is left untouched in that case.
    pub fn add(&mut self, record: &Record) -> std::result::Result<(), Full> {
        self.check_fits(record)?;

        self.content.extend_from_slice(record.as_bytes());
        self.link_count += 1;
        if record.is_news() {
            self.news_count += 1;
        }
        Ok(())
    }

    fn check_fits(&self, record: &Record) -> std::result::Result<(), Full> {
        if self.content.len() + record.len() >= self.limits.max_file_size {
            return Err(Full::new(FullReason::FileSize));
        }
        if self.link_count >= self.limits.max_links {
            return Err(Full::new(FullReason::Links));
        }
        if record.is_news() && self.news_count >= self.limits.max_news {
            return Err(Full::new(FullReason::News));
        }
        Ok(())
    }

    /// Returns the complete document for the current payload.
    pub fn document(&self) -> Vec<u8> {
        let mut doc =
            Vec::with_capacity(self.header.len() + self.content.len() + XML_FOOTER.len());
        doc.extend_from_slice(self.header.as_bytes());
        doc.extend_from_slice(&self.content);
        doc.extend_from_slice(XML_FOOTER.as_bytes());
        doc
    }

    /// Flushes the builder into one file.
    ///
    /// Reserves exactly one name on `location`, writes the document with
    /// the final link count, and resets the builder. The reset happens even
    /// if the adapter fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the name cannot be reserved or the adapter fails.
    pub fn write(&mut self, location: &mut Location) -> Result<WrittenFile> {
        let reserved = location.reserve_name()?;
        let doc = self.document();
        let link_count = self.link_count;
        self.clear();
        location.write(reserved, &doc, link_count)
    }

    /// Empties the payload and resets the counters.
    pub fn clear(&mut self) {
        self.content.clear();
        self.link_count = 0;
        self.news_count = 0;
    }

    /// Returns the accumulated record bytes, without header and footer.
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Returns the number of records added since the last flush.
    pub fn link_count(&self) -> usize {
        self.link_count
    }

    /// Returns the number of news records added since the last flush.
    pub fn news_count(&self) -> usize {
        self.news_count
    }

    /// Returns `true` if no record has been added since the last flush.
    pub fn is_empty(&self) -> bool {
        self.link_count == 0
    }

    /// Returns the limits this builder enforces.
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Returns the bytes added by header and footer at flush time.
    ///
    /// `max_file_size` does not include these.
    pub fn document_overhead(&self) -> usize {
        self.header.len() + XML_FOOTER.len()
    }
}
