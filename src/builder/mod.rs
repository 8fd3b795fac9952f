//! Accumulation of serialized records into sitemap documents.
//!
//! [`BuilderFile`] collects `<url>` records for one sitemap file and
//! [`IndexBuilder`] collects `<sitemap>` references for the index. When a
//! record does not fit, [`BuilderFile::add`] returns [`Full`] and leaves the
//! builder unchanged; the caller flushes and offers the same record again.
//!
//! ```rust
//! use std::sync::Arc;
//! use sitemap_writer::adapter::MemoryAdapter;
//! use sitemap_writer::builder::{BuilderFile, Record};
//! use sitemap_writer::location::{Location, Namer, NamerOptions};
//! use sitemap_writer::{Limits, SearchEngine};
//!
//! let adapter = Arc::new(MemoryAdapter::new());
//! let namer = Namer::new(NamerOptions::new("sitemap"))?;
//! let mut location = Location::new(namer, "http://www.example.com", adapter.clone())?;
//! let mut builder = BuilderFile::new(Limits::new().max_links(2), SearchEngine::Common);
//!
//! for record in ["<url>1</url>", "<url>2</url>", "<url>3</url>"].map(Record::new) {
//!     if builder.add(&record).is_err() {
//!         builder.write(&mut location)?;
//!         builder.add(&record)?;
//!     }
//! }
//! builder.write(&mut location)?;
//!
//! assert_eq!(location.namer().issued(), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod file;
mod index;
mod record;

pub use file::BuilderFile;
pub use index::IndexBuilder;
pub use record::Record;

/// Which limit a rejected record would have exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullReason {
    /// The payload would reach `max_file_size`.
    FileSize,
    /// The file already holds `max_links` links.
    Links,
    /// The file already holds `max_news` news entries.
    News,
}

impl std::fmt::Display for FullReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FileSize => write!(f, "file size limit reached"),
            Self::Links => write!(f, "link limit reached"),
            Self::News => write!(f, "news limit reached"),
        }
    }
}

/// Signal that a record does not fit into the current file.
///
/// This is ordinary control flow, not a failure: flush the builder and add
/// the same record again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("sitemap file is full: {reason}")]
pub struct Full {
    /// The limit that was hit.
    pub reason: FullReason,
}

impl Full {
    pub(crate) fn new(reason: FullReason) -> Self {
        Self { reason }
    }
}
