//! Error types for sitemap generation.
//!
//! This module provides the [`Error`] enum which represents every failure
//! that can stop a sitemap run, along with a convenient [`Result<T>`] type
//! alias.
//!
//! A file reaching its capacity is *not* an error. [`BuilderFile::add`]
//! reports that through the [`Full`] signal so the caller can flush and
//! retry the same record.
//!
//! # Error Handling
//!
//! ```rust,no_run
//! use sitemap_writer::{Error, Options, Sitemap, SitemapUrl};
//!
//! fn build(urls: &[&str]) -> sitemap_writer::Result<()> {
//!     let mut sitemap = Sitemap::new(Options::new())?;
//!     for loc in urls {
//!         match sitemap.add(&SitemapUrl::new(*loc)) {
//!             Ok(()) => {}
//!             // Skip malformed entries but keep everything else
//!             Err(Error::InvalidUrl { loc, reason }) => {
//!                 eprintln!("skipping {}: {}", loc, reason);
//!             }
//!             Err(e) => return Err(e),
//!         }
//!     }
//!     sitemap.finalize()?;
//!     Ok(())
//! }
//! ```
//!
//! [`BuilderFile::add`]: crate::builder::BuilderFile::add
//! [`Full`]: crate::builder::Full

use std::io;

/// The main error type for sitemap operations.
///
/// # Error Categories
///
/// | Category | Variants | Typical Cause |
/// |----------|----------|---------------|
/// | I/O | [`Io`][Self::Io] | Adapter could not persist a document |
/// | Input | [`InvalidUrl`][Self::InvalidUrl], [`RecordTooLarge`][Self::RecordTooLarge] | Malformed or oversized records |
/// | Configuration | [`InvalidOption`][Self::InvalidOption], [`UnsupportedFeature`][Self::UnsupportedFeature] | Bad options or missing cargo features |
/// | Capacity | [`TooManySitemaps`][Self::TooManySitemaps] | Index cannot reference more files |
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An I/O error occurred while persisting a document.
    ///
    /// Adapters propagate these verbatim. The builder that produced the
    /// document has already been reset, so retrying is the caller's concern.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A URL record could not be serialized.
    ///
    /// Returned when `loc` is empty or cannot be resolved against the
    /// configured host. The record is never written.
    #[error("Invalid URL '{loc}': {reason}")]
    InvalidUrl {
        /// The location as given by the caller.
        loc: String,
        /// Why serialization failed.
        reason: String,
    },

    /// A configuration value is invalid.
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// A single record does not fit into an empty sitemap file.
    ///
    /// Flushing cannot help here, so the record is rejected outright.
    #[error("Record of {size} bytes exceeds the file size limit of {limit} bytes")]
    RecordTooLarge {
        /// Serialized size of the record.
        size: usize,
        /// Configured `max_file_size`.
        limit: usize,
    },

    /// The sitemap index already references the maximum number of files.
    #[error("Sitemap index is full: at most {limit} sitemaps can be referenced")]
    TooManySitemaps {
        /// Configured `max_sitemaps`.
        limit: usize,
    },

    /// A feature required by the configuration is not compiled in.
    #[error("Unsupported feature: {feature}")]
    UnsupportedFeature {
        /// The name of the missing cargo feature.
        feature: &'static str,
    },
}

impl Error {
    /// Returns `true` if this error might be recoverable.
    ///
    /// Only transient I/O errors qualify: the caller can rebuild the
    /// document and try the adapter again.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sitemap_writer::Error;
    ///
    /// let err = Error::Io(std::io::Error::from(std::io::ErrorKind::Interrupted));
    /// assert!(err.is_recoverable());
    /// ```
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::Io(e) => matches!(
                e.kind(),
                io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted | io::ErrorKind::TimedOut
            ),
            _ => false,
        }
    }

    /// Returns `true` if this error comes from invalid configuration.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidOption(_) | Error::UnsupportedFeature { .. }
        )
    }

    /// Returns `true` if this error was raised by the persistence layer.
    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io(_))
    }

    /// Returns `true` if this error was caused by a single bad record.
    ///
    /// Callers that prefer skip-and-continue can match on this.
    pub fn is_record_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidUrl { .. } | Error::RecordTooLarge { .. }
        )
    }

    pub(crate) fn invalid_url(loc: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidUrl {
            loc: loc.into(),
            reason: reason.into(),
        }
    }
}

/// A specialized Result type for sitemap operations.
///
/// ```rust
/// use sitemap_writer::Result;
///
/// fn my_function() -> Result<()> {
///     Ok(())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;
