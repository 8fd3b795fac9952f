//! Output locations for sitemap documents.
//!
//! A [`Location`] pairs a [`Namer`] with an output directory, a public URL
//! and an [`Adapter`]. Every flush follows the same two steps:
//!
//! 1. [`Location::reserve_name`] takes the next name from the namer and
//!    returns a [`ReservedName`] token. No I/O happens here.
//! 2. [`Location::write`] consumes that token and persists the document
//!    through the adapter.
//!
//! Because the token is consumed, a reservation can be written at most once.
//!
//! # Naming Convention
//!
//! With the default scheme and compression enabled:
//! - `public/sitemap.xml.gz` - First file
//! - `public/sitemap-2.xml.gz` - Second file
//! - `public/sitemap-3.xml.gz` - Third file
//! - `public/sitemap_index.xml.gz` - Index (from the index location)

mod namer;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use url::Url;

use crate::adapter::Adapter;
use crate::{Error, Result};

pub use namer::{Namer, NamerOptions};

/// A destination reserved for exactly one document.
///
/// The token is neither `Clone` nor `Copy`, and [`Location::write`] takes it
/// by value, so a reservation cannot be written twice:
///
/// ```compile_fail
/// use std::sync::Arc;
/// use sitemap_writer::adapter::MemoryAdapter;
/// use sitemap_writer::location::{Location, Namer, NamerOptions};
///
/// let namer = Namer::new(NamerOptions::default()).unwrap();
/// let adapter = Arc::new(MemoryAdapter::new());
/// let mut location = Location::new(namer, "http://www.example.com", adapter).unwrap();
///
/// let reserved = location.reserve_name().unwrap();
/// location.write(reserved.clone(), b"first", 1).unwrap();
/// ```
///
/// ```compile_fail
/// use std::sync::Arc;
/// use sitemap_writer::adapter::MemoryAdapter;
/// use sitemap_writer::location::{Location, Namer, NamerOptions};
///
/// let namer = Namer::new(NamerOptions::default()).unwrap();
/// let adapter = Arc::new(MemoryAdapter::new());
/// let mut location = Location::new(namer, "http://www.example.com", adapter).unwrap();
///
/// let reserved = location.reserve_name().unwrap();
/// location.write(reserved, b"first", 1).unwrap();
/// location.write(reserved, b"second", 1).unwrap();
/// ```
#[derive(Debug, PartialEq, Eq)]
pub struct ReservedName {
    filename: String,
    path: PathBuf,
    url: String,
}

impl ReservedName {
    /// File name including extension, e.g. `sitemap-2.xml.gz`.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Filesystem path the adapter will write to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Public URL of the document.
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// A document that has been persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    /// File name including extension.
    pub filename: String,
    /// Filesystem path the document was written to.
    pub path: PathBuf,
    /// Public URL of the document.
    pub url: String,
    /// Number of links in the document.
    pub link_count: usize,
    /// Uncompressed document size in bytes.
    pub size: usize,
    /// When the document was handed to the adapter.
    pub written_at: DateTime<Utc>,
}

impl WrittenFile {
    /// Returns a one-line summary such as `+ sitemap.xml.gz  12 links / 3.4 KB`.
    pub fn summary(&self) -> String {
        format!(
            "+ {:<40} {:>7} links / {:>10}",
            self.filename,
            self.link_count,
            humanize_bytes(self.size as u64)
        )
    }
}

/// Binds a namer to an output path, a public URL and an adapter.
pub struct Location {
    namer: Namer,
    public_path: PathBuf,
    sitemaps_path: String,
    host: Url,
    compress: bool,
    verbose: bool,
    adapter: Arc<dyn Adapter>,
}

impl std::fmt::Debug for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Location")
            .field("namer", &self.namer)
            .field("public_path", &self.public_path)
            .field("sitemaps_path", &self.sitemaps_path)
            .field("host", &self.host.as_str())
            .field("compress", &self.compress)
            .field("verbose", &self.verbose)
            .finish_non_exhaustive()
    }
}

impl Location {
    /// Creates a location writing uncompressed files to the current
    /// directory, published under `host`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOption`] if `host` is not an absolute URL
    /// that other paths can be joined onto.
    pub fn new(namer: Namer, host: &str, adapter: Arc<dyn Adapter>) -> Result<Self> {
        Ok(Self {
            namer,
            public_path: PathBuf::new(),
            sitemaps_path: String::new(),
            host: base_url(host).map_err(Error::InvalidOption)?,
            compress: false,
            verbose: false,
            adapter,
        })
    }

    /// Sets the local directory files are written under.
    pub fn public_path(mut self, path: impl AsRef<Path>) -> Self {
        self.public_path = path.as_ref().to_path_buf();
        self
    }

    /// Sets the sub-path shared by the filesystem path and the public URL.
    pub fn sitemaps_path(mut self, path: &str) -> Self {
        let trimmed = path.trim_matches('/');
        self.sitemaps_path = if trimmed.is_empty() {
            String::new()
        } else {
            format!("{trimmed}/")
        };
        self
    }

    /// Enables gzip output (`.xml.gz` names).
    pub fn compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Logs file summaries at `info` instead of `debug`.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Returns the file extension in use.
    pub fn extension(&self) -> &'static str {
        if self.compress { ".xml.gz" } else { ".xml" }
    }

    /// Returns the namer.
    pub fn namer(&self) -> &Namer {
        &self.namer
    }

    /// Reserves the next destination.
    ///
    /// The namer advances only when the reservation succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOption`] if the name cannot be joined onto
    /// the host URL.
    pub fn reserve_name(&mut self) -> Result<ReservedName> {
        let filename = format!("{}{}", self.namer.peek(), self.extension());
        let relative = format!("{}{}", self.sitemaps_path, filename);
        let url = self.host.join(&relative).map_err(|e| {
            Error::InvalidOption(format!(
                "cannot build URL for '{}' on {}: {}",
                relative, self.host, e
            ))
        })?;
        self.namer.next();

        Ok(ReservedName {
            path: self.public_path.join(&relative),
            filename,
            url: url.to_string(),
        })
    }

    /// Persists a finished document at a reserved destination.
    ///
    /// # Errors
    ///
    /// Propagates whatever the adapter returns.
    pub fn write(
        &self,
        reserved: ReservedName,
        data: &[u8],
        link_count: usize,
    ) -> Result<WrittenFile> {
        self.adapter.write(&reserved.path, data)?;

        let written = WrittenFile {
            filename: reserved.filename,
            path: reserved.path,
            url: reserved.url,
            link_count,
            size: data.len(),
            written_at: Utc::now(),
        };

        if self.verbose {
            log::info!("{}", written.summary());
        } else {
            log::debug!("{}", written.summary());
        }
        Ok(written)
    }
}

/// Parses `host` as a base URL that relative paths are joined under.
///
/// Returns the failure reason so callers can pick the error variant.
pub(crate) fn base_url(host: &str) -> std::result::Result<Url, String> {
    let mut url = Url::parse(host).map_err(|e| format!("invalid host '{host}': {e}"))?;
    if url.cannot_be_a_base() {
        return Err(format!("host '{host}' cannot be used as a base URL"));
    }
    // Without a trailing slash, join() would replace the last path segment
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Converts bytes to a human-readable string.
fn humanize_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::MemoryAdapter;

    fn location(adapter: Arc<MemoryAdapter>) -> Location {
        let namer = Namer::new(NamerOptions::new("sitemap")).unwrap();
        Location::new(namer, "http://www.example.com", adapter)
            .unwrap()
            .public_path("public")
            .sitemaps_path("sitemaps")
    }

    #[test]
    fn test_reserve_name_sequence() {
        let mut loc = location(Arc::new(MemoryAdapter::new()));

        let first = loc.reserve_name().unwrap();
        assert_eq!(first.filename(), "sitemap.xml");
        assert_eq!(first.path(), Path::new("public/sitemaps/sitemap.xml"));
        assert_eq!(first.url(), "http://www.example.com/sitemaps/sitemap.xml");

        let second = loc.reserve_name().unwrap();
        assert_eq!(second.filename(), "sitemap-2.xml");
        assert_eq!(loc.namer().issued(), 2);
    }

    #[test]
    fn test_compressed_extension() {
        let mut loc = location(Arc::new(MemoryAdapter::new())).compress(true);
        assert_eq!(loc.reserve_name().unwrap().filename(), "sitemap.xml.gz");
    }

    #[test]
    fn test_host_with_path() {
        let namer = Namer::new(NamerOptions::default()).unwrap();
        let mut loc = Location::new(
            namer,
            "https://s3.amazonaws.com/bucket",
            Arc::new(MemoryAdapter::new()),
        )
        .unwrap()
        .sitemaps_path("/maps/");

        let reserved = loc.reserve_name().unwrap();
        assert_eq!(
            reserved.url(),
            "https://s3.amazonaws.com/bucket/maps/sitemap.xml"
        );
        assert_eq!(reserved.path(), Path::new("maps/sitemap.xml"));
    }

    #[test]
    fn test_invalid_host() {
        let namer = Namer::new(NamerOptions::default()).unwrap();
        let err = Location::new(namer, "example.com", Arc::new(MemoryAdapter::new())).unwrap_err();
        assert!(err.is_configuration_error());

        let namer = Namer::new(NamerOptions::default()).unwrap();
        assert!(Location::new(namer, "mailto:me@example.com", Arc::new(MemoryAdapter::new())).is_err());
    }

    #[test]
    fn test_write_uses_reserved_path() {
        let adapter = Arc::new(MemoryAdapter::new());
        let mut loc = location(adapter.clone());

        let reserved = loc.reserve_name().unwrap();
        let written = loc.write(reserved, b"<urlset></urlset>", 3).unwrap();

        assert_eq!(written.link_count, 3);
        assert_eq!(written.size, 17);
        assert_eq!(
            adapter.get("public/sitemaps/sitemap.xml").unwrap(),
            b"<urlset></urlset>"
        );
    }

    #[test]
    fn test_summary() {
        let written = WrittenFile {
            filename: "sitemap.xml".into(),
            path: PathBuf::from("sitemap.xml"),
            url: "http://www.example.com/sitemap.xml".into(),
            link_count: 12,
            size: 2048,
            written_at: Utc::now(),
        };
        let summary = written.summary();
        assert!(summary.starts_with("+ sitemap.xml"));
        assert!(summary.contains("12 links"));
        assert!(summary.ends_with("2.0 KB"));
    }

    #[test]
    fn test_humanize_bytes() {
        assert_eq!(humanize_bytes(10), "10 B");
        assert_eq!(humanize_bytes(1536), "1.5 KB");
        assert_eq!(humanize_bytes(3 * 1024 * 1024), "3.0 MB");
    }
}
