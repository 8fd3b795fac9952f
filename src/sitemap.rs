//! Sitemap generation runs.
//!
//! [`Sitemap`] drives the whole pipeline: it serializes each URL, offers it
//! to the current [`BuilderFile`], flushes when the file is full, retries the
//! same record in the next file, and writes the index on
//! [`finalize`](Sitemap::finalize).

use url::Url;

use crate::builder::{BuilderFile, IndexBuilder, Record};
use crate::entry::SitemapUrl;
use crate::location::{Location, WrittenFile};
use crate::options::{CreateIndex, Options};
use crate::template::SearchEngine;
use crate::{Error, Result};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Outcome of a finalized sitemap run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapResult {
    /// Sitemap files in write order.
    pub files: Vec<WrittenFile>,
    /// The index file, if one was written.
    pub index: Option<WrittenFile>,
    /// Links across all sitemap files.
    pub total_links: usize,
}

impl SitemapResult {
    /// Returns the number of sitemap files written, excluding the index.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Returns the URL crawlers should be pointed at: the index if one was
    /// written, otherwise the first sitemap file.
    pub fn entry_point(&self) -> Option<&str> {
        self.index
            .as_ref()
            .or_else(|| self.files.first())
            .map(|f| f.url.as_str())
    }
}

/// A sitemap generation run.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use sitemap_writer::adapter::MemoryAdapter;
/// use sitemap_writer::{Limits, Options, Sitemap, SitemapUrl};
///
/// let adapter = Arc::new(MemoryAdapter::new());
/// let options = Options::new()
///     .compress(false)
///     .limits(Limits::new().max_links(2))
///     .adapter(adapter.clone());
///
/// let mut sitemap = Sitemap::new(options)?;
/// for loc in ["/", "/about", "/contact"] {
///     sitemap.add(&SitemapUrl::new(loc))?;
/// }
/// let result = sitemap.finalize()?;
///
/// assert_eq!(result.file_count(), 2);
/// assert_eq!(result.total_links, 3);
/// assert_eq!(
///     result.entry_point(),
///     Some("http://www.example.com/sitemap_index.xml")
/// );
/// # Ok::<(), sitemap_writer::Error>(())
/// ```
#[derive(Debug)]
pub struct Sitemap {
    host: Url,
    engine: SearchEngine,
    create_index: CreateIndex,
    location: Location,
    index_location: Location,
    builder: BuilderFile,
    index: IndexBuilder,
    files: Vec<WrittenFile>,
}

impl Sitemap {
    /// Starts a run.
    ///
    /// # Errors
    ///
    /// Returns an error if the options fail [`Options::validate`].
    pub fn new(options: Options) -> Result<Self> {
        options.validate()?;

        Ok(Self {
            host: options.default_host_url()?,
            engine: options.search_engine,
            create_index: options.create_index,
            location: options.location()?,
            index_location: options.index_location()?,
            builder: BuilderFile::new(options.limits, options.search_engine),
            index: IndexBuilder::new(&options.limits),
            files: Vec::new(),
        })
    }

    /// Serializes and adds a URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if the URL cannot be serialized, and
    /// otherwise whatever [`add_record`](Self::add_record) returns.
    pub fn add(&mut self, url: &SitemapUrl) -> Result<()> {
        let record = Record::from_url(url, &self.host, self.engine)?;
        self.add_record(&record)
    }

    /// Adds an already serialized record.
    ///
    /// When the current file is full it is flushed and the record goes into
    /// the next file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordTooLarge`] if the record cannot fit even into
    /// an empty file, or an error from flushing.
    pub fn add_record(&mut self, record: &Record) -> Result<()> {
        if let Err(full) = self.builder.add(record) {
            if self.builder.is_empty() {
                return Err(self.too_large(record));
            }
            log::debug!("{}, starting a new file", full);
            self.flush()?;
            self.builder
                .add(record)
                .map_err(|_| self.too_large(record))?;
        }
        Ok(())
    }

    /// Serializes and adds many URLs, preserving their order.
    ///
    /// With the `parallel` feature, serialization runs on the rayon thread
    /// pool. Records are always accumulated in input order. The first
    /// serialization error stops the run; URLs before it have been added.
    pub fn add_all(&mut self, urls: &[SitemapUrl]) -> Result<()> {
        let host = self.host.clone();
        let engine = self.engine;

        #[cfg(feature = "parallel")]
        let records: Vec<Result<Record>> = urls
            .par_iter()
            .map(|url| Record::from_url(url, &host, engine))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let records = urls
            .iter()
            .map(|url| Record::from_url(url, &host, engine));

        for record in records {
            self.add_record(&record?)?;
        }
        Ok(())
    }

    /// Writes the current file and references it in the index.
    fn flush(&mut self) -> Result<()> {
        let track = self.create_index != CreateIndex::Never;
        if track && self.index.is_full() {
            return Err(Error::TooManySitemaps {
                limit: self.builder.limits().max_sitemaps,
            });
        }

        let written = self.builder.write(&mut self.location)?;
        if track {
            self.index.add(&written)?;
        }
        self.files.push(written);
        Ok(())
    }

    fn too_large(&self, record: &Record) -> Error {
        Error::RecordTooLarge {
            size: record.len(),
            limit: self.builder.limits().max_file_size,
        }
    }

    /// Returns the files written so far.
    pub fn files(&self) -> &[WrittenFile] {
        &self.files
    }

    /// Returns the builder for the file currently being filled.
    pub fn current(&self) -> &BuilderFile {
        &self.builder
    }

    /// Flushes the last file and writes the index.
    ///
    /// A run without any URL still produces one empty sitemap so that the
    /// published URL always resolves.
    pub fn finalize(mut self) -> Result<SitemapResult> {
        if !self.builder.is_empty() || self.files.is_empty() {
            self.flush()?;
        }

        let write_index = match self.create_index {
            CreateIndex::Always => true,
            CreateIndex::Auto => self.files.len() > 1,
            CreateIndex::Never => false,
        };
        let index = if write_index {
            Some(self.index.write(&mut self.index_location)?)
        } else {
            None
        };

        let total_links = self.files.iter().map(|f| f.link_count).sum();
        log::debug!(
            "sitemap finalized: {} files, {} links{}",
            self.files.len(),
            total_links,
            if index.is_some() { ", with index" } else { "" }
        );

        Ok(SitemapResult {
            files: self.files,
            index,
            total_links,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Limits;
    use crate::adapter::MemoryAdapter;
    use std::sync::Arc;

    fn options(adapter: Arc<MemoryAdapter>, limits: Limits) -> Options {
        Options::new()
            .compress(false)
            .verbose(false)
            .limits(limits)
            .adapter(adapter)
    }

    #[test]
    fn test_split_on_link_limit() {
        let adapter = Arc::new(MemoryAdapter::new());
        let mut sitemap = Sitemap::new(options(adapter.clone(), Limits::new().max_links(2))).unwrap();

        for loc in ["/r1", "/r2", "/r3"] {
            sitemap.add(&SitemapUrl::new(loc)).unwrap();
        }
        assert_eq!(sitemap.files().len(), 1);
        assert_eq!(sitemap.current().link_count(), 1);

        let result = sitemap.finalize().unwrap();
        let names: Vec<_> = result.files.iter().map(|f| f.filename.as_str()).collect();
        assert_eq!(names, ["sitemap.xml", "sitemap-2.xml"]);
        assert_eq!(result.files[0].link_count, 2);
        assert_eq!(result.files[1].link_count, 1);
        assert_eq!(
            result.index.as_ref().unwrap().filename,
            "sitemap_index.xml"
        );
        assert_eq!(adapter.len(), 3);
    }

    #[test]
    fn test_single_file_has_no_index_by_default() {
        let adapter = Arc::new(MemoryAdapter::new());
        let mut sitemap = Sitemap::new(options(adapter.clone(), Limits::default())).unwrap();
        sitemap.add(&SitemapUrl::new("/")).unwrap();

        let result = sitemap.finalize().unwrap();
        assert!(result.index.is_none());
        assert_eq!(
            result.entry_point(),
            Some("http://www.example.com/sitemap.xml")
        );
    }

    #[test]
    fn test_create_index_always() {
        let adapter = Arc::new(MemoryAdapter::new());
        let opts = options(adapter.clone(), Limits::default()).create_index(CreateIndex::Always);
        let mut sitemap = Sitemap::new(opts).unwrap();
        sitemap.add(&SitemapUrl::new("/")).unwrap();

        let result = sitemap.finalize().unwrap();
        let index = result.index.unwrap();
        assert_eq!(index.link_count, 1);
        let doc = String::from_utf8(adapter.get(&index.path).unwrap()).unwrap();
        assert!(doc.contains("<loc>http://www.example.com/sitemap.xml</loc>"));
    }

    #[test]
    fn test_create_index_never() {
        let adapter = Arc::new(MemoryAdapter::new());
        let opts = options(adapter.clone(), Limits::new().max_links(1))
            .create_index(CreateIndex::Never);
        let mut sitemap = Sitemap::new(opts).unwrap();
        sitemap.add(&SitemapUrl::new("/a")).unwrap();
        sitemap.add(&SitemapUrl::new("/b")).unwrap();

        let result = sitemap.finalize().unwrap();
        assert_eq!(result.file_count(), 2);
        assert!(result.index.is_none());
        assert_eq!(adapter.len(), 2);
    }

    #[test]
    fn test_empty_run_writes_empty_sitemap() {
        let adapter = Arc::new(MemoryAdapter::new());
        let result = Sitemap::new(options(adapter.clone(), Limits::default()))
            .unwrap()
            .finalize()
            .unwrap();

        assert_eq!(result.file_count(), 1);
        assert_eq!(result.total_links, 0);
        let doc = String::from_utf8(adapter.get("public/sitemap.xml").unwrap()).unwrap();
        assert!(doc.ends_with("></urlset>"));
    }

    #[test]
    fn test_record_too_large() {
        let adapter = Arc::new(MemoryAdapter::new());
        let mut sitemap =
            Sitemap::new(options(adapter.clone(), Limits::new().max_file_size(16))).unwrap();

        let err = sitemap
            .add_record(&Record::new(vec![b'x'; 16]))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::RecordTooLarge {
                size: 16,
                limit: 16
            }
        ));
        assert!(adapter.is_empty());
    }

    #[test]
    fn test_record_too_large_after_flush() {
        let adapter = Arc::new(MemoryAdapter::new());
        let mut sitemap =
            Sitemap::new(options(adapter.clone(), Limits::new().max_file_size(16))).unwrap();

        sitemap.add_record(&Record::new("small")).unwrap();
        let err = sitemap
            .add_record(&Record::new(vec![b'x'; 20]))
            .unwrap_err();
        assert!(matches!(err, Error::RecordTooLarge { size: 20, .. }));
        // The pending file was flushed before the record was found too large
        assert_eq!(sitemap.files().len(), 1);
    }

    #[test]
    fn test_invalid_url_is_not_added() {
        let adapter = Arc::new(MemoryAdapter::new());
        let mut sitemap = Sitemap::new(options(adapter, Limits::default())).unwrap();

        let err = sitemap.add(&SitemapUrl::new("")).unwrap_err();
        assert!(err.is_record_error());
        assert!(sitemap.current().is_empty());
    }

    #[test]
    fn test_add_all_preserves_order() {
        let adapter = Arc::new(MemoryAdapter::new());
        let mut sitemap = Sitemap::new(options(adapter.clone(), Limits::new().max_links(3))).unwrap();

        let urls: Vec<_> = (0..7).map(|i| SitemapUrl::new(format!("/p{i}"))).collect();
        sitemap.add_all(&urls).unwrap();
        let result = sitemap.finalize().unwrap();

        assert_eq!(result.file_count(), 3);
        assert_eq!(result.total_links, 7);

        let joined: String = adapter
            .documents()
            .iter()
            .take(3)
            .map(|(_, d)| String::from_utf8(d.clone()).unwrap())
            .collect();
        let positions: Vec<_> = (0..7)
            .map(|i| joined.find(&format!("/p{i}</loc>")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_too_many_sitemaps() {
        let adapter = Arc::new(MemoryAdapter::new());
        let limits = Limits::new().max_links(1).max_sitemaps(1);
        let mut sitemap = Sitemap::new(options(adapter.clone(), limits)).unwrap();

        sitemap.add(&SitemapUrl::new("/a")).unwrap();
        sitemap.add(&SitemapUrl::new("/b")).unwrap();
        let err = sitemap.add(&SitemapUrl::new("/c")).unwrap_err();
        assert!(matches!(err, Error::TooManySitemaps { limit: 1 }));
        assert_eq!(adapter.len(), 1);
    }

    #[test]
    fn test_host_path_shared_by_files_and_locs() {
        let adapter = Arc::new(MemoryAdapter::new());
        let opts = options(adapter.clone(), Limits::default())
            .default_host("https://www.example.com/shop");
        let mut sitemap = Sitemap::new(opts).unwrap();
        sitemap.add(&SitemapUrl::new("item-1")).unwrap();

        let result = sitemap.finalize().unwrap();
        let file = &result.files[0];
        assert_eq!(file.url, "https://www.example.com/shop/sitemap.xml");

        let doc = String::from_utf8(adapter.get(&file.path).unwrap()).unwrap();
        assert!(doc.contains("<loc>https://www.example.com/shop/item-1</loc>"));
    }

    #[test]
    fn test_invalid_options_rejected() {
        let err = Sitemap::new(Options::new().default_host("not a host")).unwrap_err();
        assert!(err.is_configuration_error());
    }
}
