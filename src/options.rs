//! Options and configuration for sitemap generation.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use url::Url;

use crate::adapter::{Adapter, FileAdapter};
use crate::limits::Limits;
use crate::location::{Location, Namer, NamerOptions, base_url};
use crate::template::SearchEngine;
use crate::{Error, Result};

/// When to write a sitemap index on finalize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CreateIndex {
    /// Only when more than one sitemap file was written.
    #[default]
    Auto,
    /// Always, even for a single file.
    Always,
    /// Never.
    Never,
}

/// Options for a sitemap run.
///
/// # Example
///
/// ```rust
/// use sitemap_writer::{Limits, Options, SearchEngine};
///
/// let options = Options::new()
///     .default_host("https://www.example.com")
///     .public_path("public")
///     .sitemaps_path("sitemaps")
///     .compress(false)
///     .search_engine(SearchEngine::Baidu)
///     .limits(Limits::new().max_links(10_000));
///
/// assert_eq!(options.sitemaps_host(), "https://www.example.com");
/// ```
#[derive(Clone)]
pub struct Options {
    /// Host that relative URL locations resolve against.
    pub default_host: String,
    /// Host the sitemap files are published under; falls back to `default_host`.
    pub sitemaps_host: Option<String>,
    /// Local directory files are written to.
    pub public_path: PathBuf,
    /// Sub-path shared by the written files and their public URLs.
    pub sitemaps_path: String,
    /// Base file name.
    pub filename: String,
    /// Whether to write gzip-compressed `.xml.gz` files.
    pub compress: bool,
    /// Whether to log per-file summaries at `info` level.
    pub verbose: bool,
    /// Search engine flavour.
    pub search_engine: SearchEngine,
    /// Capacity limits.
    pub limits: Limits,
    /// Numbering scheme for sitemap files. The base name is taken from
    /// `filename`.
    pub namer: NamerOptions,
    /// When to write the index.
    pub create_index: CreateIndex,
    /// Persistence adapter.
    pub adapter: Arc<dyn Adapter>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            default_host: "http://www.example.com".to_string(),
            sitemaps_host: None,
            public_path: PathBuf::from("public"),
            sitemaps_path: String::new(),
            filename: "sitemap".to_string(),
            compress: cfg!(feature = "gzip"),
            verbose: true,
            search_engine: SearchEngine::Common,
            limits: Limits::default(),
            namer: NamerOptions::default(),
            create_index: CreateIndex::Auto,
            adapter: Arc::new(FileAdapter::new()),
        }
    }
}

impl std::fmt::Debug for Options {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Options")
            .field("default_host", &self.default_host)
            .field("sitemaps_host", &self.sitemaps_host)
            .field("public_path", &self.public_path)
            .field("sitemaps_path", &self.sitemaps_path)
            .field("filename", &self.filename)
            .field("compress", &self.compress)
            .field("verbose", &self.verbose)
            .field("search_engine", &self.search_engine)
            .field("limits", &self.limits)
            .field("namer", &self.namer)
            .field("create_index", &self.create_index)
            .finish_non_exhaustive()
    }
}

impl Options {
    /// Creates new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the host relative locations resolve against.
    pub fn default_host(mut self, host: impl Into<String>) -> Self {
        self.default_host = host.into();
        self
    }

    /// Returns the host the sitemap files are published under.
    pub fn sitemaps_host(&self) -> &str {
        self.sitemaps_host.as_deref().unwrap_or(&self.default_host)
    }

    /// Publishes sitemap files under `host` instead of the default host.
    ///
    /// Useful when sitemaps live on a CDN or bucket rather than the site.
    pub fn with_sitemaps_host(mut self, host: impl Into<String>) -> Self {
        self.sitemaps_host = Some(host.into());
        self
    }

    /// Sets the local output directory.
    pub fn public_path(mut self, path: impl AsRef<Path>) -> Self {
        self.public_path = path.as_ref().to_path_buf();
        self
    }

    /// Sets the sub-path for sitemap files.
    pub fn sitemaps_path(mut self, path: impl Into<String>) -> Self {
        self.sitemaps_path = path.into();
        self
    }

    /// Sets the base file name.
    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    /// Enables or disables gzip output.
    pub fn compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Enables or disables per-file summaries at `info` level.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Sets the search engine flavour.
    pub fn search_engine(mut self, engine: SearchEngine) -> Self {
        self.search_engine = engine;
        self
    }

    /// Sets the capacity limits.
    pub fn limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Sets the numbering scheme for sitemap files.
    pub fn namer(mut self, namer: NamerOptions) -> Self {
        self.namer = namer;
        self
    }

    /// Sets when the index is written.
    pub fn create_index(mut self, policy: CreateIndex) -> Self {
        self.create_index = policy;
        self
    }

    /// Sets the persistence adapter.
    pub fn adapter(mut self, adapter: Arc<dyn Adapter>) -> Self {
        self.adapter = adapter;
        self
    }

    /// Parses the default host as the base relative locations join under.
    ///
    /// A host with a path keeps it: `https://example.com/shop` resolves
    /// `item-1` to `https://example.com/shop/item-1`, matching where the
    /// sitemap files themselves are published.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOption`] if it is not an absolute URL that
    /// can serve as a base.
    pub fn default_host_url(&self) -> Result<Url> {
        base_url(&self.default_host)
            .map_err(|reason| Error::InvalidOption(format!("default host: {reason}")))
    }

    /// Checks the options for values that can never work.
    pub fn validate(&self) -> Result<()> {
        self.limits.validate()?;
        self.namer.with_base(&self.filename).validate()?;
        self.default_host_url()?;
        #[cfg(not(feature = "gzip"))]
        if self.compress {
            return Err(Error::UnsupportedFeature { feature: "gzip" });
        }
        Ok(())
    }

    /// Builds the location for sitemap files.
    ///
    /// Every call creates a fresh namer, so a run should build its location
    /// once and keep it.
    pub fn location(&self) -> Result<Location> {
        let namer = Namer::new(self.namer.with_base(&self.filename))?;
        self.build_location(namer)
    }

    /// Builds the location for the index file.
    ///
    /// The index namer uses `{filename}_index` as its base, so the index
    /// never collides with a sitemap file name.
    pub fn index_location(&self) -> Result<Location> {
        let namer = Namer::new(self.namer.with_base(format!("{}_index", self.filename)))?;
        self.build_location(namer)
    }

    fn build_location(&self, namer: Namer) -> Result<Location> {
        Ok(
            Location::new(namer, self.sitemaps_host(), Arc::clone(&self.adapter))?
                .public_path(&self.public_path)
                .sitemaps_path(&self.sitemaps_path)
                .compress(self.compress)
                .verbose(self.verbose),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::MemoryAdapter;

    #[test]
    fn test_defaults() {
        let opts = Options::default();
        assert_eq!(opts.default_host, "http://www.example.com");
        assert_eq!(opts.sitemaps_host(), "http://www.example.com");
        assert_eq!(opts.public_path, PathBuf::from("public"));
        assert_eq!(opts.filename, "sitemap");
        assert_eq!(opts.create_index, CreateIndex::Auto);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_sitemaps_host_override() {
        let opts = Options::new().with_sitemaps_host("https://cdn.example.net/");
        assert_eq!(opts.sitemaps_host(), "https://cdn.example.net/");
    }

    #[test]
    fn test_locations_use_distinct_names() {
        let opts = Options::new()
            .compress(false)
            .adapter(Arc::new(MemoryAdapter::new()));

        let mut loc = opts.location().unwrap();
        let mut index = opts.index_location().unwrap();

        assert_eq!(loc.reserve_name().unwrap().filename(), "sitemap.xml");
        assert_eq!(index.reserve_name().unwrap().filename(), "sitemap_index.xml");
    }

    #[test]
    fn test_custom_filename_and_paths() {
        let opts = Options::new()
            .filename("pages")
            .public_path("out")
            .sitemaps_path("maps")
            .compress(false)
            .adapter(Arc::new(MemoryAdapter::new()));

        let reserved = opts.location().unwrap().reserve_name().unwrap();
        assert_eq!(reserved.path(), Path::new("out/maps/pages.xml"));
        assert_eq!(reserved.url(), "http://www.example.com/maps/pages.xml");
    }

    #[test]
    fn test_default_host_keeps_path() {
        let opts = Options::new().default_host("https://www.example.com/shop");
        let host = opts.default_host_url().unwrap();
        assert_eq!(host.as_str(), "https://www.example.com/shop/");
        assert_eq!(
            host.join("item-1").unwrap().as_str(),
            "https://www.example.com/shop/item-1"
        );
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(Options::new().default_host("nope").validate().is_err());
        assert!(
            Options::new()
                .default_host("mailto:me@example.com")
                .validate()
                .is_err()
        );
        assert!(Options::new().filename("").validate().is_err());
        assert!(
            Options::new()
                .limits(Limits::new().max_file_size(0))
                .validate()
                .is_err()
        );
        assert!(
            Options::new()
                .namer(NamerOptions::default().zero(2).start(1))
                .validate()
                .is_err()
        );
    }
}
