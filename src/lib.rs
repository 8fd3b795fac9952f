//! # sitemap-writer
//!
//! A Rust library for writing XML sitemaps that split across files.
//!
//! URLs are serialized into records and accumulated into sitemap files. A
//! new file starts as soon as any of three limits would be exceeded: payload
//! size, link count or news-entry count. Every file gets a deterministic,
//! collision-free name (`sitemap.xml.gz`, `sitemap-2.xml.gz`, ...), and runs
//! that produce several files also get a `sitemap_index.xml.gz`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sitemap_writer::{ChangeFrequency, Options, Result, Sitemap, SitemapUrl};
//!
//! fn main() -> Result<()> {
//!     let options = Options::new()
//!         .default_host("https://www.example.com")
//!         .public_path("public");
//!
//!     let mut sitemap = Sitemap::new(options)?;
//!     sitemap.add(&SitemapUrl::new("/"))?;
//!     sitemap.add(
//!         &SitemapUrl::new("/blog")
//!             .changefreq(ChangeFrequency::Daily)
//!             .priority(0.8),
//!     )?;
//!
//!     let result = sitemap.finalize()?;
//!     println!("Wrote {} files with {} links", result.file_count(), result.total_links);
//!     Ok(())
//! }
//! ```
//!
//! ## Building Blocks
//!
//! [`Sitemap`] is a thin driver over three pieces that can be used directly:
//!
//! - [`BuilderFile`] accumulates records for one file and reports
//!   [`Full`](builder::Full) before changing any state.
//! - [`Namer`](location::Namer) issues the file names in order.
//! - [`Location`](location::Location) reserves a name and hands the finished
//!   document to an [`Adapter`](adapter::Adapter).
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `gzip` | Yes | Write `.xml.gz` files with flate2 |
//! | `parallel` | No | Serialize URLs on the rayon thread pool in [`Sitemap::add_all`] |
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade. Per-file summaries go out at
//! `info` when verbose output is enabled (the default) and at `debug`
//! otherwise.
//!
//! ## Minimum Supported Rust Version (MSRV)
//!
//! This crate requires **Rust 1.85** or later.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod adapter;
pub mod builder;
pub mod entry;
pub mod error;
pub mod limits;
pub mod location;
pub mod options;
pub mod sitemap;
pub mod template;

pub use error::{Error, Result};

// Re-export the common API at crate root for convenience
pub use adapter::{Adapter, FileAdapter, MemoryAdapter};
pub use builder::{BuilderFile, Full, FullReason, IndexBuilder, Record};
pub use entry::{ChangeFrequency, Image, News, SitemapUrl};
pub use limits::Limits;
pub use location::{Location, Namer, NamerOptions, ReservedName, WrittenFile};
pub use options::{CreateIndex, Options};
pub use sitemap::{Sitemap, SitemapResult};
pub use template::SearchEngine;
