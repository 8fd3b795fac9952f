//! Persistence adapters for finished sitemap documents.
//!
//! A [`Location`](crate::location::Location) hands each finished document
//! to an [`Adapter`] together with its destination path. The core never
//! retries or rolls back: whatever the adapter returns is propagated.
//!
//! Two adapters are provided:
//!
//! - [`FileAdapter`] writes to the local filesystem, gzip-compressing any
//!   destination ending in `.gz` (requires the `gzip` feature).
//! - [`MemoryAdapter`] keeps documents in memory, which is handy for tests
//!   and for callers that upload the bytes themselves.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::{Error, Result};

/// Destination for finished sitemap documents.
///
/// Implementations must be `Send + Sync` so one adapter can be shared by the
/// sitemap and index locations.
pub trait Adapter: Send + Sync {
    /// Persists `data` under `path`.
    fn write(&self, path: &Path, data: &[u8]) -> Result<()>;
}

/// Returns `true` if the destination should be gzip-compressed.
pub(crate) fn is_gzip_path(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}

/// Writes documents to the local filesystem.
///
/// Parent directories are created as needed. Paths ending in `.gz` are
/// compressed with gzip.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileAdapter;

impl FileAdapter {
    /// Creates a new filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Adapter for FileAdapter {
    fn write(&self, path: &Path, data: &[u8]) -> Result<()> {
        #[cfg(not(feature = "gzip"))]
        if is_gzip_path(path) {
            return Err(Error::UnsupportedFeature { feature: "gzip" });
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Io(io::Error::new(
                    e.kind(),
                    format!("Failed to create directory {}: {}", parent.display(), e),
                ))
            })?;
        }

        let file = File::create(path).map_err(|e| {
            Error::Io(io::Error::new(
                e.kind(),
                format!("Failed to create {}: {}", path.display(), e),
            ))
        })?;
        let mut out = BufWriter::new(file);

        if is_gzip_path(path) {
            #[cfg(feature = "gzip")]
            write_gzip(&mut out, data)?;
        } else {
            out.write_all(data)?;
        }
        out.flush()?;
        Ok(())
    }
}

#[cfg(feature = "gzip")]
fn write_gzip<W: Write>(out: &mut W, data: &[u8]) -> Result<()> {
    use flate2::Compression;
    use flate2::write::GzEncoder;

    let mut encoder = GzEncoder::new(out, Compression::best());
    encoder.write_all(data)?;
    encoder.finish()?;
    Ok(())
}

/// Keeps written documents in memory.
///
/// Documents are stored uncompressed, in write order, keyed by the path the
/// location reserved for them.
///
/// # Example
///
/// ```rust
/// use std::path::Path;
/// use sitemap_writer::adapter::{Adapter, MemoryAdapter};
///
/// let adapter = MemoryAdapter::new();
/// adapter.write(Path::new("public/sitemap.xml"), b"<urlset/>")?;
/// assert_eq!(adapter.len(), 1);
/// assert_eq!(adapter.get("public/sitemap.xml").unwrap(), b"<urlset/>");
/// # Ok::<(), sitemap_writer::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct MemoryAdapter {
    documents: Mutex<Vec<(PathBuf, Vec<u8>)>>,
}

impl MemoryAdapter {
    /// Creates an empty in-memory adapter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of documents written so far.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the paths of all written documents, in write order.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.lock().iter().map(|(p, _)| p.clone()).collect()
    }

    /// Returns a copy of the document most recently written to `path`.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        let path = path.as_ref();
        self.lock()
            .iter()
            .rev()
            .find(|(p, _)| p == path)
            .map(|(_, data)| data.clone())
    }

    /// Returns copies of all written documents, in write order.
    pub fn documents(&self) -> Vec<(PathBuf, Vec<u8>)> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(PathBuf, Vec<u8>)>> {
        // A panic while holding the lock cannot leave a half-written entry
        self.documents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Adapter for MemoryAdapter {
    fn write(&self, path: &Path, data: &[u8]) -> Result<()> {
        log::trace!("storing {} bytes for {}", data.len(), path.display());
        self.lock().push((path.to_path_buf(), data.to_vec()));
        Ok(())
    }
}
