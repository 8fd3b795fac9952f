//! Deterministic file naming for sitemap output.

use crate::{Error, Result};

/// Numbering scheme for a [`Namer`].
///
/// The counter starts at `zero`, which renders as the bare base name. The
/// first advance jumps to `start`, and every later one adds one. With the
/// defaults (`zero = 1`, `start = 2`, `separator = "-"`) a base of
/// `sitemap` yields `sitemap`, `sitemap-2`, `sitemap-3`, and so on.
///
/// # Example
///
/// ```rust
/// use sitemap_writer::location::{Namer, NamerOptions};
///
/// let mut namer = Namer::new(NamerOptions::new("sitemap"))?;
/// assert_eq!(namer.next(), "sitemap");
/// assert_eq!(namer.next(), "sitemap-2");
/// # Ok::<(), sitemap_writer::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamerOptions {
    /// Base name without extension.
    pub base: String,
    /// Counter value that renders without a numeric suffix.
    pub zero: u32,
    /// First numeric suffix issued after the unsuffixed name.
    pub start: u32,
    /// Text placed between the base and the numeric suffix.
    pub separator: String,
}

impl NamerOptions {
    /// Creates the default scheme for the given base name.
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            zero: 1,
            start: 2,
            separator: "-".to_string(),
        }
    }

    /// Sets the counter value that renders as the bare base name.
    pub fn zero(mut self, zero: u32) -> Self {
        self.zero = zero;
        self
    }

    /// Sets the first numeric suffix.
    pub fn start(mut self, start: u32) -> Self {
        self.start = start;
        self
    }

    /// Sets the separator between base and suffix.
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Returns a copy of this scheme with another base name.
    pub fn with_base(&self, base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            ..self.clone()
        }
    }

    /// Checks that the scheme can never issue the same name twice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOption`] if the base is empty or if `start`
    /// is not greater than `zero`.
    pub fn validate(&self) -> Result<()> {
        if self.base.is_empty() {
            return Err(Error::InvalidOption(
                "namer base name must not be empty".to_string(),
            ));
        }
        if self.start <= self.zero {
            return Err(Error::InvalidOption(format!(
                "namer start ({}) must be greater than zero index ({})",
                self.start, self.zero
            )));
        }
        Ok(())
    }
}

impl Default for NamerOptions {
    fn default() -> Self {
        Self::new("sitemap")
    }
}

/// Sequential file-name generator.
///
/// Calling [`next`](Self::next) N times on a fresh namer always yields the
/// same N names in the same order, and no name is ever repeated within one
/// namer's lifetime.
#[derive(Debug, Clone)]
pub struct Namer {
    opts: NamerOptions,
    // Can run past u32::MAX; never wraps back to `zero`
    count: u64,
    issued: usize,
}

impl Namer {
    /// Creates a namer positioned at the start of its sequence.
    ///
    /// # Errors
    ///
    /// Returns an error if the scheme fails [`NamerOptions::validate`].
    pub fn new(opts: NamerOptions) -> Result<Self> {
        opts.validate()?;
        Ok(Self {
            count: u64::from(opts.zero),
            opts,
            issued: 0,
        })
    }

    /// Returns the next name and advances the counter.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> String {
        let name = self.peek();
        self.count = if self.is_start() {
            u64::from(self.opts.start)
        } else {
            self.count + 1
        };
        self.issued += 1;
        name
    }

    /// Returns the name the next call to [`next`](Self::next) would produce.
    pub fn peek(&self) -> String {
        if self.is_start() {
            self.opts.base.clone()
        } else {
            format!("{}{}{}", self.opts.base, self.opts.separator, self.count)
        }
    }

    /// Returns `true` if no name has been issued since creation or reset.
    pub fn is_start(&self) -> bool {
        self.count == u64::from(self.opts.zero)
    }

    /// Returns how many names have been issued.
    pub fn issued(&self) -> usize {
        self.issued
    }

    /// Restarts the sequence.
    pub fn reset(&mut self) {
        self.count = u64::from(self.opts.zero);
        self.issued = 0;
    }

    /// Returns the naming scheme.
    pub fn options(&self) -> &NamerOptions {
        &self.opts
    }
}
