//! XML header and footer templates.
//!
//! Templates are authored with free-form indentation and are normalized
//! before use: every run of whitespace collapses to a single space and the
//! result carries no leading or trailing whitespace.

/// Standard `<urlset>` header, understood by Google, Bing and most crawlers.
pub const XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
      <urlset
      xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
      xsi:schemaLocation="http://www.sitemaps.org/schemas/sitemap/0.9
        http://www.sitemaps.org/schemas/sitemap/0.9/sitemap.xsd"
      xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"
      xmlns:image="http://www.google.com/schemas/sitemap-image/1.1"
      xmlns:video="http://www.google.com/schemas/sitemap-video/1.1"
      xmlns:geo="http://www.google.com/geo/schemas/sitemap/1.0"
      xmlns:news="http://www.google.com/schemas/sitemap-news/0.9"
      xmlns:mobile="http://www.google.com/schemas/sitemap-mobile/1.0"
      xmlns:pagemap="http://www.google.com/schemas/sitemap-pagemap/1.0"
      xmlns:xhtml="http://www.w3.org/1999/xhtml"
    >"#;

/// `<urlset>` header for Baidu, which uses its own mobile namespace.
pub const BAIDU_XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
      <urlset
      xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"
      xmlns:image="http://www.google.com/schemas/sitemap-image/1.1"
      xmlns:news="http://www.google.com/schemas/sitemap-news/0.9"
      xmlns:mobile="http://www.baidu.com/schemas/sitemap-mobile/1/"
    >"#;

/// Closing tag for sitemap documents.
pub const XML_FOOTER: &str = "</urlset>";

/// `<sitemapindex>` header.
pub const INDEX_XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
      <sitemapindex
      xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
      xsi:schemaLocation="http://www.sitemaps.org/schemas/sitemap/0.9
        http://www.sitemaps.org/schemas/sitemap/0.9/siteindex.xsd"
      xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"
    >"#;

/// Closing tag for sitemap index documents.
pub const INDEX_XML_FOOTER: &str = "</sitemapindex>";

/// Search engine flavour the output is tailored for.
///
/// The variant selects the document header and a few per-record details
/// such as the mobile tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum SearchEngine {
    /// Standards-compliant output (Google, Bing, Yandex, ...).
    #[default]
    Common,
    /// Baidu, which expects its own mobile namespace.
    Baidu,
}

impl SearchEngine {
    /// Returns the raw (unnormalized) header template for this variant.
    pub fn header(self) -> &'static str {
        match self {
            Self::Common => XML_HEADER,
            Self::Baidu => BAIDU_XML_HEADER,
        }
    }

    /// Returns the mobile marker element for this variant.
    pub(crate) fn mobile_tag(self) -> &'static str {
        match self {
            Self::Common => "<mobile:mobile/>",
            Self::Baidu => r#"<mobile:mobile type="mobile"/>"#,
        }
    }
}

/// Collapses whitespace runs in a header template to single spaces.
///
/// # Example
///
/// ```rust
/// use sitemap_writer::template::normalize_header;
///
/// let header = normalize_header("\n  <urlset\n     xmlns=\"x\"\n  >");
/// assert_eq!(header, "<urlset xmlns=\"x\" >");
/// ```
pub fn normalize_header(template: &str) -> String {
    template.split_whitespace().collect::<Vec<_>>().join(" ")
}
