//! URL entries and their XML serialization.
//!
//! A [`SitemapUrl`] describes one page. Serializing it produces the compact
//! `<url>…</url>` fragment that a [`BuilderFile`](crate::builder::BuilderFile)
//! accumulates. Field values are escaped but otherwise taken as given:
//! priorities and dates are not range-checked.

use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::escape::escape;
use url::Url;

use crate::location::base_url;
use crate::template::SearchEngine;
use crate::{Error, Result};

/// How frequently a page is likely to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFrequency {
    /// Changes every time it is accessed.
    Always,
    /// Changes hourly.
    Hourly,
    /// Changes daily.
    Daily,
    /// Changes weekly.
    Weekly,
    /// Changes monthly.
    Monthly,
    /// Changes yearly.
    Yearly,
    /// Archived, never changes.
    Never,
}

impl ChangeFrequency {
    /// Returns the protocol keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

impl std::fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ChangeFrequency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "always" => Ok(Self::Always),
            "hourly" => Ok(Self::Hourly),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            "never" => Ok(Self::Never),
            _ => Err(Error::InvalidOption(format!("Invalid changefreq value: {s}"))),
        }
    }
}

/// Google News metadata for a URL.
///
/// A URL carrying news metadata counts against the per-file news limit.
#[derive(Debug, Clone, PartialEq)]
pub struct News {
    /// Publication name, e.g. "The Example Times".
    pub publication_name: String,
    /// Publication language as an ISO 639 code.
    pub language: String,
    /// Article title.
    pub title: String,
    /// Article publication date.
    pub publication_date: DateTime<Utc>,
    /// Comma-separated keywords.
    pub keywords: Option<String>,
}

impl News {
    /// Creates news metadata.
    pub fn new(
        publication_name: impl Into<String>,
        language: impl Into<String>,
        title: impl Into<String>,
        publication_date: DateTime<Utc>,
    ) -> Self {
        Self {
            publication_name: publication_name.into(),
            language: language.into(),
            title: title.into(),
            publication_date,
            keywords: None,
        }
    }

    /// Sets the keywords.
    pub fn keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = Some(keywords.into());
        self
    }
}

/// An image on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    /// Image location; relative values resolve against the default host.
    pub loc: String,
    /// Caption.
    pub caption: Option<String>,
    /// Title.
    pub title: Option<String>,
}

impl Image {
    /// Creates an image entry.
    pub fn new(loc: impl Into<String>) -> Self {
        Self {
            loc: loc.into(),
            caption: None,
            title: None,
        }
    }

    /// Sets the caption.
    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Sets the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// One page to be listed in a sitemap.
///
/// # Example
///
/// ```rust
/// use sitemap_writer::{ChangeFrequency, SitemapUrl};
/// use sitemap_writer::template::SearchEngine;
///
/// let host = url::Url::parse("http://www.example.com")?;
/// let xml = SitemapUrl::new("/about")
///     .changefreq(ChangeFrequency::Weekly)
///     .priority(0.8)
///     .to_xml(&host, SearchEngine::Common)?;
///
/// assert_eq!(
///     String::from_utf8(xml).unwrap(),
///     "<url><loc>http://www.example.com/about</loc>\
///      <changefreq>weekly</changefreq><priority>0.8</priority></url>"
/// );
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SitemapUrl {
    /// Page location; relative values resolve against the default host.
    pub loc: String,
    /// Override of the default host for this entry.
    pub host: Option<String>,
    /// Last modification time.
    pub lastmod: Option<DateTime<Utc>>,
    /// Change frequency hint.
    pub changefreq: Option<ChangeFrequency>,
    /// Priority hint, rendered with one decimal.
    pub priority: Option<f32>,
    /// News metadata.
    pub news: Option<News>,
    /// Images on the page.
    pub images: Vec<Image>,
    /// Whether the page is a mobile page.
    pub mobile: bool,
}

impl SitemapUrl {
    /// Creates an entry for `loc`.
    pub fn new(loc: impl Into<String>) -> Self {
        Self {
            loc: loc.into(),
            ..Self::default()
        }
    }

    /// Resolves this entry against `host` instead of the default host.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Sets the last modification time.
    pub fn lastmod(mut self, lastmod: DateTime<Utc>) -> Self {
        self.lastmod = Some(lastmod);
        self
    }

    /// Sets the change frequency.
    pub fn changefreq(mut self, changefreq: ChangeFrequency) -> Self {
        self.changefreq = Some(changefreq);
        self
    }

    /// Sets the priority.
    pub fn priority(mut self, priority: f32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Attaches news metadata.
    pub fn news(mut self, news: News) -> Self {
        self.news = Some(news);
        self
    }

    /// Adds an image.
    pub fn image(mut self, image: Image) -> Self {
        self.images.push(image);
        self
    }

    /// Marks the page as a mobile page.
    pub fn mobile(mut self, mobile: bool) -> Self {
        self.mobile = mobile;
        self
    }

    /// Returns `true` if this entry counts against the news limit.
    pub fn is_news(&self) -> bool {
        self.news.is_some()
    }

    /// Serializes the entry into a `<url>` fragment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if `loc` is empty or cannot be resolved
    /// against the host.
    pub fn to_xml(&self, default_host: &Url, engine: SearchEngine) -> Result<Vec<u8>> {
        if self.loc.trim().is_empty() {
            return Err(Error::invalid_url(&self.loc, "loc must not be empty"));
        }

        let host = match &self.host {
            Some(host) => base_url(host).map_err(|reason| Error::invalid_url(&self.loc, reason))?,
            None => default_host.clone(),
        };
        let loc = resolve(&host, &self.loc)?;

        let mut xml = String::with_capacity(128);
        xml.push_str("<url>");
        push_element(&mut xml, "loc", loc.as_str());
        if let Some(lastmod) = &self.lastmod {
            push_element(&mut xml, "lastmod", &format_time(lastmod));
        }
        if let Some(changefreq) = self.changefreq {
            push_element(&mut xml, "changefreq", changefreq.as_str());
        }
        if let Some(priority) = self.priority {
            xml.push_str(&format!("<priority>{priority:.1}</priority>"));
        }
        if let Some(news) = &self.news {
            write_news(&mut xml, news);
        }
        for image in &self.images {
            let image_loc = resolve(&host, &image.loc)?;
            xml.push_str("<image:image>");
            push_element(&mut xml, "image:loc", image_loc.as_str());
            if let Some(caption) = &image.caption {
                push_element(&mut xml, "image:caption", caption);
            }
            if let Some(title) = &image.title {
                push_element(&mut xml, "image:title", title);
            }
            xml.push_str("</image:image>");
        }
        if self.mobile {
            xml.push_str(engine.mobile_tag());
        }
        xml.push_str("</url>");

        Ok(xml.into_bytes())
    }
}

fn resolve(host: &Url, loc: &str) -> Result<Url> {
    host.join(loc.trim())
        .map_err(|e| Error::invalid_url(loc, format!("cannot resolve against {host}: {e}")))
}

fn write_news(xml: &mut String, news: &News) {
    xml.push_str("<news:news><news:publication>");
    push_element(xml, "news:name", &news.publication_name);
    push_element(xml, "news:language", &news.language);
    xml.push_str("</news:publication>");
    push_element(
        xml,
        "news:publication_date",
        &format_time(&news.publication_date),
    );
    push_element(xml, "news:title", &news.title);
    if let Some(keywords) = &news.keywords {
        push_element(xml, "news:keywords", keywords);
    }
    xml.push_str("</news:news>");
}

fn push_element(xml: &mut String, tag: &str, text: &str) {
    xml.push('<');
    xml.push_str(tag);
    xml.push('>');
    xml.push_str(&escape(text));
    xml.push_str("</");
    xml.push_str(tag);
    xml.push('>');
}

pub(crate) fn format_time(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}
