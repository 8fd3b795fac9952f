//! Fuzz target for SitemapUrl serialization with arbitrary locations.
//!
//! Run with: cargo +nightly fuzz run sitemap_url
//!
//! Serialization must either fail with a typed error or produce a single
//! `<url>` element whose text contains no raw markup characters.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sitemap_writer::{SearchEngine, SitemapUrl};

fuzz_target!(|data: &[u8]| {
    let Ok(loc) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(host) = url::Url::parse("http://www.example.com") else {
        return;
    };

    if let Ok(xml) = SitemapUrl::new(loc).to_xml(&host, SearchEngine::Common) {
        let xml = String::from_utf8(xml).expect("serializer emits UTF-8");
        let inner = xml
            .strip_prefix("<url><loc>")
            .and_then(|s| s.strip_suffix("</loc></url>"))
            .expect("single <url><loc> element");
        assert!(!inner.contains('<'), "unescaped markup in {:?}", inner);
    }
});
