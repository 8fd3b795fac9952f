//! Fuzz target for BuilderFile::add with arbitrary record sequences.
//!
//! The first three bytes pick the limits, the rest is split on NUL bytes
//! into records. Records whose first byte is odd are flagged as news.
//!
//! Run with: cargo +nightly fuzz run builder_add
//!
//! Properties being tested:
//! - A rejected add leaves payload and counters untouched
//! - An accepted add keeps the payload below max_file_size
//! - Counters never exceed their limits

#![no_main]

use libfuzzer_sys::fuzz_target;
use sitemap_writer::{BuilderFile, Limits, Record, SearchEngine};

fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }
    let limits = Limits::new()
        .max_file_size(data[0] as usize + 1)
        .max_links(data[1] as usize % 16 + 1)
        .max_news(data[2] as usize % 4 + 1);
    let mut builder = BuilderFile::new(limits, SearchEngine::Common);

    for chunk in data[3..].split(|b| *b == 0) {
        let record = match chunk.first() {
            Some(b) if b % 2 == 1 => Record::news(chunk),
            _ => Record::new(chunk),
        };

        let before = (
            builder.content().to_vec(),
            builder.link_count(),
            builder.news_count(),
        );
        match builder.add(&record) {
            Ok(()) => {
                assert!(builder.content().len() < limits.max_file_size);
                assert!(builder.link_count() <= limits.max_links);
                assert!(builder.news_count() <= limits.max_news);
            }
            Err(_) => {
                assert_eq!(builder.content(), before.0.as_slice());
                assert_eq!(builder.link_count(), before.1);
                assert_eq!(builder.news_count(), before.2);
                builder.clear();
            }
        }
    }
});
