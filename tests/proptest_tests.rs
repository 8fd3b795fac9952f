//! Property-based tests using proptest.
//!
//! These tests verify the accumulation and naming invariants with randomly
//! generated records and limits.

use std::collections::HashSet;

use proptest::prelude::*;
use sitemap_writer::template::normalize_header;
use sitemap_writer::{BuilderFile, Limits, Namer, NamerOptions, Record, SearchEngine};

/// Strategy for a record: up to 64 bytes of payload plus a news flag.
fn record_strategy() -> impl Strategy<Value = Record> {
    (proptest::collection::vec(any::<u8>(), 0..64), any::<bool>()).prop_map(|(bytes, news)| {
        if news {
            Record::news(bytes)
        } else {
            Record::new(bytes)
        }
    })
}

/// Strategy for small limits so that overflow happens often.
fn limits_strategy() -> impl Strategy<Value = Limits> {
    (1usize..256, 1usize..8, 1usize..4).prop_map(|(size, links, news)| {
        Limits::new()
            .max_file_size(size)
            .max_links(links)
            .max_news(news)
    })
}

proptest! {
    /// Records that fit are all accepted and kept in order.
    #[test]
    fn test_records_under_limits_are_kept_in_order(
        records in proptest::collection::vec(record_strategy(), 0..20)
    ) {
        let total: usize = records.iter().map(Record::len).sum();
        let limits = Limits::new()
            .max_file_size(total + 1)
            .max_links(records.len().max(1))
            .max_news(records.len().max(1));
        let mut builder = BuilderFile::new(limits, SearchEngine::Common);

        for record in &records {
            prop_assert!(builder.add(record).is_ok());
        }

        let expected: Vec<u8> = records.iter().flat_map(|r| r.as_bytes().to_vec()).collect();
        prop_assert_eq!(builder.content(), expected.as_slice());

        let doc = builder.document();
        let header = normalize_header(SearchEngine::Common.header());
        prop_assert!(doc.starts_with(header.as_bytes()));
        prop_assert!(doc.ends_with(b"</urlset>"));
        prop_assert_eq!(&doc[header.len()..doc.len() - 9], expected.as_slice());
    }

    /// A rejected add leaves the builder byte-for-byte unchanged.
    #[test]
    fn test_overflow_leaves_state_untouched(
        limits in limits_strategy(),
        records in proptest::collection::vec(record_strategy(), 1..40)
    ) {
        let mut builder = BuilderFile::new(limits, SearchEngine::Common);

        for record in &records {
            let before = (builder.content().to_vec(), builder.link_count(), builder.news_count());
            match builder.add(record) {
                Ok(()) => {
                    prop_assert!(builder.content().len() < limits.max_file_size);
                    prop_assert!(builder.link_count() <= limits.max_links);
                    prop_assert!(builder.news_count() <= limits.max_news);
                }
                Err(_) => {
                    prop_assert_eq!(builder.content(), before.0.as_slice());
                    prop_assert_eq!(builder.link_count(), before.1);
                    prop_assert_eq!(builder.news_count(), before.2);
                }
            }
        }
    }

    /// A namer never repeats a name.
    #[test]
    fn test_namer_names_are_unique(
        zero in 0u32..5,
        gap in 1u32..5,
        count in 1usize..200
    ) {
        let opts = NamerOptions::new("sitemap").zero(zero).start(zero + gap);
        let mut namer = Namer::new(opts).unwrap();
        let names: HashSet<String> = (0..count).map(|_| namer.next()).collect();
        prop_assert_eq!(names.len(), count);
        prop_assert_eq!(namer.issued(), count);
    }

    /// Header normalization leaves no whitespace runs and no outer whitespace.
    #[test]
    fn test_normalized_headers_have_single_spaces(
        parts in proptest::collection::vec("<[a-z]{1,6}>", 1..6),
        gaps in proptest::collection::vec("[ \t\n]{1,4}", 6)
    ) {
        let mut template = gaps[0].clone();
        for (part, gap) in parts.iter().zip(gaps.iter().skip(1)) {
            template.push_str(part);
            template.push_str(gap);
        }

        let header = normalize_header(&template);
        prop_assert_eq!(header.clone(), parts.join(" "));
        prop_assert!(!header.starts_with(char::is_whitespace));
    }
}
