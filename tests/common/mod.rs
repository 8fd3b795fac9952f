//! Shared test utilities for integration tests.
//!
//! Note: `#![allow(dead_code)]` is required because each integration test file
//! compiles as a separate crate and may only use a subset of these helpers.

#![allow(dead_code)]

use std::sync::Arc;

use quick_xml::Reader;
use quick_xml::events::Event;
use sitemap_writer::{Limits, MemoryAdapter, Options};

/// Options writing uncompressed files into a fresh in-memory adapter.
///
/// Returns the options together with the adapter so tests can inspect
/// what was written.
pub fn memory_options(limits: Limits) -> (Options, Arc<MemoryAdapter>) {
    let adapter = Arc::new(MemoryAdapter::new());
    let options = Options::new()
        .compress(false)
        .verbose(false)
        .limits(limits)
        .adapter(adapter.clone());
    (options, adapter)
}

/// Parses `xml` and returns the text of every `<loc>` element in order.
///
/// Panics if the document is not well-formed.
pub fn locs(xml: &[u8]) -> Vec<String> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut in_loc = false;
    let mut found = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == b"loc" => in_loc = true,
            Ok(Event::End(e)) if e.name().as_ref() == b"loc" => in_loc = false,
            Ok(Event::Text(t)) if in_loc => {
                found.push(t.unescape().expect("valid escapes").into_owned());
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => panic!(
                "malformed XML at position {}: {e}",
                reader.buffer_position()
            ),
        }
        buf.clear();
    }
    found
}

/// Returns the name of the root element of `xml`.
pub fn root_element(xml: &[u8]) -> String {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                return String::from_utf8_lossy(e.name().as_ref()).into_owned();
            }
            Ok(Event::Eof) => panic!("document has no root element"),
            Ok(_) => {}
            Err(e) => panic!("malformed XML: {e}"),
        }
        buf.clear();
    }
}
