#![no_main]

use libfuzzer_sys::fuzz_target;
use paper_rag::client::parse_feed;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes as an Atom feed: Ok or Err, never a panic
    if let Ok(xml) = std::str::from_utf8(data) {
        let _ = parse_feed(xml);
    }
});
