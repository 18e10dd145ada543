//! Fuzzing library for paper-rag.
//!
//! Targets the parsers that see untrusted input: the arXiv Atom feed, the
//! web UI's JSON request body, and the answer grounding scorer.
//!
//! # Usage
//!
//! ```bash
//! cd crates/paper-rag-fuzz
//! cargo +nightly fuzz run fuzz_feed_parse -- -max_total_time=60
//! ```

pub use paper_rag::client::parse_feed;
pub use paper_rag::scoring::evaluate_summary;
