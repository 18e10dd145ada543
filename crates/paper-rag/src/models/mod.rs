//! Data models for papers, search parameters and scored results.
//!
//! Papers are parsed from arXiv Atom entries; everything else lives for a
//! single request.

mod enums;
mod paper;
mod results;

pub use enums::{RetrievalLabel, SortCriterion, SortOrder, SummaryLabel};
pub use paper::{Author, Link, Paper};
pub use results::{PipelineOutput, ScoredResult};
