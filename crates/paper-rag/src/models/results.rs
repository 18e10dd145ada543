//! Per-request result types.

use serde::{Deserialize, Serialize};

use super::{Paper, RetrievalLabel, SummaryLabel};

/// One paper with its generated answer and both score labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredResult {
    /// The fetched paper.
    pub paper: Paper,

    /// Extractive answer to the user's query from the abstract.
    pub answer: String,

    /// Query/abstract embedding similarity label.
    pub retrieval: RetrievalLabel,

    /// Answer/abstract lexical grounding label.
    pub summary: SummaryLabel,
}

/// The three values shown by the UI after a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineOutput {
    /// Markdown block listing every paper.
    pub output: String,

    /// Retrieval accuracy text box.
    pub retrieval_accuracy: String,

    /// Summary quality text box.
    pub summary_quality: String,
}

impl PipelineOutput {
    /// Build an output from its three fields.
    #[must_use]
    pub fn new(
        output: impl Into<String>,
        retrieval_accuracy: impl Into<String>,
        summary_quality: impl Into<String>,
    ) -> Self {
        Self {
            output: output.into(),
            retrieval_accuracy: retrieval_accuracy.into(),
            summary_quality: summary_quality.into(),
        }
    }

    /// The output as a `(markdown, retrieval, summary)` tuple.
    #[must_use]
    pub fn as_tuple(&self) -> (&str, &str, &str) {
        (&self.output, &self.retrieval_accuracy, &self.summary_quality)
    }
}
