//! Fetch → answer → score → format, once per query.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{ClientResult, PipelineResult};
use crate::formatters::format_results_markdown;
use crate::inference::{AnswerGenerator, Embedder};
use crate::models::{Paper, PipelineOutput, ScoredResult};
use crate::scoring::{evaluate_retrieval, evaluate_summary};

/// Shown when the search returns nothing.
pub const NO_RESULTS_MESSAGE: &str = "No relevant papers found.";

/// Retrieval accuracy field when results are listed.
pub const RETRIEVAL_PLACEHOLDER: &str = "Multiple Papers Shown";

/// Summary quality field when results are listed.
pub const SUMMARY_PLACEHOLDER: &str = "See Above";

/// A source of relevance-ranked papers.
#[async_trait]
pub trait PaperSource: Send + Sync {
    /// Fetch up to `max_results` papers for `query`, best match first.
    async fn fetch(&self, query: &str, max_results: usize) -> ClientResult<Vec<Paper>>;
}

/// The paper discovery pipeline.
///
/// Holds read-only handles to the paper source and both models.
#[derive(Clone)]
pub struct RagPipeline {
    source: Arc<dyn PaperSource>,
    qa: Arc<dyn AnswerGenerator>,
    embedder: Arc<dyn Embedder>,
    max_results: usize,
}

impl RagPipeline {
    /// Create a pipeline.
    #[must_use]
    pub fn new(
        source: Arc<dyn PaperSource>,
        qa: Arc<dyn AnswerGenerator>,
        embedder: Arc<dyn Embedder>,
        max_results: usize,
    ) -> Self {
        Self { source, qa, embedder, max_results }
    }

    /// Papers fetched per query.
    #[must_use]
    pub const fn max_results(&self) -> usize {
        self.max_results
    }

    /// Run the pipeline for one query.
    ///
    /// With no papers, returns `(NO_RESULTS_MESSAGE, "", "")`. Otherwise returns
    /// the formatted blocks and the two placeholder strings.
    ///
    /// # Errors
    ///
    /// Any fetch or model failure aborts the whole run.
    pub async fn run(&self, query: &str) -> PipelineResult<PipelineOutput> {
        let results = self.score(query).await?;

        if results.is_empty() {
            tracing::info!(query, "No papers found");
            return Ok(PipelineOutput::new(NO_RESULTS_MESSAGE, "", ""));
        }

        Ok(PipelineOutput::new(
            format_results_markdown(&results),
            RETRIEVAL_PLACEHOLDER,
            SUMMARY_PLACEHOLDER,
        ))
    }

    /// Fetch papers and score each one, in fetch order.
    ///
    /// # Errors
    ///
    /// Any fetch or model failure aborts the whole run.
    pub async fn score(&self, query: &str) -> PipelineResult<Vec<ScoredResult>> {
        let papers = self.source.fetch(query, self.max_results).await?;
        tracing::info!(query, papers = papers.len(), "Fetched papers");

        let mut results = Vec::with_capacity(papers.len());
        for paper in papers {
            let answer = self.qa.answer(query, &paper.summary).await?;
            let retrieval = evaluate_retrieval(self.embedder.as_ref(), query, &paper.summary).await?;
            let summary = evaluate_summary(&paper.summary, &answer.text);

            tracing::debug!(
                paper = %paper.short_id(),
                authors = %paper.author_names(),
                year = ?paper.year(),
                pdf = ?paper.pdf_url(),
                answer_score = answer.score,
                %retrieval,
                %summary,
                "Scored paper"
            );

            results.push(ScoredResult { paper, answer: answer.text, retrieval, summary });
        }

        Ok(results)
    }
}

impl std::fmt::Debug for RagPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RagPipeline")
            .field("embedder", &self.embedder.model_name())
            .field("max_results", &self.max_results)
            .finish()
    }
}
