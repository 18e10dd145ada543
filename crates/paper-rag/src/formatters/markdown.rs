//! Markdown output formatting.

use crate::models::ScoredResult;

/// Format all results as one Markdown document.
///
/// Blocks are numbered from 1 and joined with a newline.
#[must_use]
pub fn format_results_markdown(results: &[ScoredResult]) -> String {
    results
        .iter()
        .enumerate()
        .map(|(i, result)| format_result_block(result, i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a single result.
///
/// The trailing spaces after the retrieval label force a
/// Markdown line break.
#[must_use]
pub fn format_result_block(result: &ScoredResult, index: usize) -> String {
    format!(
        "\n### Paper {index}\n\n\
         Title: {title}\n\n\
         Abstract: {summary}\n\n\
         Summarized Answer: {answer}\n\n\
         Link: {link}\n\n\
         Retrieval Accuracy: {retrieval}   \n\
         Summary Quality: {quality}\n\n\
         ---",
        title = result.paper.title,
        summary = result.paper.summary,
        answer = result.answer,
        link = result.paper.link(),
        retrieval = result.retrieval,
        quality = result.summary,
    )
}
