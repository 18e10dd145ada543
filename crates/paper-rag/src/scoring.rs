//! Heuristic scorers for retrieval relevance and answer grounding.

use crate::config::thresholds::{RETRIEVAL_HIGH, RETRIEVAL_MEDIUM, SUMMARY_FAIR_MIN_WORDS};
use crate::error::{ModelError, ModelResult};
use crate::inference::Embedder;
use crate::models::{RetrievalLabel, SummaryLabel};

/// Cosine similarity of two vectors, in `[-1, 1]`.
///
/// Returns 0 for vectors of different length or with zero norm.
#[must_use]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

/// Label a similarity score: `> 0.7` High, `> 0.4` Medium, otherwise Low.
#[must_use]
pub fn retrieval_label(score: f32) -> RetrievalLabel {
    if score > RETRIEVAL_HIGH {
        RetrievalLabel::High
    } else if score > RETRIEVAL_MEDIUM {
        RetrievalLabel::Medium
    } else {
        RetrievalLabel::Low
    }
}

/// Score how well `context` matches `query` by embedding similarity.
///
/// # Errors
///
/// Returns error if embedding fails.
pub async fn evaluate_retrieval(
    embedder: &dyn Embedder,
    query: &str,
    context: &str,
) -> ModelResult<RetrievalLabel> {
    let vectors = embedder.embed_batch(vec![query.to_string(), context.to_string()]).await?;
    let [query_vec, context_vec] = vectors.as_slice() else {
        return Err(ModelError::Embedding(format!("expected 2 embeddings, got {}", vectors.len())));
    };

    let score = cosine_similarity(query_vec, context_vec);
    tracing::trace!(score, "retrieval similarity");

    Ok(retrieval_label(score))
}

/// Score how well `answer` is grounded in `context`.
///
/// Good if the answer appears in the context (case-insensitive); otherwise
/// Fair if it has more than five words, else Poor. The substring rule wins
/// over the length rule.
#[must_use]
pub fn evaluate_summary(context: &str, answer: &str) -> SummaryLabel {
    if context.to_lowercase().contains(&answer.to_lowercase()) {
        SummaryLabel::Good
    } else if answer.split_whitespace().count() > SUMMARY_FAIR_MIN_WORDS {
        SummaryLabel::Fair
    } else {
        SummaryLabel::Poor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_identical() {
        let v = [0.3, -1.2, 4.0];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_orthogonal_and_opposite() {
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
        assert!((cosine_similarity(&[1.0, 2.0], &[-1.0, -2.0]) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_degenerate_inputs() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn test_retrieval_label_boundaries() {
        assert_eq!(retrieval_label(0.71), RetrievalLabel::High);
        assert_eq!(retrieval_label(0.7), RetrievalLabel::Medium);
        assert_eq!(retrieval_label(0.41), RetrievalLabel::Medium);
        assert_eq!(retrieval_label(0.4), RetrievalLabel::Low);
        assert_eq!(retrieval_label(-1.0), RetrievalLabel::Low);
    }

    #[test]
    fn test_summary_substring_wins() {
        let context = "We propose a novel method for training very deep convolutional networks quickly.";
        let answer = "A NOVEL METHOD FOR TRAINING VERY DEEP CONVOLUTIONAL NETWORKS";
        assert_eq!(evaluate_summary(context, answer), SummaryLabel::Good);
    }

    #[test]
    fn test_summary_fair_and_poor() {
        let context = "Short abstract.";
        assert_eq!(evaluate_summary(context, "one two three four five six"), SummaryLabel::Fair);
        assert_eq!(evaluate_summary(context, "one two three four five"), SummaryLabel::Poor);
    }

    #[test]
    fn test_summary_empty_answer_is_good() {
        assert_eq!(evaluate_summary("anything", ""), SummaryLabel::Good);
    }
}
