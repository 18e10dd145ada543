//! Model abstractions and local implementations.
//!
//! The pipeline talks to models only through [`AnswerGenerator`] and
//! [`Embedder`], so tests can substitute fixed-output mocks. The real
//! implementations are loaded once at startup and shared read-only:
//!
//! - [`DistilBertQa`]: extractive QA with candle
//! - [`FastEmbedder`]: sentence embeddings with fastembed

mod embedding;
mod qa;
pub mod span;

pub use embedding::FastEmbedder;
pub use qa::{DistilBertQa, QaModelFiles};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// An extractive answer: a span copied from the context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    /// Span text.
    pub text: String,

    /// Model probability of the span (`p_start * p_end`).
    pub score: f32,

    /// Byte offset of the span start in the context.
    pub start: usize,

    /// Byte offset one past the span end in the context.
    pub end: usize,
}

impl Answer {
    /// Answer for a context with nothing to extract.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Extracts an answer span for a question from a passage.
///
/// The best span is always returned; there is no confidence threshold.
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    /// Answer `question` from `context`.
    async fn answer(&self, question: &str, context: &str) -> ModelResult<Answer>;
}

/// Produces sentence embeddings.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed several texts, returning vectors in input order.
    async fn embed_batch(&self, texts: Vec<String>) -> ModelResult<Vec<Vec<f32>>>;

    /// Embed a single text.
    async fn embed(&self, text: &str) -> ModelResult<Vec<f32>> {
        self.embed_batch(vec![text.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ModelError::Embedding("no embedding generated".to_string()))
    }

    /// Model identifier, for logging.
    fn model_name(&self) -> &str;
}
