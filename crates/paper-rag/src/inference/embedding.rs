//! FastEmbed sentence-embedding provider.
//!
//! Runs `all-MiniLM-L6-v2` locally through fastembed (ONNX runtime). The
//! model files are downloaded on first use and cached.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

use super::Embedder;
use crate::config::models::{EMBEDDING_MAX_SEQ_LEN, EMBEDDING_MODEL_NAME};
use crate::error::{ModelError, ModelResult};

/// FastEmbed embedding provider.
#[derive(Clone)]
pub struct FastEmbedder {
    /// The embedding model (shared between clones).
    model: Arc<Mutex<TextEmbedding>>,

    /// Model identifier.
    model_name: String,
}

impl FastEmbedder {
    /// Load `all-MiniLM-L6-v2`, downloading it into `cache_dir` if needed.
    ///
    /// This blocks while the model downloads and initializes.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Load` if model initialization fails.
    pub fn new(cache_dir: Option<PathBuf>) -> ModelResult<Self> {
        let mut options =
            InitOptions::new(EmbeddingModel::AllMiniLML6V2).with_max_length(EMBEDDING_MAX_SEQ_LEN);
        if let Some(dir) = cache_dir {
            options = options.with_cache_dir(dir);
        }

        let model = TextEmbedding::try_new(options)
            .map_err(|e| ModelError::Load(format!("Failed to initialize FastEmbed model: {e}")))?;

        tracing::info!(
            model = EMBEDDING_MODEL_NAME,
            max_length = EMBEDDING_MAX_SEQ_LEN,
            "Loaded embedding model"
        );

        Ok(Self { model: Arc::new(Mutex::new(model)), model_name: EMBEDDING_MODEL_NAME.to_string() })
    }

    /// Load on the blocking pool.
    ///
    /// # Errors
    ///
    /// Returns `ModelError` if initialization fails or the task panics.
    pub async fn load(cache_dir: Option<PathBuf>) -> ModelResult<Self> {
        tokio::task::spawn_blocking(move || Self::new(cache_dir)).await?
    }
}

#[async_trait]
impl Embedder for FastEmbedder {
    async fn embed_batch(&self, texts: Vec<String>) -> ModelResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let model = Arc::clone(&self.model);
        tokio::task::spawn_blocking(move || {
            let model = model
                .lock()
                .map_err(|_| ModelError::Embedding("embedding model lock poisoned".to_string()))?;

            model
                .embed(texts, None)
                .map_err(|e| ModelError::Embedding(format!("Batch embedding generation failed: {e}")))
        })
        .await?
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

impl std::fmt::Debug for FastEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FastEmbedder").field("model_name", &self.model_name).finish()
    }
}
