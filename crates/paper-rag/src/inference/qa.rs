//! Extractive question answering with a DistilBERT SQuAD model.
//!
//! The model is a DistilBERT encoder followed by a `qa_outputs` linear layer
//! producing start and end logits per token. Long contexts are split into
//! overlapping windows by the tokenizer; every window is scored and the best
//! span wins.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use candle_core::{DType, Device, Module, Tensor};
use candle_nn::{Linear, VarBuilder};
use candle_transformers::models::distilbert::{Config as DistilBertConfig, DistilBertModel};
use serde::Deserialize;
use tokenizers::{Encoding, Tokenizer, TruncationParams, TruncationStrategy};

use super::span::best_span;
use super::{Answer, AnswerGenerator};
use crate::config::models::{QA_DOC_STRIDE, QA_MAX_ANSWER_LEN, QA_MAX_SEQ_LEN};
use crate::error::{ModelError, ModelResult};

/// Hidden size, read separately because the candle config keeps it private.
#[derive(Deserialize)]
struct HeadConfig {
    dim: usize,
}

struct QaModel {
    encoder: DistilBertModel,
    qa_outputs: Linear,
    tokenizer: Tokenizer,
    device: Device,
}

/// DistilBERT extractive QA model.
///
/// Cheap to clone; clones share the loaded weights.
#[derive(Clone)]
pub struct DistilBertQa {
    inner: Arc<QaModel>,
    model_id: String,
}

impl DistilBertQa {
    /// Download (or reuse from the HuggingFace cache) and load a model.
    ///
    /// Prefers `model.safetensors`, falling back to `pytorch_model.bin`.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Load` if any file cannot be fetched or parsed.
    pub async fn from_hub(model_id: &str) -> ModelResult<Self> {
        let api = hf_hub::api::tokio::Api::new().map_err(load_err)?;
        let repo = api.model(model_id.to_string());

        let config = repo.get("config.json").await.map_err(load_err)?;
        let tokenizer = repo.get("tokenizer.json").await.map_err(load_err)?;
        let weights = match repo.get("model.safetensors").await {
            Ok(path) => path,
            Err(e) => {
                tracing::debug!(model_id, error = %e, "No safetensors weights, using pytorch_model.bin");
                repo.get("pytorch_model.bin").await.map_err(load_err)?
            }
        };

        let id = model_id.to_string();
        tokio::task::spawn_blocking(move || Self::from_files(&id, &config, &tokenizer, &weights))
            .await?
    }

    /// Load a model from local files.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Load` if any file cannot be read or parsed.
    pub fn from_files(
        model_id: &str,
        config_path: &Path,
        tokenizer_path: &Path,
        weights_path: &Path,
    ) -> ModelResult<Self> {
        let device = Device::Cpu;

        let raw_config = std::fs::read_to_string(config_path).map_err(load_err)?;
        let config: DistilBertConfig = serde_json::from_str(&raw_config).map_err(load_err)?;
        let head: HeadConfig = serde_json::from_str(&raw_config).map_err(load_err)?;

        let vb = if weights_path.extension().is_some_and(|ext| ext == "safetensors") {
            let bytes = std::fs::read(weights_path).map_err(load_err)?;
            VarBuilder::from_buffered_safetensors(bytes, DType::F32, &device).map_err(load_err)?
        } else {
            VarBuilder::from_pth(weights_path, DType::F32, &device).map_err(load_err)?
        };

        let encoder = DistilBertModel::load(vb.pp("distilbert"), &config).map_err(load_err)?;
        let qa_outputs = candle_nn::linear(head.dim, 2, vb.pp("qa_outputs")).map_err(load_err)?;

        let mut tokenizer = Tokenizer::from_file(tokenizer_path).map_err(load_err)?;
        tokenizer.with_padding(None);
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: QA_MAX_SEQ_LEN,
                stride: QA_DOC_STRIDE,
                strategy: TruncationStrategy::OnlySecond,
                ..Default::default()
            }))
            .map_err(load_err)?;

        tracing::info!(model_id, dim = head.dim, "Loaded QA model");

        Ok(Self {
            inner: Arc::new(QaModel { encoder, qa_outputs, tokenizer, device }),
            model_id: model_id.to_string(),
        })
    }

    /// HuggingFace repository the weights came from.
    #[must_use]
    pub fn model_id(&self) -> &str {
        &self.model_id
    }
}

impl QaModel {
    fn answer(&self, question: &str, context: &str) -> ModelResult<Answer> {
        if context.trim().is_empty() {
            return Ok(Answer::empty());
        }

        let encoding = self
            .tokenizer
            .encode((question, context), true)
            .map_err(|e| ModelError::Tokenizer(e.to_string()))?;

        let mut best: Option<Answer> = None;
        for window in std::iter::once(&encoding).chain(encoding.get_overflowing()) {
            if let Some(candidate) = self.score_window(window, context)? {
                if best.as_ref().is_none_or(|b| candidate.score > b.score) {
                    best = Some(candidate);
                }
            }
        }

        Ok(best.unwrap_or_else(Answer::empty))
    }

    fn score_window(&self, window: &Encoding, context: &str) -> ModelResult<Option<Answer>> {
        let ids = window.get_ids();
        let len = ids.len();

        let input_ids = Tensor::new(ids, &self.device)?.unsqueeze(0)?;
        // Single unpadded sequence: nothing is masked.
        let attention_mask = Tensor::zeros((len, len), DType::U8, &self.device)?;

        let hidden = self.encoder.forward(&input_ids, &attention_mask)?;
        let logits = self.qa_outputs.forward(&hidden)?.squeeze(0)?;
        let start_logits = logits.narrow(1, 0, 1)?.squeeze(1)?.to_vec1::<f32>()?;
        let end_logits = logits.narrow(1, 1, 1)?.squeeze(1)?.to_vec1::<f32>()?;

        let context_mask: Vec<bool> =
            window.get_sequence_ids().iter().map(|id| *id == Some(1)).collect();

        let Some(span) = best_span(&start_logits, &end_logits, &context_mask, QA_MAX_ANSWER_LEN)
        else {
            return Ok(None);
        };

        let offsets = window.get_offsets();
        let start = offsets[span.start].0;
        let end = offsets[span.end].1;
        let text = context.get(start..end).unwrap_or_default().to_string();

        Ok(Some(Answer { text, score: span.score, start, end }))
    }
}

#[async_trait]
impl AnswerGenerator for DistilBertQa {
    async fn answer(&self, question: &str, context: &str) -> ModelResult<Answer> {
        let inner = Arc::clone(&self.inner);
        let question = question.to_string();
        let context = context.to_string();

        tokio::task::spawn_blocking(move || inner.answer(&question, &context)).await?
    }
}

impl std::fmt::Debug for DistilBertQa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DistilBertQa").field("model_id", &self.model_id).finish()
    }
}

fn load_err(err: impl std::fmt::Display) -> ModelError {
    ModelError::Load(err.to_string())
}

/// Paths of a locally stored model, for offline loading.
#[derive(Debug, Clone)]
pub struct QaModelFiles {
    /// `config.json`.
    pub config: PathBuf,
    /// `tokenizer.json`.
    pub tokenizer: PathBuf,
    /// `model.safetensors` or `pytorch_model.bin`.
    pub weights: PathBuf,
}

impl QaModelFiles {
    /// Standard file names inside `dir`.
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        let safetensors = dir.join("model.safetensors");
        let weights =
            if safetensors.exists() { safetensors } else { dir.join("pytorch_model.bin") };
        Self { config: dir.join("config.json"), tokenizer: dir.join("tokenizer.json"), weights }
    }
}
