//! arXiv Paper Discovery with Extractive QA
//!
//! Searches arXiv for a research topic, answers the topic as a question
//! against each abstract with an extractive QA model, scores each paper,
//! and renders the results as Markdown in a small web UI.
//!
//! # Pipeline
//!
//! 1. **Fetch**: top 5 relevance-ranked arXiv papers
//! 2. **Answer**: DistilBERT (SQuAD) span extraction from the abstract
//! 3. **Score**: embedding similarity (High/Medium/Low) and answer grounding (Good/Fair/Poor)
//! 4. **Format**: one Markdown block per paper
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use paper_rag::inference::{DistilBertQa, FastEmbedder};
//! use paper_rag::{ArxivClient, Config, RagPipeline};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let client = ArxivClient::new(&config)?;
//!     let qa = DistilBertQa::from_hub(&config.qa_model_id).await?;
//!     let embedder = FastEmbedder::load(config.embedding_cache_dir.clone()).await?;
//!
//!     let pipeline =
//!         RagPipeline::new(Arc::new(client), Arc::new(qa), Arc::new(embedder), config.max_results);
//!     let out = pipeline.run("graph neural networks").await?;
//!     println!("{}", out.output);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod formatters;
pub mod inference;
pub mod models;
pub mod pipeline;
pub mod scoring;
pub mod server;

pub use client::ArxivClient;
pub use config::Config;
pub use error::{ClientError, ModelError, PipelineError};
pub use pipeline::{PaperSource, RagPipeline};
pub use server::UiServer;
