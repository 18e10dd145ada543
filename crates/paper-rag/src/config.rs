//! Configuration for the paper discovery pipeline.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

/// arXiv API constants.
pub mod api {
    use std::time::Duration;

    /// arXiv Atom query endpoint.
    pub const ARXIV_API_URL: &str = "https://export.arxiv.org/api/query";

    /// Number of relevance-ranked papers fetched per query.
    pub const MAX_RESULTS: usize = 5;

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Minimum spacing between consecutive arXiv requests (arXiv API etiquette).
    pub const REQUEST_SPACING: Duration = Duration::from_secs(3);

    /// Id prefix arXiv uses for error entries in an otherwise valid feed.
    pub const ERROR_ID_PREFIX: &str = "http://arxiv.org/api/errors";
}

/// Pretrained model identifiers and inference limits.
pub mod models {
    /// HuggingFace repository of the extractive QA model.
    pub const QA_MODEL_ID: &str = "distilbert-base-cased-distilled-squad";

    /// Sentence-embedding model used for retrieval scoring.
    pub const EMBEDDING_MODEL_NAME: &str = "all-MiniLM-L6-v2";

    /// Token limit of the embedding model; longer texts are truncated.
    pub const EMBEDDING_MAX_SEQ_LEN: usize = 256;

    /// Token window for a (question, context) pair.
    pub const QA_MAX_SEQ_LEN: usize = 384;

    /// Token overlap between consecutive context windows.
    pub const QA_DOC_STRIDE: usize = 128;

    /// Longest answer span, in tokens.
    pub const QA_MAX_ANSWER_LEN: usize = 15;
}

/// Scoring thresholds.
pub mod thresholds {
    /// Cosine similarity strictly above this is "High".
    pub const RETRIEVAL_HIGH: f32 = 0.7;

    /// Cosine similarity strictly above this (and not High) is "Medium".
    pub const RETRIEVAL_MEDIUM: f32 = 0.4;

    /// Non-substring answers with more words than this are "Fair".
    pub const SUMMARY_FAIR_MIN_WORDS: usize = 5;
}

/// Web UI constants.
pub mod ui {
    /// Default bind host.
    pub const DEFAULT_HOST: &str = "127.0.0.1";

    /// Default port.
    pub const DEFAULT_PORT: u16 = 7860;
}

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// arXiv query endpoint (overridable for mock servers).
    pub arxiv_api_url: Url,

    /// Papers fetched per query.
    pub max_results: usize,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Minimum spacing between arXiv requests; zero disables pacing.
    pub request_spacing: Duration,

    /// HuggingFace repository of the QA model.
    pub qa_model_id: String,

    /// Cache directory for the embedding model (fastembed default when unset).
    pub embedding_cache_dir: Option<PathBuf>,
}

impl Config {
    /// Create a configuration for the given arXiv endpoint.
    ///
    /// # Errors
    ///
    /// Returns error if `arxiv_api_url` is not a valid URL.
    pub fn new(arxiv_api_url: &str, max_results: usize) -> anyhow::Result<Self> {
        Ok(Self {
            arxiv_api_url: Url::parse(arxiv_api_url)?,
            max_results,
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            request_spacing: api::REQUEST_SPACING,
            qa_model_id: models::QA_MODEL_ID.to_string(),
            embedding_cache_dir: None,
        })
    }

    /// Create a test configuration pointing at a mock server.
    ///
    /// # Panics
    ///
    /// Panics if `base_url` is not a valid URL.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            arxiv_api_url: Url::parse(&format!("{base_url}/api/query"))
                .expect("mock server uri is a valid url"),
            max_results: api::MAX_RESULTS,
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            request_spacing: Duration::ZERO, // No pacing in tests
            qa_model_id: models::QA_MODEL_ID.to_string(),
            embedding_cache_dir: None,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Recognised: `ARXIV_API_URL`, `PAPER_RAG_MAX_RESULTS`, `PAPER_RAG_QA_MODEL`,
    /// `FASTEMBED_CACHE_DIR`.
    ///
    /// # Errors
    ///
    /// Returns error if environment variables are invalid.
    pub fn from_env() -> anyhow::Result<Self> {
        let url = std::env::var("ARXIV_API_URL").unwrap_or_else(|_| api::ARXIV_API_URL.into());
        let max_results = match std::env::var("PAPER_RAG_MAX_RESULTS") {
            Ok(v) => v.parse()?,
            Err(_) => api::MAX_RESULTS,
        };

        let mut config = Self::new(&url, max_results)?;
        if let Ok(model) = std::env::var("PAPER_RAG_QA_MODEL") {
            config.qa_model_id = model;
        }
        config.embedding_cache_dir = std::env::var("FASTEMBED_CACHE_DIR").ok().map(PathBuf::from);
        Ok(config)
    }

    /// Check if request pacing is enabled.
    #[must_use]
    pub const fn paces_requests(&self) -> bool {
        !self.request_spacing.is_zero()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            arxiv_api_url: Url::parse(api::ARXIV_API_URL).expect("constant url is valid"),
            max_results: api::MAX_RESULTS,
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            request_spacing: api::REQUEST_SPACING,
            qa_model_id: models::QA_MODEL_ID.to_string(),
            embedding_cache_dir: None,
        }
    }
}
