//! Error types for the paper discovery pipeline.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

use std::time::Duration;

/// Errors from the arXiv client layer.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Atom feed could not be parsed
    #[error("Failed to parse feed: {0}")]
    Feed(String),

    /// arXiv returned an error entry instead of results
    #[error("arXiv API error: {message}")]
    Api {
        /// Error summary reported by arXiv
        message: String,
    },

    /// Rate limited by arXiv (429 response)
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Suggested wait time before retry
        retry_after: Duration,
    },

    /// Resource not found (404 response)
    #[error("Resource not found: {resource}")]
    NotFound {
        /// Description of the missing resource
        resource: String,
    },

    /// Invalid request parameters (400 response)
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message from API
        message: String,
    },

    /// Server error (5xx response)
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },
}

impl ClientError {
    /// Create a rate limited error with retry-after duration.
    #[must_use]
    pub fn rate_limited(seconds: u64) -> Self {
        Self::RateLimited { retry_after: Duration::from_secs(seconds) }
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    /// Create a bad request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }

    /// Create a feed parsing error from any displayable parser error.
    #[must_use]
    pub fn feed(err: impl std::fmt::Display) -> Self {
        Self::Feed(err.to_string())
    }

    /// Get the retry-after duration if this is a rate limit error.
    #[must_use]
    pub const fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after } => Some(*retry_after),
            _ => None,
        }
    }
}

/// Errors from model loading and inference.
#[derive(thiserror::Error, Debug)]
pub enum ModelError {
    /// Weights, config or tokenizer could not be fetched or loaded
    #[error("Model load failed: {0}")]
    Load(String),

    /// Tokenization failed
    #[error("Tokenizer error: {0}")]
    Tokenizer(String),

    /// Forward pass failed
    #[error("Inference failed: {0}")]
    Inference(String),

    /// Sentence embedding failed
    #[error("Embedding failed: {0}")]
    Embedding(String),

    /// Blocking inference task panicked or was cancelled
    #[error("Inference task failed: {0}")]
    Join(String),
}

impl From<candle_core::Error> for ModelError {
    fn from(err: candle_core::Error) -> Self {
        Self::Inference(err.to_string())
    }
}

impl From<tokio::task::JoinError> for ModelError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Join(err.to_string())
    }
}

/// Errors from a pipeline run.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    /// Paper fetch failed
    #[error("Paper search failed: {0}")]
    Fetch(#[from] ClientError),

    /// Model inference failed
    #[error("Model error: {0}")]
    Model(#[from] ModelError),
}

impl PipelineError {
    /// Convert to a user-friendly error message for the UI.
    #[must_use]
    pub fn to_user_message(&self) -> String {
        match self {
            Self::Fetch(ClientError::Api { message }) => {
                format!("arXiv rejected the query: {message}")
            }
            Self::Fetch(err) => match err.retry_after() {
                Some(wait) => format!("Rate limited by arXiv. Please wait {wait:?} before retrying."),
                None => self.to_string(),
            },
            Self::Model(_) => self.to_string(),
        }
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Result type alias for pipeline runs.
pub type PipelineResult<T> = Result<T, PipelineError>;
