//! arXiv API client.
//!
//! Provides an async HTTP client with:
//! - Connection pooling via reqwest
//! - Request pacing (one request every 3 seconds, per arXiv API etiquette)
//! - Atom feed parsing into [`Paper`] values
//!
//! There is no retry and no caching: every query hits arXiv once.

mod feed;

pub use feed::{Feed, parse_feed};

use std::sync::Arc;

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::Client;
use url::Url;

use crate::config::{Config, api};
use crate::error::{ClientError, ClientResult};
use crate::models::{Paper, SortCriterion, SortOrder};
use crate::pipeline::PaperSource;

/// arXiv API client.
#[derive(Clone)]
pub struct ArxivClient {
    /// HTTP client.
    client: Client,

    /// Query endpoint.
    api_url: Url,

    /// Request pacer; `None` when pacing is disabled.
    pacer: Option<Arc<DefaultDirectRateLimiter>>,
}

impl ArxivClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("paper-rag/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .gzip(true)
            .build()?;

        let pacer = Quota::with_period(config.request_spacing)
            .map(|quota| Arc::new(RateLimiter::direct(quota)));

        Ok(Self { client, api_url: config.arxiv_api_url.clone(), pacer })
    }

    /// Query endpoint this client talks to.
    #[must_use]
    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// Search arXiv.
    ///
    /// Returns up to `max_results` papers in the order arXiv ranks them.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-success status, malformed feed,
    /// or an arXiv error entry.
    pub async fn search(
        &self,
        query: &str,
        max_results: usize,
        sort_by: SortCriterion,
        sort_order: SortOrder,
    ) -> ClientResult<Vec<Paper>> {
        let mut url = self.api_url.clone();
        url.query_pairs_mut()
            .append_pair("search_query", query)
            .append_pair("start", "0")
            .append_pair("max_results", &max_results.to_string())
            .append_pair("sortBy", sort_by.as_param())
            .append_pair("sortOrder", sort_order.as_param());

        let body = self.get(url).await?;
        let feed = parse_feed(&body)?;

        if let Some(err) = feed.entries.iter().find(|p| p.entry_id.starts_with(api::ERROR_ID_PREFIX)) {
            return Err(ClientError::Api { message: err.summary.clone() });
        }

        tracing::debug!(
            query,
            returned = feed.entries.len(),
            total = ?feed.total_results,
            "arXiv search complete"
        );

        Ok(feed.entries)
    }

    /// Make a GET request and return the body text.
    async fn get(&self, url: Url) -> ClientResult<String> {
        if let Some(pacer) = &self.pacer {
            pacer.until_ready().await;
        }

        let response = self.client.get(url).send().await?;
        let response = self.handle_response(response).await?;

        Ok(response.text().await?)
    }

    /// Handle API response status codes.
    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        match status.as_u16() {
            429 => {
                let retry_after = response
                    .headers()
                    .get("Retry-After")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60);

                Err(ClientError::rate_limited(retry_after))
            }
            404 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::not_found(text))
            }
            400 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::bad_request(text))
            }
            500..=599 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::server(status.as_u16(), text))
            }
            _ => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::UnexpectedStatus { status: status.as_u16(), message: text })
            }
        }
    }
}

#[async_trait::async_trait]
impl PaperSource for ArxivClient {
    async fn fetch(&self, query: &str, max_results: usize) -> ClientResult<Vec<Paper>> {
        self.search(query, max_results, SortCriterion::Relevance, SortOrder::Descending).await
    }
}

impl std::fmt::Debug for ArxivClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArxivClient")
            .field("api_url", &self.api_url.as_str())
            .field("paced", &self.pacer.is_some())
            .finish()
    }
}
