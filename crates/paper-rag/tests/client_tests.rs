//! arXiv client tests using wiremock.
//!
//! Exercises query construction, feed parsing and status handling against a
//! mock endpoint.

use std::time::Duration;

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use paper_rag::client::ArxivClient;
use paper_rag::config::Config;
use paper_rag::error::ClientError;
use paper_rag::models::{SortCriterion, SortOrder};
use paper_rag::pipeline::PaperSource;

// =============================================================================
// Test Helpers
// =============================================================================

async fn setup_client(mock_server: &MockServer) -> ArxivClient {
    let config = Config::for_testing(&mock_server.uri());
    ArxivClient::new(&config).unwrap()
}

fn entry(id: &str, title: &str, summary: &str) -> String {
    format!(
        r#"<entry>
    <id>http://arxiv.org/abs/{id}</id>
    <updated>2023-08-02T00:41:18Z</updated>
    <published>2017-06-12T17:57:34Z</published>
    <title>{title}</title>
    <summary>{summary}</summary>
    <author><name>Ashish Vaswani</name></author>
    <author><name>Noam Shazeer</name></author>
    <link href="http://arxiv.org/abs/{id}" rel="alternate" type="text/html"/>
    <link title="pdf" href="http://arxiv.org/pdf/{id}" rel="related" type="application/pdf"/>
    <arxiv:primary_category xmlns:arxiv="http://arxiv.org/schemas/atom" term="cs.CL" scheme="http://arxiv.org/schemas/atom"/>
    <category term="cs.CL" scheme="http://arxiv.org/schemas/atom"/>
    <category term="cs.LG" scheme="http://arxiv.org/schemas/atom"/>
  </entry>"#
    )
}

fn feed(total: u64, entries: &[String]) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title type="html">ArXiv Query: search_query=all:test</title>
  <id>http://arxiv.org/api/cHxbiOdZaP56ODnBPIenZhzg5f8</id>
  <updated>2024-01-01T00:00:00-05:00</updated>
  <opensearch:totalResults xmlns:opensearch="http://a9.com/-/spec/opensearch/1.1/">{total}</opensearch:totalResults>
  <opensearch:startIndex xmlns:opensearch="http://a9.com/-/spec/opensearch/1.1/">0</opensearch:startIndex>
  {}
</feed>"#,
        entries.join("\n  ")
    )
}

fn atom(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "application/atom+xml; charset=utf-8")
}

// =============================================================================
// Query Construction Tests
// =============================================================================

#[tokio::test]
async fn test_search_sends_relevance_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/query"))
        .and(query_param("search_query", "graph neural networks"))
        .and(query_param("start", "0"))
        .and(query_param("max_results", "5"))
        .and(query_param("sortBy", "relevance"))
        .and(query_param("sortOrder", "descending"))
        .respond_with(atom(feed(0, &[])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server).await;
    let papers = client.fetch("graph neural networks", 5).await.unwrap();
    assert!(papers.is_empty());
}

#[tokio::test]
async fn test_search_passes_sort_options() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/query"))
        .and(query_param("sortBy", "submittedDate"))
        .and(query_param("sortOrder", "ascending"))
        .and(query_param("max_results", "2"))
        .respond_with(atom(feed(0, &[])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server).await;
    client
        .search("cat:cs.CL", 2, SortCriterion::SubmittedDate, SortOrder::Ascending)
        .await
        .unwrap();
}

// =============================================================================
// Feed Handling Tests
// =============================================================================

#[tokio::test]
async fn test_search_parses_entries_in_order() {
    let mock_server = MockServer::start().await;
    let entries = vec![
        entry("1706.03762v7", "Attention Is All You\n      Need", "  The dominant sequence transduction models.  "),
        entry("1810.04805v2", "BERT", "We introduce a new language representation model."),
    ];

    Mock::given(method("GET"))
        .and(path("/api/query"))
        .respond_with(atom(feed(2, &entries)))
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server).await;
    let papers = client.fetch("attention", 5).await.unwrap();

    assert_eq!(papers.len(), 2);
    assert_eq!(papers[0].title, "Attention Is All You Need");
    assert_eq!(papers[0].summary, "The dominant sequence transduction models.");
    assert_eq!(papers[0].link(), "http://arxiv.org/abs/1706.03762v7");
    assert_eq!(papers[0].author_names(), "Ashish Vaswani, Noam Shazeer");
    assert_eq!(papers[0].year(), Some(2017));
    assert_eq!(papers[0].primary_category.as_deref(), Some("cs.CL"));
    assert_eq!(papers[0].categories, vec!["cs.CL", "cs.LG"]);
    assert_eq!(papers[0].pdf_url(), Some("http://arxiv.org/pdf/1706.03762v7"));
    assert_eq!(papers[1].title, "BERT");
}

#[tokio::test]
async fn test_search_error_entry_is_api_error() {
    let mock_server = MockServer::start().await;
    let error_entry = r#"<entry>
    <id>http://arxiv.org/api/errors#incorrect_id_format_for_1234</id>
    <title>Error</title>
    <summary>incorrect id format for 1234</summary>
    <updated>2024-01-01T00:00:00-05:00</updated>
    <link href="http://arxiv.org/api/errors#incorrect_id_format_for_1234" rel="alternate" type="text/html"/>
    <author><name>arXiv api core</name></author>
  </entry>"#
        .to_string();

    Mock::given(method("GET"))
        .and(path("/api/query"))
        .respond_with(atom(feed(1, &[error_entry])))
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server).await;
    let err = client.fetch("id:1234", 5).await.unwrap_err();

    match err {
        ClientError::Api { message } => assert_eq!(message, "incorrect id format for 1234"),
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_search_truncated_feed_is_feed_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/query"))
        .respond_with(atom(
            "<feed xmlns=\"http://www.w3.org/2005/Atom\"><entry><id>http://arxiv.org/abs/1</id>"
                .to_string(),
        ))
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server).await;
    let err = client.fetch("x", 5).await.unwrap_err();
    assert!(matches!(err, ClientError::Feed(_)), "got {err:?}");
}

// =============================================================================
// Status Handling Tests
// =============================================================================

#[tokio::test]
async fn test_rate_limited_uses_retry_after() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/query"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "30"))
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server).await;
    let err = client.fetch("x", 5).await.unwrap_err();

    assert_eq!(err.retry_after(), Some(Duration::from_secs(30)));
}

#[tokio::test]
async fn test_rate_limited_defaults_retry_after() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/query"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server).await;
    let err = client.fetch("x", 5).await.unwrap_err();

    assert_eq!(err.retry_after(), Some(Duration::from_secs(60)));
}

#[tokio::test]
async fn test_server_error_carries_status_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/query"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server).await;
    let err = client.fetch("x", 5).await.unwrap_err();

    match err {
        ClientError::Server { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "upstream down");
        }
        other => panic!("expected Server error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_bad_request_and_unexpected_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("search_query", "bad"))
        .respond_with(ResponseTemplate::new(400).set_body_string("malformed query"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("search_query", "teapot"))
        .respond_with(ResponseTemplate::new(418))
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server).await;

    let err = client.fetch("bad", 5).await.unwrap_err();
    assert!(matches!(err, ClientError::BadRequest { ref message } if message == "malformed query"));

    let err = client.fetch("teapot", 5).await.unwrap_err();
    assert!(matches!(err, ClientError::UnexpectedStatus { status: 418, .. }));
}

// =============================================================================
// Client Behavior Tests
// =============================================================================

#[tokio::test]
async fn test_client_debug_shows_endpoint() {
    let mock_server = MockServer::start().await;
    let client = setup_client(&mock_server).await;

    let debug = format!("{client:?}");
    assert!(debug.contains("/api/query"));
    assert!(debug.contains("paced: false"));
}

#[test]
fn test_default_client_is_paced() {
    let client = ArxivClient::new(&Config::default()).unwrap();
    assert_eq!(client.api_url().as_str(), "https://export.arxiv.org/api/query");
    assert!(format!("{client:?}").contains("paced: true"));
}
