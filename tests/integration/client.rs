//! `SearchClient` against canned responses.

use crate::common::{client_for, dead_backend_url, search_body, Canned, MockBackend};
use docsift::error::GENERIC_FAILURE;
use docsift::{request, ClientConfig, ClientError, SearchClient, SearchOptions};
use serde_json::json;

#[tokio::test]
async fn search_sends_the_canonical_query() {
    let backend = MockBackend::start(vec![("GET /search", Canned::json(200, search_body("black cat", 3)))])
        .await;
    let client = client_for(&backend.base_url);

    let options = SearchOptions::default()
        .with_synonyms(true)
        .with_result_limit(25)
        .unwrap();
    let req = request::build("black cat", options).unwrap();
    let response = client.search(&req).await.unwrap();

    assert_eq!(
        backend.requests(),
        vec![
            "GET /search?q=black%20cat&k=25&use_spelling_correction=false\
             &use_synonyms=true&use_soundex=false"
                .to_string()
        ]
    );
    assert_eq!(response.query.as_deref(), Some("black cat"));
    let ids: Vec<&str> = response.results.iter().map(|r| r.doc_id.as_str()).collect();
    assert_eq!(ids, vec!["0", "1", "2"]);
}

#[tokio::test]
async fn backend_detail_is_surfaced() {
    let backend = MockBackend::start(vec![(
        "GET /search",
        Canned::json(
            503,
            json!({ "detail": "Indexes are not loaded. Please run the indexing process." }),
        ),
    )])
    .await;
    let client = client_for(&backend.base_url);

    let req = request::build("cat", SearchOptions::default()).unwrap();
    let err = client.search(&req).await.unwrap_err();
    assert!(matches!(err, ClientError::Backend { status: 503, .. }));
    assert_eq!(
        err.user_message(),
        "Indexes are not loaded. Please run the indexing process."
    );
}

#[tokio::test]
async fn proxy_error_pages_are_generic() {
    let backend = MockBackend::start(vec![(
        "GET /search",
        Canned::html(502, "<html><body>Bad Gateway</body></html>"),
    )])
    .await;
    let client = client_for(&backend.base_url);

    let req = request::build("cat", SearchOptions::default()).unwrap();
    let err = client.search(&req).await.unwrap_err();
    assert_eq!(err.user_message(), GENERIC_FAILURE);
}

#[tokio::test]
async fn unexpected_success_shape_is_generic() {
    let backend =
        MockBackend::start(vec![("GET /search", Canned::json(200, json!({ "hits": [] })))]).await;
    let client = client_for(&backend.base_url);

    let req = request::build("cat", SearchOptions::default()).unwrap();
    let err = client.search(&req).await.unwrap_err();
    assert!(matches!(err, ClientError::MalformedResponse { status: 200, .. }));
    assert_eq!(err.user_message(), GENERIC_FAILURE);
}

#[tokio::test]
async fn unreachable_backend_is_a_network_failure() {
    let client = client_for(&dead_backend_url().await);

    let req = request::build("cat", SearchOptions::default()).unwrap();
    let err = client.search(&req).await.unwrap_err();
    assert!(matches!(err, ClientError::Network(_)));
    assert_eq!(err.user_message(), GENERIC_FAILURE);
}

#[test]
fn client_takes_base_url_from_config() {
    let config = ClientConfig::resolve(Some("http://search.internal:9000/"), None);
    let client = SearchClient::new(&config).unwrap();
    assert_eq!(client.base_url(), "http://search.internal:9000");
}

#[tokio::test]
async fn raw_and_enveloped_documents() {
    let backend = MockBackend::start(vec![
        ("GET /files/plain.txt", Canned::text("The black cat sat.")),
        (
            "GET /files/wrapped%20doc.txt",
            Canned::json(200, json!({ "content": "Wrapped <text>", "query": "" })),
        ),
    ])
    .await;
    let client = client_for(&backend.base_url);

    assert_eq!(
        client.fetch_document("plain.txt").await.unwrap(),
        "The black cat sat."
    );
    assert_eq!(
        client.fetch_document("wrapped doc.txt").await.unwrap(),
        "Wrapped <text>"
    );
}

#[tokio::test]
async fn missing_document() {
    let backend = MockBackend::start(vec![(
        "GET /files/gone.txt",
        Canned::json(404, json!({ "detail": "File not found" })),
    )])
    .await;
    let client = client_for(&backend.base_url);

    let err = client.fetch_document("gone.txt").await.unwrap_err();
    assert_eq!(err.user_message(), "File not found");
}

#[tokio::test]
async fn reindex_posts_and_reports() {
    let backend = MockBackend::start(vec![(
        "POST /re-index",
        Canned::json(
            200,
            json!({ "message": "Re-indexing completed and new indexes are loaded." }),
        ),
    )])
    .await;
    let client = client_for(&backend.base_url);

    assert_eq!(
        client.reindex().await.unwrap(),
        "Re-indexing completed and new indexes are loaded."
    );
    assert_eq!(backend.requests(), vec!["POST /re-index".to_string()]);
}

#[tokio::test]
async fn reindex_failure_detail() {
    let backend = MockBackend::start(vec![(
        "POST /re-index",
        Canned::json(500, json!({ "detail": "An error occurred during indexing: disk full" })),
    )])
    .await;
    let client = client_for(&backend.base_url);

    let err = client.reindex().await.unwrap_err();
    assert_eq!(err.user_message(), "An error occurred during indexing: disk full");
}
