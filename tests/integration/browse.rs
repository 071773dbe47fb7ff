//! A whole visit: search, page, open a result, see it highlighted.

use crate::common::{client_for, search_body, Canned, MockBackend};
use docsift::{ClientConfig, DocumentView, SearchOptions, SearchSession, SearchState};

#[tokio::test]
async fn search_page_open_highlight() {
    let backend = MockBackend::start(vec![
        ("GET /search", Canned::json(200, search_body("vector space", 25))),
        (
            "GET /files/doc_011.txt",
            Canned::text("The vector space model ranks documents. Vector math & space."),
        ),
    ])
    .await;
    let config = ClientConfig::resolve(Some(&backend.base_url), Some(10));
    let client = client_for(&config.base_url);
    let mut session = SearchSession::new(SearchOptions::default(), config.page_size).unwrap();

    // Search
    let req = session.begin_search("vector space").unwrap();
    assert!(session.is_searching());
    let outcome = client.search(&req).await.map(|r| r.results);
    session.settle(outcome).unwrap();
    assert_eq!(session.state(), &SearchState::Success);

    // Page
    assert_eq!(session.page().total_pages, 3);
    session.next_page();
    let page = session.page();
    let (rank, result) = page.ranked().nth(1).unwrap();
    assert_eq!(rank, 12);
    assert_eq!(result.filename, "doc_011.txt");

    // Open
    let href = session.document_href(result);
    let mut view = DocumentView::from_href(&href).unwrap();
    view.settle(client.fetch_document(view.filename()).await);

    assert_eq!(
        view.highlighted().as_deref(),
        Some("The <mark>vector space</mark> model ranks documents. Vector math &amp; space.")
    );
}

#[tokio::test]
async fn failed_search_can_be_resubmitted() {
    let backend = MockBackend::start(vec![]).await;
    let client = client_for(&backend.base_url);
    let mut session = SearchSession::default();

    let req = session.begin_search("cat").unwrap();
    session
        .settle(client.search(&req).await.map(|r| r.results))
        .unwrap();
    assert_eq!(session.error(), Some("Not Found"));

    assert!(session.begin_search("cat").is_ok());
}
