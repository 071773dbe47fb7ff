//! The search page and document page state machines, driven the way a
//! front end drives them.

use crate::common::{make_batch, make_results};
use docsift::error::GENERIC_FAILURE;
use docsift::{
    ClientError, DocumentState, DocumentView, SearchOptions, SearchSession, SearchState,
    SessionError, ValidationError,
};

#[test]
fn search_page_round_trip() {
    let mut session = SearchSession::new(SearchOptions::default(), 10).unwrap();
    assert_eq!(session.state(), &SearchState::Idle);

    let request = session.begin_search("cat").unwrap();
    assert_eq!(request.query(), "cat");
    assert!(session.is_searching());

    session.settle(Ok(make_results(12))).unwrap();
    assert_eq!(session.state(), &SearchState::Success);
    assert_eq!(session.page().items.len(), 10);
    assert_eq!(session.next_page(), 2);
    assert_eq!(session.page().items.len(), 2);
}

#[test]
fn submit_is_disabled_while_searching() {
    let mut session = SearchSession::default();
    session.begin_search("first").unwrap();
    assert_eq!(
        session.begin_search("second").unwrap_err(),
        SessionError::SearchInFlight
    );
}

#[test]
fn settle_without_a_search_is_refused() {
    let mut session = SearchSession::default();
    assert_eq!(
        session.settle(Ok(make_results(1))).unwrap_err(),
        SessionError::NotSearching
    );
}

#[test]
fn blank_input_never_reaches_the_builder() {
    let mut session = SearchSession::default();
    assert_eq!(
        session.begin_search("   ").unwrap_err(),
        SessionError::Validation(ValidationError::EmptyQuery)
    );
    assert_eq!(session.state(), &SearchState::Idle);
}

#[test]
fn new_search_hides_old_results_until_it_settles() {
    let mut session = SearchSession::default();
    session.begin_search("old").unwrap();
    session.settle(Ok(make_batch("old", 30))).unwrap();
    session.go_to(3);

    session.begin_search("new").unwrap();
    assert!(session.page().items.is_empty());

    session.settle(Ok(make_batch("new", 5))).unwrap();
    let page = session.page();
    assert_eq!(page.number, 1);
    assert!(page.items.iter().all(|r| r.doc_id.starts_with("new-")));
}

#[test]
fn failures_show_the_backend_detail_or_a_generic_message() {
    let mut session = SearchSession::default();

    session.begin_search("cat").unwrap();
    session
        .settle(Err(ClientError::Backend {
            status: 400,
            detail: Some("Query cannot be empty.".into()),
        }))
        .unwrap();
    assert_eq!(session.error(), Some("Query cannot be empty."));

    session.begin_search("cat").unwrap();
    assert_eq!(session.error(), None);
    session
        .settle(Err(ClientError::MalformedResponse {
            status: 200,
            reason: "missing field `results`".into(),
        }))
        .unwrap();
    assert_eq!(session.error(), Some(GENERIC_FAILURE));
}

#[test]
fn result_links_open_the_document_with_the_query() {
    let mut session = SearchSession::default();
    session.begin_search("black cat").unwrap();
    session.settle(Ok(make_results(3))).unwrap();

    let href = session.document_href(&session.results()[1]);
    assert_eq!(href, "/files/doc_001.txt?q=black%20cat");

    let mut view = DocumentView::from_href(&href).unwrap();
    assert_eq!(view.filename(), "doc_001.txt");
    assert_eq!(view.query(), Some("black cat"));
    assert_eq!(view.state(), &DocumentState::Loading);

    view.settle(Ok("A black cat & a dog".into()));
    assert_eq!(
        view.highlighted().as_deref(),
        Some("A <mark>black cat</mark> &amp; a dog")
    );
}

#[test]
fn document_failure_is_shown_once() {
    let mut view = DocumentView::open("missing.txt", Some("cat".into()));
    view.settle(Err(ClientError::Backend {
        status: 404,
        detail: Some("File not found".into()),
    }));
    assert_eq!(view.state(), &DocumentState::Failed("File not found".into()));
    assert_eq!(view.text(), None);
    assert_eq!(view.highlighted(), None);
}

#[test]
fn links_that_are_not_documents() {
    assert!(DocumentView::from_href("/search?q=cat").is_none());
    assert!(DocumentView::from_href("/files/").is_none());
    let view = DocumentView::from_href("/files/annual%20report.txt").unwrap();
    assert_eq!(view.filename(), "annual report.txt");
    assert_eq!(view.query(), None);
}
