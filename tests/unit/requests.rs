//! Request building: what goes on the wire for a given form submission.

use docsift::request::{self, document_href, document_url, query_from_href, reindex_url};
use docsift::{SearchOptions, ValidationError};
use pretty_assertions::assert_eq;

const BASE: &str = "http://127.0.0.1:8000";

#[test]
fn default_form_submission() {
    let req = request::build("information retrieval", SearchOptions::default()).unwrap();
    assert_eq!(
        req.url(BASE),
        "http://127.0.0.1:8000/search?q=information%20retrieval&k=10\
         &use_spelling_correction=false&use_synonyms=false&use_soundex=false"
    );
}

#[test]
fn every_flag_on() {
    let options = SearchOptions::new(true, true, true, 100).unwrap();
    let req = request::build("cat", options).unwrap();
    let pairs = req.query_pairs();
    let values: Vec<&str> = pairs.iter().map(|(_, v)| v.as_str()).collect();
    assert_eq!(values, vec!["cat", "100", "true", "true", "true"]);
}

#[test]
fn query_is_forwarded_untrimmed_and_encoded() {
    let req = request::build("  C++ & rust?  ", SearchOptions::default()).unwrap();
    assert_eq!(req.query(), "  C++ & rust?  ");
    assert!(req
        .to_query_string()
        .starts_with("q=%20%20C%2B%2B%20%26%20rust%3F%20%20&k=10"));
}

#[test]
fn empty_query_is_refused() {
    assert_eq!(
        request::build("", SearchOptions::default()).unwrap_err(),
        ValidationError::EmptyQuery
    );
}

#[test]
fn result_limit_bounds() {
    assert!(SearchOptions::default().with_result_limit(1).is_ok());
    assert!(SearchOptions::default().with_result_limit(100).is_ok());
    assert!(matches!(
        SearchOptions::default().with_result_limit(0),
        Err(ValidationError::ResultLimitOutOfRange { value: 0, .. })
    ));
    assert!(SearchOptions::new(false, false, false, 101).is_err());
}

#[test]
fn base_url_trailing_slash_is_ignored() {
    let req = request::build("cat", SearchOptions::default()).unwrap();
    assert_eq!(req.url("http://host:8000/"), req.url("http://host:8000"));
    assert_eq!(reindex_url("http://host:8000/"), "http://host:8000/re-index");
}

#[test]
fn document_urls_escape_one_segment() {
    assert_eq!(
        document_url(BASE, "annual report.txt"),
        "http://127.0.0.1:8000/files/annual%20report.txt"
    );
    assert_eq!(
        document_url(BASE, "a/b?.txt"),
        "http://127.0.0.1:8000/files/a%2Fb%3F.txt"
    );
    assert_eq!(document_url(BASE, "doc_001.txt"), "http://127.0.0.1:8000/files/doc_001.txt");
}

#[test]
fn document_link_carries_the_query() {
    let href = document_href("doc_001.txt", "black & white cat");
    assert_eq!(href, "/files/doc_001.txt?q=black%20%26%20white%20cat");
    assert_eq!(query_from_href(&href).as_deref(), Some("black & white cat"));
}

#[test]
fn query_from_browser_written_links() {
    assert_eq!(
        query_from_href("/files/x.txt?q=black+cat#top").as_deref(),
        Some("black cat")
    );
    assert_eq!(
        query_from_href("/files/x.txt?from=list&q=caf%C3%A9").as_deref(),
        Some("café")
    );
    assert_eq!(query_from_href("/files/x.txt"), None);
    assert_eq!(query_from_href("/files/x.txt?page=2"), None);
}
