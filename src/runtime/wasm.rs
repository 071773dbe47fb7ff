// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! WebAssembly bindings for the docsift core.
//!
//! This is the browser-facing API. JavaScript owns the network (`fetch`) and
//! the DOM; Rust owns everything with rules: how the request URL is spelled,
//! which page is showing, what gets highlighted. Span offsets crossing this
//! boundary are UTF-16 code units so they index JS strings directly.
//!
//! # Session API
//!
//! ```js
//! const session = new DocsiftSession("http://127.0.0.1:8000", 10);
//! const url = session.beginSearch(query, { synonyms: true, resultLimit: 25 });
//! const res = await fetch(url);
//! session.settle(res.status, new Uint8Array(await res.arrayBuffer()));
//! render(session.page());
//! ```

use serde::Serialize;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

use crate::client::{decode_document, decode_search};
use crate::config::ClientConfig;
use crate::highlight::{self, utf16_spans, MatchMode};
use crate::paginate;
use crate::request;
use crate::session::{SearchSession, SearchState};
use crate::types::{SearchOptions, SearchResult};

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn options_from(value: JsValue) -> Result<SearchOptions, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(SearchOptions::default());
    }
    from_value(value).map_err(js_err)
}

/// Page of results for JavaScript consumption.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsPage<'a> {
    items: Vec<JsResult<'a>>,
    number: usize,
    total_pages: usize,
    total_results: usize,
    has_next: bool,
    has_prev: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsResult<'a> {
    rank: usize,
    doc_id: &'a str,
    filename: &'a str,
    score: f64,
    /// Link to the document view, carrying the query.
    href: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsHighlight {
    spans: Vec<highlight::HighlightSpan>,
    mode: MatchMode,
}

// ============================================================================
// FREE FUNCTIONS
// ============================================================================

/// Full search URL for `query` with `options` (`{ spellingCorrection,
/// synonyms, soundex, resultLimit }`, all optional).
#[wasm_bindgen(js_name = buildSearchUrl)]
pub fn build_search_url(base_url: &str, query: &str, options: JsValue) -> Result<String, JsValue> {
    let request = request::build(query, options_from(options)?).map_err(js_err)?;
    Ok(request.url(base_url))
}

#[wasm_bindgen(js_name = documentUrl)]
pub fn document_url(base_url: &str, filename: &str) -> String {
    request::document_url(base_url, filename)
}

#[wasm_bindgen(js_name = documentHref)]
pub fn document_href(filename: &str, query: &str) -> String {
    request::document_href(filename, query)
}

#[wasm_bindgen(js_name = queryFromHref)]
pub fn query_from_href(href: &str) -> Option<String> {
    request::query_from_href(href)
}

/// Highlighted HTML, every segment escaped, matches in `<mark>`.
#[wasm_bindgen]
pub fn highlight(text: &str, query: Option<String>) -> String {
    highlight::highlight_html(text, query.as_deref())
}

/// `{ spans: [{ start, end, matched }], mode }` with UTF-16 offsets.
#[wasm_bindgen(js_name = highlightSpans)]
pub fn highlight_spans(text: &str, query: Option<String>) -> Result<JsValue, JsValue> {
    let (spans, mode) = highlight::Highlighter::new(query.as_deref()).spans_with_mode(text);
    to_value(&JsHighlight {
        spans: utf16_spans(text, &spans),
        mode,
    })
    .map_err(js_err)
}

/// Slice a result array (as returned by the backend) to one page.
#[wasm_bindgen]
pub fn paginate(results: JsValue, page_number: usize, page_size: usize) -> Result<JsValue, JsValue> {
    let results: Vec<SearchResult> = from_value(results).map_err(js_err)?;
    to_value(paginate::paginate(&results, page_number, page_size)).map_err(js_err)
}

#[wasm_bindgen(js_name = totalPages)]
pub fn total_pages(len: usize, page_size: usize) -> usize {
    paginate::total_pages(len, page_size)
}

/// Decode a document response into its text; throws the user-facing message.
#[wasm_bindgen(js_name = decodeDocument)]
pub fn decode_document_body(
    status: u16,
    content_type: Option<String>,
    body: &[u8],
) -> Result<String, JsValue> {
    decode_document(status, content_type.as_deref(), body).map_err(|e| js_err(e.user_message()))
}

// ============================================================================
// SESSION
// ============================================================================

/// Search page state for a browser front end.
#[wasm_bindgen]
pub struct DocsiftSession {
    session: SearchSession,
    config: ClientConfig,
}

#[wasm_bindgen]
impl DocsiftSession {
    #[wasm_bindgen(constructor)]
    pub fn new(base_url: Option<String>, page_size: Option<usize>) -> Result<DocsiftSession, JsValue> {
        let config = ClientConfig::resolve(base_url.as_deref(), page_size);
        let session =
            SearchSession::new(SearchOptions::default(), config.page_size).map_err(js_err)?;
        Ok(DocsiftSession { session, config })
    }

    /// Start a search; returns the URL to fetch. Throws while one is in flight.
    #[wasm_bindgen(js_name = beginSearch)]
    pub fn begin_search(&mut self, query: &str, options: JsValue) -> Result<String, JsValue> {
        self.session.set_options(options_from(options)?);
        let request = self.session.begin_search(query).map_err(js_err)?;
        Ok(request.url(&self.config.base_url))
    }

    /// Feed the finished response back in.
    pub fn settle(&mut self, status: u16, body: &[u8]) -> Result<(), JsValue> {
        let outcome = decode_search(status, body).map(|response| response.results);
        self.session.settle(outcome).map_err(js_err)
    }

    /// `"idle" | "searching" | "success" | "failed"`.
    pub fn state(&self) -> String {
        let state = match self.session.state() {
            SearchState::Idle => "idle",
            SearchState::Searching => "searching",
            SearchState::Success => "success",
            SearchState::Failed(_) => "failed",
        };
        state.to_string()
    }

    #[wasm_bindgen(js_name = isSearching)]
    pub fn is_searching(&self) -> bool {
        self.session.is_searching()
    }

    pub fn error(&self) -> Option<String> {
        self.session.error().map(str::to_owned)
    }

    /// The current page: `{ items, number, totalPages, totalResults, hasNext, hasPrev }`.
    pub fn page(&self) -> Result<JsValue, JsValue> {
        let page = self.session.page();
        let items = page
            .ranked()
            .map(|(rank, r)| JsResult {
                rank,
                doc_id: &r.doc_id,
                filename: &r.filename,
                score: r.score,
                href: self.session.document_href(r),
            })
            .collect();
        to_value(&JsPage {
            items,
            number: page.number,
            total_pages: page.total_pages,
            total_results: page.total_results,
            has_next: page.has_next(),
            has_prev: page.has_prev(),
        })
        .map_err(js_err)
    }

    #[wasm_bindgen(js_name = nextPage)]
    pub fn next_page(&mut self) -> usize {
        self.session.next_page()
    }

    #[wasm_bindgen(js_name = prevPage)]
    pub fn prev_page(&mut self) -> usize {
        self.session.prev_page()
    }

    #[wasm_bindgen(js_name = goTo)]
    pub fn go_to(&mut self, page: usize) -> usize {
        self.session.go_to(page)
    }
}
