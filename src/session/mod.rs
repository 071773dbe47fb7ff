// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Explicit session state for the search page and the document page.
//!
//! The search page is a small state machine:
//!
//! ```text
//!            begin_search              settle(Ok)
//!   Idle ───────────────▶ Searching ─────────────▶ Success ─┐
//!     ▲                      │                        │     │ begin_search
//!     │                      │ settle(Err)            ▼     │
//!     │                      └──────────────────▶ Failed ───┤
//!     │                                                     │
//!     └──────────────── (never returns) ◀───────────────────┘
//! ```
//!
//! `begin_search` while `Searching` is refused: that refusal is the disabled
//! submit button, made testable. There is no cancellation and no timeout; a
//! search that never settles leaves the session in `Searching`.
//!
//! Results live in a [`Paginator`] that is cleared when a search begins and
//! replaced wholesale when it succeeds, so a reader sees either the old list,
//! nothing, or the new list. Never a mix.
//!
//! The document page is simpler: `Loading -> Loaded | Failed`, with the query
//! carried over from the result link so highlights can be recomputed locally.

use thiserror::Error;

use crate::error::{ClientError, ValidationError};
use crate::highlight::{highlight_html, highlight_spans, HighlightSpan};
use crate::paginate::{Page, Paginator};
use crate::request;
use crate::types::{SearchOptions, SearchRequest, SearchResult};

/// Where the search page is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    Searching,
    Success,
    /// Holds the message shown to the user.
    Failed(String),
}

/// Transitions the session refuses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("a search is already in flight")]
    SearchInFlight,

    #[error("no search is in flight")]
    NotSearching,

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// State behind one search page.
#[derive(Debug, Clone)]
pub struct SearchSession {
    state: SearchState,
    options: SearchOptions,
    paginator: Paginator,
    query: Option<String>,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self {
            state: SearchState::Idle,
            options: SearchOptions::default(),
            paginator: Paginator::default(),
            query: None,
        }
    }
}

impl SearchSession {
    pub fn new(options: SearchOptions, page_size: usize) -> Result<Self, ValidationError> {
        Ok(Self {
            state: SearchState::Idle,
            options,
            paginator: Paginator::new(Vec::new(), page_size)?,
            query: None,
        })
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// True while the submit control should be disabled.
    pub fn is_searching(&self) -> bool {
        self.state == SearchState::Searching
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Options for the *next* search; the one in flight keeps its own.
    pub fn set_options(&mut self, options: SearchOptions) {
        self.options = options;
    }

    /// The query of the current (or last) search, verbatim.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Message of the last failure, if the last search failed.
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            SearchState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Submit `query` with the current options.
    ///
    /// A blank query is refused here, as the required-field check of the
    /// input layer; the query itself is forwarded untrimmed. Starting a
    /// search drops the previous results and error.
    pub fn begin_search(&mut self, query: &str) -> Result<SearchRequest, SessionError> {
        if self.is_searching() {
            return Err(SessionError::SearchInFlight);
        }
        if query.trim().is_empty() {
            return Err(ValidationError::EmptyQuery.into());
        }
        let request = request::build(query, self.options)?;

        self.paginator.clear();
        self.query = Some(query.to_string());
        self.state = SearchState::Searching;
        tracing::debug!(query = %query, "search started");
        Ok(request)
    }

    /// Record how the in-flight search ended.
    pub fn settle(
        &mut self,
        outcome: Result<Vec<SearchResult>, ClientError>,
    ) -> Result<(), SessionError> {
        if !self.is_searching() {
            return Err(SessionError::NotSearching);
        }
        match outcome {
            Ok(results) => {
                tracing::debug!(count = results.len(), "search settled");
                self.paginator.replace(results);
                self.state = SearchState::Success;
            }
            Err(e) => {
                tracing::warn!(error = %e, "search failed");
                self.state = SearchState::Failed(e.user_message());
            }
        }
        Ok(())
    }

    pub fn page(&self) -> Page<'_> {
        self.paginator.page()
    }

    pub fn next_page(&mut self) -> usize {
        self.paginator.next_page()
    }

    pub fn prev_page(&mut self) -> usize {
        self.paginator.prev_page()
    }

    pub fn go_to(&mut self, page: usize) -> usize {
        self.paginator.go_to(page)
    }

    pub fn results(&self) -> &[SearchResult] {
        self.paginator.results()
    }

    /// Link from `result` to its document view, carrying this session's query.
    pub fn document_href(&self, result: &SearchResult) -> String {
        request::document_href(&result.filename, self.query.as_deref().unwrap_or_default())
    }
}

// ============================================================================
// DOCUMENT VIEW
// ============================================================================

/// Where the document page is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentState {
    Loading,
    Loaded(String),
    Failed(String),
}

/// State behind one document page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentView {
    filename: String,
    query: Option<String>,
    state: DocumentState,
}

impl DocumentView {
    /// Start loading `filename`, remembering the query to highlight.
    pub fn open(filename: impl Into<String>, query: Option<String>) -> Self {
        Self {
            filename: filename.into(),
            query,
            state: DocumentState::Loading,
        }
    }

    /// Open from a result link (`/files/{name}?q=...`).
    ///
    /// `None` if the link doesn't point at a document.
    pub fn from_href(href: &str) -> Option<Self> {
        let path = href.split(['?', '#']).next().unwrap_or_default();
        let encoded = path.strip_prefix("/files/")?;
        if encoded.is_empty() {
            return None;
        }
        let filename = urlencoding::decode(encoded).ok()?.into_owned();
        Some(Self::open(filename, request::query_from_href(href)))
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn state(&self) -> &DocumentState {
        &self.state
    }

    /// Record how the fetch ended. Later calls overwrite earlier ones.
    pub fn settle(&mut self, outcome: Result<String, ClientError>) {
        self.state = match outcome {
            Ok(text) => DocumentState::Loaded(text),
            Err(e) => {
                tracing::warn!(filename = %self.filename, error = %e, "document fetch failed");
                DocumentState::Failed(e.user_message())
            }
        };
    }

    /// Loaded text, if any.
    pub fn text(&self) -> Option<&str> {
        match &self.state {
            DocumentState::Loaded(text) => Some(text),
            _ => None,
        }
    }

    /// Highlight spans of the loaded text against the carried query.
    pub fn spans(&self) -> Option<Vec<HighlightSpan>> {
        self.text()
            .map(|text| highlight_spans(text, self.query.as_deref()))
    }

    /// Loaded text rendered as highlighted HTML, escaped even without a query.
    pub fn highlighted(&self) -> Option<String> {
        self.text()
            .map(|text| highlight_html(text, self.query.as_deref()))
    }
}
