//! Client core for a vector-space document search service.
//!
//! The backend ranks documents; this crate does everything around that: turns
//! what the user typed into a request, pages through the ranked list, and
//! lights up the query inside a fetched document. The same core runs natively
//! (the `docsift` CLI, over reqwest) and in the browser (the `wasm` feature,
//! where JavaScript does the fetching).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  request    │────▶│   client     │────▶│  paginate    │
//! │ (build, URL)│     │ (transport,  │     │ (Paginator,  │
//! │             │     │  decode)     │     │  Page)       │
//! └─────────────┘     └──────────────┘     └──────────────┘
//!        │                   │                    │
//!        ▼                   ▼                    ▼
//! ┌─────────────────────────────────────────────────────┐
//! │                      session                         │
//! │  (SearchSession: Idle → Searching → Success/Failed, │
//! │   DocumentView: Loading → Loaded/Failed)            │
//! └─────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//!                     ┌─────────────┐
//!                     │  highlight  │
//!                     │ (spans,     │
//!                     │  <mark>)    │
//!                     └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use docsift::{highlight, request, SearchOptions};
//!
//! let options = SearchOptions::default().with_synonyms(true);
//! let req = request::build("black cat", options).unwrap();
//! assert_eq!(
//!     req.url("http://127.0.0.1:8000"),
//!     "http://127.0.0.1:8000/search?q=black%20cat&k=10\
//!      &use_spelling_correction=false&use_synonyms=true&use_soundex=false"
//! );
//!
//! let html = highlight("The black cat sat.", Some("black cat"));
//! assert_eq!(html, "The <mark>black cat</mark> sat.");
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod highlight;
pub mod paginate;
pub mod request;
pub mod runtime;
pub mod session;
pub mod types;

// Test utilities - always compiled but hidden from docs
#[doc(hidden)]
pub mod testing;

// Re-exports for public API
#[cfg(feature = "client")]
pub use client::SearchClient;
pub use client::{decode_document, decode_reindex, decode_search};
pub use config::ClientConfig;
pub use error::{ClientError, ValidationError};
pub use highlight::{
    highlight, highlight_html, highlight_spans, HighlightSpan, Highlighter, MatchMode,
};
pub use paginate::{paginate, total_pages, Page, Paginator};
pub use session::{DocumentState, DocumentView, SearchSession, SearchState, SessionError};
pub use types::{SearchOptions, SearchRequest, SearchResponse, SearchResult};
