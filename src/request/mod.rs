// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Turning what the user typed into what goes over the wire.
//!
//! `build` is the whole contract: a non-empty query plus validated options
//! become a `SearchRequest`. Everything else in this module is encoding of
//! that descriptor (query string, URLs, the navigation link to a document).
//! All of it is pure, so the WASM front end and the native client produce
//! byte-identical URLs.
//!
//! # Wire format
//!
//! | param                     | value                          |
//! |---------------------------|--------------------------------|
//! | `q`                       | raw query, percent-encoded     |
//! | `k`                       | result limit                   |
//! | `use_spelling_correction` | `"true"` / `"false"`           |
//! | `use_synonyms`            | `"true"` / `"false"`           |
//! | `use_soundex`             | `"true"` / `"false"`           |
//!
//! Parameter order is fixed, which makes the query string canonical: the
//! same request always encodes to the same bytes.

use crate::error::ValidationError;
use crate::types::{SearchOptions, SearchRequest};

/// Build the outbound descriptor for a search.
///
/// The query is kept verbatim: no trimming, no case folding. Whether
/// whitespace-only input counts as "empty" is the caller's call; this only
/// rejects the truly empty string.
pub fn build(query: &str, options: SearchOptions) -> Result<SearchRequest, ValidationError> {
    if query.is_empty() {
        return Err(ValidationError::EmptyQuery);
    }
    Ok(SearchRequest {
        query: query.to_string(),
        options,
    })
}

fn flag(enabled: bool) -> String {
    let literal = if enabled { "true" } else { "false" };
    literal.to_string()
}

impl SearchRequest {
    /// Query parameters in canonical order.
    pub fn query_pairs(&self) -> [(&'static str, String); 5] {
        let options = &self.options;
        [
            ("q", self.query.clone()),
            ("k", options.result_limit().to_string()),
            ("use_spelling_correction", flag(options.spelling_correction())),
            ("use_synonyms", flag(options.synonyms())),
            ("use_soundex", flag(options.soundex())),
        ]
    }

    /// `q=...&k=...&...`, every key and value percent-encoded.
    pub fn to_query_string(&self) -> String {
        self.query_pairs()
            .iter()
            .map(|(key, value)| {
                format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Full search URL against `base_url`.
    pub fn url(&self, base_url: &str) -> String {
        format!("{}/search?{}", trim_base(base_url), self.to_query_string())
    }
}

/// URL of a document body on the backend.
///
/// The filename comes verbatim from a previous `SearchResult`; it is only
/// escaped as far as a single path segment requires.
pub fn document_url(base_url: &str, filename: &str) -> String {
    format!("{}/files/{}", trim_base(base_url), encode_path_segment(filename))
}

/// URL that triggers a backend rebuild of its indexes.
pub fn reindex_url(base_url: &str) -> String {
    format!("{}/re-index", trim_base(base_url))
}

/// Link from a result row to the document view, carrying the original query.
///
/// The document view recovers the query with [`query_from_href`] and
/// re-highlights locally, so the backend never has to echo match offsets.
pub fn document_href(filename: &str, query: &str) -> String {
    format!(
        "/files/{}?q={}",
        encode_path_segment(filename),
        urlencoding::encode(query)
    )
}

/// Recover the carried query from a document-view link.
///
/// Returns `None` when there is no `q` parameter or it doesn't decode to
/// UTF-8. `+` is read as a space, as browsers write it in form submissions.
pub fn query_from_href(href: &str) -> Option<String> {
    let (_, query_string) = href.split_once('?')?;
    let query_string = query_string.split('#').next().unwrap_or_default();
    query_string
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "q")
        .and_then(|(_, value)| {
            urlencoding::decode(&value.replace('+', " "))
                .ok()
                .map(|decoded| decoded.into_owned())
        })
}

fn trim_base(base_url: &str) -> &str {
    base_url.trim_end_matches('/')
}

/// Percent-encode the bytes that can't appear raw in one path segment.
fn encode_path_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for c in segment.chars() {
        match c {
            '/' | '?' | '#' | '%' | ' ' | '"' | '<' | '>' | '`' | '{' | '}' => {
                out.push_str(&format!("%{:02X}", c as u32));
            }
            c if c.is_ascii_control() => out.push_str(&format!("%{:02X}", c as u32)),
            c if !c.is_ascii() => {
                let mut buf = [0u8; 4];
                for byte in c.encode_utf8(&mut buf).bytes() {
                    out.push_str(&format!("%{:02X}", byte));
                }
            }
            c => out.push(c),
        }
    }
    out
}
