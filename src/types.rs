// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The data model shared by the request builder, the paginator and the client.
//!
//! Everything here is either built by the user at submit time (`SearchOptions`,
//! `SearchRequest`) or produced by the backend and treated as read-only
//! (`SearchResult`, `SearchResponse`). The client never re-sorts results: the
//! backend's order *is* the rank order.
//!
//! # Invariants
//!
//! - **SearchOptions**: `MIN_RESULT_LIMIT <= result_limit <= MAX_RESULT_LIMIT`.
//!   Checked once in the constructors, so anything holding a `SearchOptions`
//!   can trust the limit.
//!
//! - **SearchRequest**: `query` is the verbatim text the user entered. Not
//!   trimmed, never empty.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;

/// Smallest number of results a search may ask for.
pub const MIN_RESULT_LIMIT: u32 = 1;

/// Largest number of results a search may ask for.
pub const MAX_RESULT_LIMIT: u32 = 100;

/// Result count requested when the user doesn't pick one.
pub const DEFAULT_RESULT_LIMIT: u32 = 10;

// =============================================================================
// SEARCH OPTIONS
// =============================================================================

/// Retrieval toggles for one search.
///
/// The three flags select server-side query expansion; the client only
/// forwards them. Fields are private so the limit can't be set out of range
/// after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawSearchOptions")]
pub struct SearchOptions {
    spelling_correction: bool,
    synonyms: bool,
    soundex: bool,
    result_limit: u32,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            spelling_correction: false,
            synonyms: false,
            soundex: false,
            result_limit: DEFAULT_RESULT_LIMIT,
        }
    }
}

impl SearchOptions {
    /// Build options, rejecting a result limit outside `[1, 100]`.
    pub fn new(
        spelling_correction: bool,
        synonyms: bool,
        soundex: bool,
        result_limit: u32,
    ) -> Result<Self, ValidationError> {
        check_result_limit(result_limit)?;
        Ok(Self {
            spelling_correction,
            synonyms,
            soundex,
            result_limit,
        })
    }

    pub fn with_spelling_correction(mut self, enabled: bool) -> Self {
        self.spelling_correction = enabled;
        self
    }

    pub fn with_synonyms(mut self, enabled: bool) -> Self {
        self.synonyms = enabled;
        self
    }

    pub fn with_soundex(mut self, enabled: bool) -> Self {
        self.soundex = enabled;
        self
    }

    /// Replace the result limit, validating the new value.
    pub fn with_result_limit(mut self, result_limit: u32) -> Result<Self, ValidationError> {
        check_result_limit(result_limit)?;
        self.result_limit = result_limit;
        Ok(self)
    }

    pub fn spelling_correction(&self) -> bool {
        self.spelling_correction
    }

    pub fn synonyms(&self) -> bool {
        self.synonyms
    }

    pub fn soundex(&self) -> bool {
        self.soundex
    }

    pub fn result_limit(&self) -> u32 {
        self.result_limit
    }
}

fn check_result_limit(result_limit: u32) -> Result<(), ValidationError> {
    if (MIN_RESULT_LIMIT..=MAX_RESULT_LIMIT).contains(&result_limit) {
        Ok(())
    } else {
        Err(ValidationError::ResultLimitOutOfRange {
            value: result_limit,
            min: MIN_RESULT_LIMIT,
            max: MAX_RESULT_LIMIT,
        })
    }
}

/// Unchecked mirror used only so deserialization goes through `SearchOptions::new`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawSearchOptions {
    spelling_correction: bool,
    synonyms: bool,
    soundex: bool,
    result_limit: u32,
}

impl Default for RawSearchOptions {
    fn default() -> Self {
        let defaults = SearchOptions::default();
        Self {
            spelling_correction: defaults.spelling_correction,
            synonyms: defaults.synonyms,
            soundex: defaults.soundex,
            result_limit: defaults.result_limit,
        }
    }
}

impl TryFrom<RawSearchOptions> for SearchOptions {
    type Error = ValidationError;

    fn try_from(raw: RawSearchOptions) -> Result<Self, Self::Error> {
        SearchOptions::new(
            raw.spelling_correction,
            raw.synonyms,
            raw.soundex,
            raw.result_limit,
        )
    }
}

// =============================================================================
// REQUEST DESCRIPTOR
// =============================================================================

/// Canonical outbound form of a search, independent of wire encoding.
///
/// Only `request::build` constructs these, so `query` is known to be non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    pub(crate) query: String,
    pub(crate) options: SearchOptions,
}

impl SearchRequest {
    /// The query exactly as entered.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }
}

// =============================================================================
// BACKEND RESPONSES
// =============================================================================

/// One ranked hit, as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Backend document identifier. The reference backend sends integers,
    /// others send strings; both normalize to a string here.
    #[serde(deserialize_with = "string_or_number")]
    pub doc_id: String,
    /// File name to pass to the document endpoint, verbatim.
    pub filename: String,
    pub score: f64,
}

/// Success body of `GET /search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// The backend's echo of the query, when it sends one.
    #[serde(default)]
    pub query: Option<String>,
    pub results: Vec<SearchResult>,
}

/// Failure body of any endpoint: `{ "detail": "..." }`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: Option<String>,
}

/// Document body wrapped in a JSON envelope (`GET /files/{name}` on the
/// reference backend).
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DocumentEnvelope {
    pub content: String,
}

/// Success body of `POST /re-index`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ReindexBody {
    pub message: String,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Int(n) => n.to_string(),
        Id::Float(f) => f.to_string(),
    })
}
