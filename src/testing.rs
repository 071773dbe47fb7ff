//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical implementations of test helpers to avoid duplication.

#![doc(hidden)]

use crate::types::SearchResult;

/// Create a result with a descending score, as a backend would rank it.
///
/// This is the canonical implementation used across all tests.
pub fn make_result(rank: usize) -> SearchResult {
    SearchResult {
        doc_id: rank.to_string(),
        filename: format!("doc_{:03}.txt", rank),
        score: 1.0 / (rank as f64 + 1.0),
    }
}

/// `n` ranked results with doc ids `"0"..n`.
pub fn make_results(n: usize) -> Vec<SearchResult> {
    (0..n).map(make_result).collect()
}

/// Results tagged with a batch label, so tests can tell two searches apart.
pub fn make_batch(label: &str, n: usize) -> Vec<SearchResult> {
    (0..n)
        .map(|rank| SearchResult {
            doc_id: format!("{}-{}", label, rank),
            filename: format!("{}_{:03}.txt", label, rank),
            score: 1.0 / (rank as f64 + 1.0),
        })
        .collect()
}
