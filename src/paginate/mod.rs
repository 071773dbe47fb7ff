// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Client-side pagination over a ranked result list.
//!
//! The backend returns the whole top-k in one response; paging happens here.
//! Pages are 1-based. Navigation clamps instead of failing, and the only way
//! to change the underlying list is [`Paginator::replace`], which also resets
//! to page 1 in the same call. There is no state in which old and new results
//! are both reachable.

use serde::Serialize;

use crate::error::ValidationError;
use crate::types::SearchResult;

/// Page size used when the user doesn't pick one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Items on page `page_number` (1-based) of `results`.
///
/// Returns the half-open slice `[(p-1)*size, p*size)` clipped to the list.
/// Out-of-range pages (0, past the end) and a zero page size give an empty
/// slice rather than an error.
pub fn paginate(results: &[SearchResult], page_number: usize, page_size: usize) -> &[SearchResult] {
    if page_number == 0 || page_size == 0 {
        return &[];
    }
    let start = (page_number - 1).saturating_mul(page_size);
    if start >= results.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(results.len());
    &results[start..end]
}

/// Number of pages needed for `len` results; never less than 1.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    len.div_ceil(page_size).max(1)
}

/// One page of results plus what a renderer needs to label it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Page<'a> {
    pub items: &'a [SearchResult],
    /// 1-based page number.
    pub number: usize,
    pub total_pages: usize,
    pub total_results: usize,
    /// 1-based rank of the first item on this page.
    pub first_rank: usize,
}

impl Page<'_> {
    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.number > 1
    }

    /// Items paired with their absolute rank.
    pub fn ranked(&self) -> impl Iterator<Item = (usize, &SearchResult)> {
        self.items
            .iter()
            .enumerate()
            .map(move |(i, item)| (self.first_rank + i, item))
    }
}

/// Owns a result list and the current page into it.
#[derive(Debug, Clone, PartialEq)]
pub struct Paginator {
    results: Vec<SearchResult>,
    page_size: usize,
    current: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self {
            results: Vec::new(),
            page_size: DEFAULT_PAGE_SIZE,
            current: 1,
        }
    }
}

impl Paginator {
    pub fn new(results: Vec<SearchResult>, page_size: usize) -> Result<Self, ValidationError> {
        if page_size == 0 {
            return Err(ValidationError::PageSizeZero);
        }
        Ok(Self {
            results,
            page_size,
            current: 1,
        })
    }

    /// Swap in a new result list and go back to page 1.
    pub fn replace(&mut self, results: Vec<SearchResult>) {
        self.results = results;
        self.current = 1;
    }

    /// Drop all results, back to page 1.
    pub fn clear(&mut self) {
        self.replace(Vec::new());
    }

    pub fn current_page(&self) -> usize {
        self.current
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.results.len(), self.page_size)
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Advance one page, stopping at the last.
    pub fn next_page(&mut self) -> usize {
        self.current = (self.current + 1).min(self.total_pages());
        self.current
    }

    /// Go back one page, stopping at the first.
    pub fn prev_page(&mut self) -> usize {
        self.current = self.current.saturating_sub(1).max(1);
        self.current
    }

    /// Jump to `page`, clamped into `[1, total_pages]`.
    pub fn go_to(&mut self, page: usize) -> usize {
        self.current = page.clamp(1, self.total_pages());
        self.current
    }

    /// The current page.
    pub fn page(&self) -> Page<'_> {
        Page {
            items: paginate(&self.results, self.current, self.page_size),
            number: self.current,
            total_pages: self.total_pages(),
            total_results: self.results.len(),
            first_rank: (self.current - 1) * self.page_size + 1,
        }
    }
}
