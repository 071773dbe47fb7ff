// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query-term highlighting over raw document text.
//!
//! The backend tells us *which* documents matched, not *where*. The document
//! view gets the original query through its link and recomputes the matches
//! locally, so this module has to agree with what a user expects to see
//! marked: the phrase they typed if it's there, otherwise the meaningful words
//! of it.
//!
//! # Algorithm
//!
//! 1. Blank query (none, empty, whitespace): nothing is marked.
//! 2. **Phrase pass**: the trimmed query, regex-escaped, as one literal phrase.
//!    Any match wins outright and the term pass never runs.
//! 3. **Term pass**: whitespace-split words longer than two characters, each
//!    escaped, tried as one alternation in query order.
//!
//! Matching is case-insensitive and word-bounded: a match may not touch a word
//! character (alphanumeric or `_`) on either side, so `cat` never lights up
//! inside `category`. The boundary looks at the *neighbours* of the match,
//! not its first and last characters, which is what lets `$5.00` match
//! literally in `price is $5.00`.
//!
//! # Output
//!
//! [`highlight_spans`] returns a gap-free cover of the text as byte ranges;
//! markers are a rendering concern ([`render_html`], [`render_marked`], the
//! CLI's ANSI renderer). [`highlight_html`] does both and escapes every
//! segment for HTML, matched or not, whatever the query. [`highlight`] is the
//! same except that it hands `text` back untouched when the query has nothing
//! searchable in it (blank, or a missed phrase with no term long enough to
//! keep); callers inserting the result as markup want [`highlight_html`].
//!
//! **Invariant**: spans are non-empty, ordered, contiguous, start at 0, end at
//! `text.len()`, and every boundary is a `char` boundary.
//!
//! **Verified by**:
//! - `prop_spans_cover_text` (tests/property/highlight_props.rs)
//! - `fuzz_targets/highlight_spans.rs`

use std::ops::Range;

use regex::{Regex, RegexBuilder};
use serde::Serialize;

/// Shortest term the term pass keeps; two characters or fewer are dropped.
pub const MIN_TERM_CHARS: usize = 3;

/// One contiguous piece of the document text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HighlightSpan {
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
    pub matched: bool,
}

impl HighlightSpan {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn text<'t>(&self, text: &'t str) -> &'t str {
        &text[self.start..self.end]
    }
}

/// Which pass produced the matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// The whole query matched as one phrase.
    Phrase,
    /// Individual terms matched after the phrase pass found nothing.
    Terms,
    /// Nothing matched (or nothing was searched for).
    None,
}

// ============================================================================
// MATCHING
// ============================================================================

/// A set of literal alternatives, tried in order at each position.
#[derive(Debug)]
struct Alternatives {
    /// Finds the next position where *any* alternative matches, boundaries
    /// ignored. Nothing bounded can start earlier than that.
    finder: Regex,
    /// One anchored matcher per alternative, in query order.
    anchored: Vec<Regex>,
}

impl Alternatives {
    /// Compile escaped alternatives. `None` if there are none or the pattern
    /// is too large to compile, in which case nothing is matched.
    fn new(escaped: &[String]) -> Option<Self> {
        if escaped.is_empty() {
            return None;
        }
        let union = escaped
            .iter()
            .map(|p| format!("(?:{})", p))
            .collect::<Vec<_>>()
            .join("|");
        let finder = compile(&union)?;
        let anchored = escaped
            .iter()
            .map(|p| compile(&format!(r"\A(?:{})", p)))
            .collect::<Option<Vec<_>>>()?;
        Some(Self { finder, anchored })
    }

    /// Every non-overlapping, word-bounded match, leftmost first.
    fn find_all(&self, text: &str) -> Vec<Range<usize>> {
        let mut found = Vec::new();
        let mut pos = 0;

        while pos < text.len() {
            let Some(candidate) = self.finder.find_at(text, pos) else {
                break;
            };
            let start = candidate.start();
            let rest = &text[start..];

            let hit = self.anchored.iter().find_map(|re| {
                let end = start + re.find(rest)?.end();
                (end > start && is_word_bounded(text, start, end)).then_some(end)
            });

            match hit {
                Some(end) => {
                    found.push(start..end);
                    pos = end;
                }
                // Rejected here; a bounded match may still start inside it.
                None => pos = start + rest.chars().next().map_or(1, char::len_utf8),
            }
        }

        found
    }
}

fn compile(pattern: &str) -> Option<Regex> {
    match RegexBuilder::new(pattern).case_insensitive(true).build() {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::debug!(error = %e, "highlight pattern rejected, matching nothing");
            None
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_word_bounded(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

// ============================================================================
// HIGHLIGHTER
// ============================================================================

/// A query compiled once for highlighting any number of texts.
#[derive(Debug)]
pub struct Highlighter {
    phrase: Option<Alternatives>,
    terms: Option<Alternatives>,
}

impl Highlighter {
    /// Compile `query`. A blank query yields a highlighter that marks nothing.
    pub fn new(query: Option<&str>) -> Self {
        let query = query.unwrap_or_default();
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Self {
                phrase: None,
                terms: None,
            };
        }

        let phrase = Alternatives::new(&[regex::escape(trimmed)]);
        let terms: Vec<String> = query
            .split_whitespace()
            .filter(|term| term.chars().count() >= MIN_TERM_CHARS)
            .map(regex::escape)
            .collect();

        Self {
            phrase,
            terms: Alternatives::new(&terms),
        }
    }

    /// True when this highlighter can never mark anything.
    pub fn is_blank(&self) -> bool {
        self.phrase.is_none() && self.terms.is_none()
    }

    /// True when the term pass has at least one term to look for.
    pub fn has_terms(&self) -> bool {
        self.terms.is_some()
    }

    /// Matched byte ranges and the pass that produced them.
    pub fn find(&self, text: &str) -> (Vec<Range<usize>>, MatchMode) {
        if let Some(phrase) = &self.phrase {
            let found = phrase.find_all(text);
            if !found.is_empty() {
                return (found, MatchMode::Phrase);
            }
        }
        if let Some(terms) = &self.terms {
            let found = terms.find_all(text);
            if !found.is_empty() {
                return (found, MatchMode::Terms);
            }
        }
        (Vec::new(), MatchMode::None)
    }

    /// Gap-free cover of `text`, alternating unmatched and matched spans.
    pub fn spans(&self, text: &str) -> Vec<HighlightSpan> {
        self.spans_with_mode(text).0
    }

    /// [`Highlighter::spans`] plus the pass that produced the matches.
    pub fn spans_with_mode(&self, text: &str) -> (Vec<HighlightSpan>, MatchMode) {
        let (found, mode) = self.find(text);
        (cover(text, &found), mode)
    }
}

fn cover(text: &str, found: &[Range<usize>]) -> Vec<HighlightSpan> {
    let mut spans = Vec::with_capacity(found.len() * 2 + 1);
    let mut pos = 0;
    for range in found {
        if range.start > pos {
            spans.push(HighlightSpan {
                start: pos,
                end: range.start,
                matched: false,
            });
        }
        spans.push(HighlightSpan {
            start: range.start,
            end: range.end,
            matched: true,
        });
        pos = range.end;
    }
    if pos < text.len() {
        spans.push(HighlightSpan {
            start: pos,
            end: text.len(),
            matched: false,
        });
    }
    spans
}

/// Compute highlight spans for `text` against `query`.
///
/// Total: never panics, never fails. Empty text yields no spans.
pub fn highlight_spans(text: &str, query: Option<&str>) -> Vec<HighlightSpan> {
    Highlighter::new(query).spans(text)
}

// ============================================================================
// RENDERING
// ============================================================================

/// Wrap matched spans in `open`/`close`; unmatched text is copied as is.
pub fn render_marked(text: &str, spans: &[HighlightSpan], open: &str, close: &str) -> String {
    let mut out = String::with_capacity(text.len() + spans.len() * (open.len() + close.len()));
    for span in spans {
        if span.matched {
            out.push_str(open);
            out.push_str(span.text(text));
            out.push_str(close);
        } else {
            out.push_str(span.text(text));
        }
    }
    out
}

/// Render spans as HTML: every segment escaped, matches inside `<mark>`.
pub fn render_html(text: &str, spans: &[HighlightSpan]) -> String {
    let mut out = String::with_capacity(text.len() + spans.len() * 13);
    for span in spans {
        if span.matched {
            out.push_str("<mark>");
            escape_html_into(span.text(text), &mut out);
            out.push_str("</mark>");
        } else {
            escape_html_into(span.text(text), &mut out);
        }
    }
    out
}

fn escape_html_into(segment: &str, out: &mut String) {
    for c in segment.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
}

/// Highlight `text` against `query`, matches inside `<mark>`.
///
/// Returns `text` untouched when nothing in the query is searchable: a blank
/// query, or a phrase that misses with every term too short to keep.
/// Otherwise the result is escaped HTML.
pub fn highlight(text: &str, query: Option<&str>) -> String {
    let highlighter = Highlighter::new(query);
    let (spans, mode) = highlighter.spans_with_mode(text);
    if mode == MatchMode::None && !highlighter.has_terms() {
        return text.to_string();
    }
    render_html(text, &spans)
}

/// Highlight `text` as escaped HTML for any query, blank included.
///
/// Safe to insert as markup even when the document itself contains tags.
pub fn highlight_html(text: &str, query: Option<&str>) -> String {
    render_html(text, &highlight_spans(text, query))
}

/// Distinct matched substrings, lower-cased, in order of first appearance.
pub fn matched_terms(text: &str, spans: &[HighlightSpan]) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for span in spans.iter().filter(|s| s.matched) {
        let term = span.text(text).to_lowercase();
        if !terms.contains(&term) {
            terms.push(term);
        }
    }
    terms
}

/// Re-express byte-offset spans in UTF-16 code units, for JavaScript callers
/// whose strings index that way.
pub fn utf16_spans(text: &str, spans: &[HighlightSpan]) -> Vec<HighlightSpan> {
    let mut out = Vec::with_capacity(spans.len());
    let mut units = 0;
    for span in spans {
        let start = units;
        units += span.text(text).encode_utf16().count();
        out.push(HighlightSpan {
            start,
            end: units,
            matched: span.matched,
        });
    }
    out
}
