// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the highlighter.
//!
//! Documents are whatever the backend stored and queries are whatever the user
//! typed. Regex metacharacters, combining marks, lone `<`, a query that is
//! nothing but backslashes: the highlighter has to take all of it.

#![no_main]

use arbitrary::Arbitrary;
use docsift::highlight::{
    highlight, highlight_html, highlight_spans, render_marked, utf16_spans,
};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    text: String,
    query: Option<String>,
}

fuzz_target!(|input: Input| {
    // Cap sizes to keep iterations fast
    if input.text.len() > 4096 || input.query.as_ref().is_some_and(|q| q.len() > 256) {
        return;
    }
    let text = input.text.as_str();
    let query = input.query.as_deref();

    let spans = highlight_spans(text, query);

    // INVARIANT 1: spans tile the text, in order, on char boundaries
    let mut pos = 0;
    for span in &spans {
        assert_eq!(span.start, pos, "gap or overlap at {}", pos);
        assert!(span.end > span.start, "empty span at {}", pos);
        assert!(text.is_char_boundary(span.end));
        pos = span.end;
    }
    assert_eq!(pos, text.len());

    // INVARIANT 2: removing the markers gives back the text
    assert_eq!(render_marked(text, &spans, "", ""), text);

    // INVARIANT 3: blank query is the identity
    if query.map_or(true, |q| q.trim().is_empty()) {
        assert_eq!(highlight(text, query), text);
        assert!(spans.iter().all(|s| !s.matched));
    }

    // INVARIANT 4: HTML output has no tags of its own besides <mark>
    if !query.is_some_and(|q| q.contains("mark>")) {
        let bare = highlight_html(text, query)
            .replace("<mark>", "")
            .replace("</mark>", "");
        assert!(!bare.contains('<') && !bare.contains('>'));
    }

    // INVARIANT 5: UTF-16 spans tile the UTF-16 length
    let wide = utf16_spans(text, &spans);
    let units = text.encode_utf16().count();
    assert_eq!(wide.last().map_or(0, |s| s.end), units);
});
