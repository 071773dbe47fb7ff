// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for document links.
//!
//! A result link has to carry any filename and any query to the document view
//! and give both back unchanged.

#![no_main]

use arbitrary::Arbitrary;
use docsift::request::{document_href, query_from_href};
use docsift::DocumentView;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    filename: String,
    query: String,
}

fuzz_target!(|input: Input| {
    if input.filename.is_empty() {
        return;
    }
    let href = document_href(&input.filename, &input.query);
    assert_eq!(query_from_href(&href).as_deref(), Some(input.query.as_str()));

    let view = DocumentView::from_href(&href).expect("link points at a document");
    assert_eq!(view.filename(), input.filename);
    assert_eq!(view.query(), Some(input.query.as_str()));
});
