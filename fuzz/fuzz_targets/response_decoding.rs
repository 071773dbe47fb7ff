// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for response decoding.
//!
//! Whatever comes back over the wire (truncated JSON, an HTML error page from
//! a proxy, binary garbage) must decode to a payload or a classified error,
//! and every error must still have a message to show.

#![no_main]

use arbitrary::Arbitrary;
use docsift::{decode_document, decode_reindex, decode_search};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    status: u16,
    json_content_type: bool,
    body: Vec<u8>,
}

fuzz_target!(|input: Input| {
    let content_type = input.json_content_type.then_some("application/json");

    if let Err(e) = decode_search(input.status, &input.body) {
        assert!(!e.user_message().is_empty());
    }
    if let Err(e) = decode_document(input.status, content_type, &input.body) {
        assert!(!e.user_message().is_empty());
    }
    if let Err(e) = decode_reindex(input.status, &input.body) {
        assert!(!e.user_message().is_empty());
    }
});
