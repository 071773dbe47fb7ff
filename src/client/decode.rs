// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Response decoding, separated from transport.
//!
//! Each decoder takes the status code and raw body of a finished HTTP exchange
//! and produces either the payload or a classified [`ClientError`]. No I/O, so
//! the native client, the WASM front end and the tests all share one
//! interpretation of what the backend said.

use crate::error::ClientError;
use crate::types::{DocumentEnvelope, ErrorBody, ReindexBody, SearchResponse};

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Classify a non-2xx response, pulling `detail` out of the body if it's there.
pub fn backend_error(status: u16, body: &[u8]) -> ClientError {
    let detail = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail)
        .filter(|d| !d.trim().is_empty());
    ClientError::Backend { status, detail }
}

fn malformed(status: u16, reason: impl ToString) -> ClientError {
    ClientError::MalformedResponse {
        status,
        reason: reason.to_string(),
    }
}

/// Decode the body of `GET /search`.
pub fn decode_search(status: u16, body: &[u8]) -> Result<SearchResponse, ClientError> {
    if !is_success(status) {
        return Err(backend_error(status, body));
    }
    serde_json::from_slice(body).map_err(|e| malformed(status, e))
}

/// Decode the body of `GET /files/{filename}`.
///
/// A JSON response is expected to be the `{ "content": ... }` envelope;
/// anything else is the raw document text and must be valid UTF-8.
pub fn decode_document(
    status: u16,
    content_type: Option<&str>,
    body: &[u8],
) -> Result<String, ClientError> {
    if !is_success(status) {
        return Err(backend_error(status, body));
    }
    let is_json = content_type
        .and_then(|ct| ct.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"));

    if is_json {
        return serde_json::from_slice::<DocumentEnvelope>(body)
            .map(|envelope| envelope.content)
            .map_err(|e| malformed(status, e));
    }
    String::from_utf8(body.to_vec()).map_err(|e| malformed(status, e))
}

/// Decode the body of `POST /re-index`, yielding the backend's message.
pub fn decode_reindex(status: u16, body: &[u8]) -> Result<String, ClientError> {
    if !is_success(status) {
        return Err(backend_error(status, body));
    }
    serde_json::from_slice::<ReindexBody>(body)
        .map(|b| b.message)
        .map_err(|e| malformed(status, e))
}
