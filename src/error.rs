// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error taxonomy for the search client.
//!
//! Every error is terminal for the operation that raised it and none of them
//! end the session: the user reads the message and resubmits. Nothing here is
//! retried automatically.

use thiserror::Error;

/// Message shown when the backend gives us nothing better.
pub const GENERIC_FAILURE: &str = "Something went wrong";

/// Input that never should have left the input layer.
///
/// The CLI constrains its arguments so these don't fire in practice; they
/// exist for callers driving the library directly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("query cannot be empty")]
    EmptyQuery,

    #[error("result limit {value} outside [{min}, {max}]")]
    ResultLimitOutOfRange { value: u32, min: u32, max: u32 },

    #[error("page size must be at least 1")]
    PageSizeZero,
}

/// Errors from talking to the search backend.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never completed (connection refused, DNS, reset, ...).
    #[error("network failure: {0}")]
    Network(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Non-2xx response. `detail` is the backend's own message, if it sent one.
    #[error("backend returned {status}: {}", .detail.as_deref().unwrap_or(GENERIC_FAILURE))]
    Backend { status: u16, detail: Option<String> },

    /// 2xx response whose body isn't the shape we expect.
    #[error("malformed response (HTTP {status}): {reason}")]
    MalformedResponse { status: u16, reason: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ClientError {
    /// The single line displayed to the user for this failure.
    ///
    /// Backend details are shown verbatim; everything else collapses to the
    /// generic message.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Backend {
                detail: Some(detail),
                ..
            } => detail.clone(),
            ClientError::Validation(e) => e.to_string(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}
