// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Where the backend lives and how results are paged.
//!
//! Resolution order for each setting: command-line flag, environment variable
//! (a `.env` file in the working directory counts), built-in default. The CLI
//! wires the first two through clap's `env` support; this module owns the
//! defaults and the cleanup of whatever came in.

use std::path::PathBuf;

use crate::paginate::DEFAULT_PAGE_SIZE;

/// Backend used when nothing else is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

/// Environment variable naming the backend base URL.
pub const BACKEND_URL_ENV: &str = "DOCSIFT_BACKEND_URL";

/// Environment variable naming the page size.
pub const PAGE_SIZE_ENV: &str = "DOCSIFT_PAGE_SIZE";

/// Resolved client settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL without a trailing slash.
    pub base_url: String,
    pub page_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ClientConfig {
    /// Build from optional overrides, falling back to defaults.
    ///
    /// A blank URL counts as unset. A page size of 0 falls back to the default.
    pub fn resolve(base_url: Option<&str>, page_size: Option<usize>) -> Self {
        let base_url = base_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_BACKEND_URL)
            .trim_end_matches('/')
            .to_string();

        let page_size = match page_size {
            Some(0) => {
                tracing::warn!("page size 0 ignored, using {}", DEFAULT_PAGE_SIZE);
                DEFAULT_PAGE_SIZE
            }
            Some(n) => n,
            None => DEFAULT_PAGE_SIZE,
        };

        Self {
            base_url,
            page_size,
        }
    }
}

/// Load `.env` from the working directory (or a parent) into the environment.
///
/// Returns the file that was loaded. A missing file is normal and not an error.
pub fn load_dotenv() -> Option<PathBuf> {
    match dotenvy::dotenv() {
        Ok(path) => Some(path),
        Err(e) if e.not_found() => None,
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unreadable .env");
            None
        }
    }
}
