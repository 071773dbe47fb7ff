// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Talking to the search backend.
//!
//! Two halves: [`decode`] interprets finished responses and compiles
//! everywhere (WASM included); [`SearchClient`] is the native transport on
//! reqwest and only exists with the `client` feature.
//!
//! The transport is deliberately plain. One attempt per call, no retries, no
//! client-side timeout: a hung backend leaves the caller waiting until the
//! connection settles, exactly like the browser UI it stands in for.

pub mod decode;

pub use decode::{backend_error, decode_document, decode_reindex, decode_search};

#[cfg(feature = "client")]
pub use transport::SearchClient;

#[cfg(feature = "client")]
mod transport {
    use reqwest::header::CONTENT_TYPE;

    use super::decode::{decode_document, decode_reindex, decode_search};
    use crate::config::ClientConfig;
    use crate::error::ClientError;
    use crate::request;
    use crate::types::{SearchRequest, SearchResponse};

    const USER_AGENT: &str = concat!("docsift/", env!("CARGO_PKG_VERSION"));

    impl From<reqwest::Error> for ClientError {
        fn from(e: reqwest::Error) -> Self {
            ClientError::Network(Box::new(e))
        }
    }

    /// HTTP client for one backend. Cheap to clone; clones share a pool.
    #[derive(Debug, Clone)]
    pub struct SearchClient {
        http: reqwest::Client,
        base_url: String,
    }

    impl SearchClient {
        pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
            let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
            Ok(Self::with_http(http, &config.base_url))
        }

        /// Use an existing reqwest client (shared pool, custom TLS, ...).
        pub fn with_http(http: reqwest::Client, base_url: &str) -> Self {
            Self {
                http,
                base_url: base_url.trim_end_matches('/').to_string(),
            }
        }

        pub fn base_url(&self) -> &str {
            &self.base_url
        }

        /// `GET /search` for `request`.
        pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ClientError> {
            let url = request.url(&self.base_url);
            tracing::debug!(%url, "search request");

            let response = self.http.get(&url).send().await?;
            let status = response.status().as_u16();
            let body = response.bytes().await?;

            let decoded = decode_search(status, &body);
            match &decoded {
                Ok(r) => tracing::info!(status, results = r.results.len(), "search complete"),
                Err(e) => tracing::warn!(status, error = %e, "search failed"),
            }
            decoded
        }

        /// `GET /files/{filename}`: the raw document text.
        pub async fn fetch_document(&self, filename: &str) -> Result<String, ClientError> {
            let url = request::document_url(&self.base_url, filename);
            tracing::debug!(%url, "document request");

            let response = self.http.get(&url).send().await?;
            let status = response.status().as_u16();
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);
            let body = response.bytes().await?;

            let decoded = decode_document(status, content_type.as_deref(), &body);
            match &decoded {
                Ok(text) => tracing::info!(status, bytes = text.len(), %filename, "document loaded"),
                Err(e) => tracing::warn!(status, error = %e, %filename, "document fetch failed"),
            }
            decoded
        }

        /// `POST /re-index`: ask the backend to rebuild and reload its indexes.
        ///
        /// The backend answers only once the rebuild is finished, which can
        /// take a while on a large corpus.
        pub async fn reindex(&self) -> Result<String, ClientError> {
            let url = request::reindex_url(&self.base_url);
            tracing::debug!(%url, "re-index request");

            let response = self.http.post(&url).send().await?;
            let status = response.status().as_u16();
            let body = response.bytes().await?;

            let decoded = decode_reindex(status, &body);
            if let Err(e) = &decoded {
                tracing::warn!(status, error = %e, "re-index failed");
            }
            decoded
        }
    }
}
