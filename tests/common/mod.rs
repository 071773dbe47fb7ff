//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

// Re-export canonical test utilities from docsift::testing
pub use docsift::testing::{make_batch, make_result, make_results};

// ============================================================================
// CANNED BACKEND
// ============================================================================

/// One canned HTTP response.
#[derive(Debug, Clone)]
pub struct Canned {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl Canned {
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: body.to_string(),
        }
    }

    pub fn text(body: &str) -> Self {
        Self {
            status: 200,
            content_type: "text/plain; charset=utf-8",
            body: body.to_string(),
        }
    }

    pub fn html(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "text/html",
            body: body.to_string(),
        }
    }
}

/// A tiny HTTP/1.1 server on localhost answering from a fixed route table.
///
/// Routes are keyed by `"METHOD /path"` (query string ignored, path as it
/// arrives on the wire). Unknown routes get a FastAPI-style 404. Every
/// request target is recorded so tests can assert on what was sent.
pub struct MockBackend {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockBackend {
    pub async fn start(routes: Vec<(&'static str, Canned)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("mock backend address");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);

        tokio::spawn(async move {
            loop {
                let Ok((mut stream, _)) = listener.accept().await else {
                    break;
                };
                let routes = routes.clone();
                let recorded = Arc::clone(&recorded);
                tokio::spawn(async move {
                    let head = read_head(&mut stream).await;
                    let mut parts = head.split_whitespace();
                    let method = parts.next().unwrap_or_default().to_string();
                    let target = parts.next().unwrap_or_default().to_string();
                    recorded
                        .lock()
                        .unwrap()
                        .push(format!("{} {}", method, target));

                    let path = target.split('?').next().unwrap_or_default();
                    let key = format!("{} {}", method, path);
                    let response = routes
                        .iter()
                        .find(|(route, _)| *route == key)
                        .map(|(_, canned)| canned.clone())
                        .unwrap_or_else(|| {
                            Canned::json(404, serde_json::json!({ "detail": "Not Found" }))
                        });

                    let _ = stream.write_all(&encode(&response)).await;
                    let _ = stream.shutdown().await;
                });
            }
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    /// Request lines seen so far, as `"METHOD target"`.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

async fn read_head(stream: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                buf.extend_from_slice(&chunk[..n]);
                if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn encode(response: &Canned) -> Vec<u8> {
    let reason = match response.status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Unknown",
    };
    format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        response.status,
        reason,
        response.content_type,
        response.body.len(),
        response.body
    )
    .into_bytes()
}

/// Client pointed at `base_url`, ignoring any proxy set in the environment.
#[cfg(feature = "client")]
pub fn client_for(base_url: &str) -> docsift::SearchClient {
    let http = reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("build http client");
    docsift::SearchClient::with_http(http, base_url)
}

/// An address nothing is listening on.
pub async fn dead_backend_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind throwaway listener");
    let addr = listener.local_addr().expect("throwaway address");
    drop(listener);
    format!("http://{}", addr)
}

// ============================================================================
// RESPONSE BODIES
// ============================================================================

/// A `/search` success body for `n` ranked results, integer doc ids as the
/// reference backend sends them.
pub fn search_body(query: &str, n: usize) -> serde_json::Value {
    let results: Vec<serde_json::Value> = make_results(n)
        .into_iter()
        .enumerate()
        .map(|(i, r)| {
            serde_json::json!({
                "doc_id": i,
                "filename": r.filename,
                "score": r.score,
            })
        })
        .collect();
    serde_json::json!({ "query": query, "results": results })
}
