//! reqwest-backed [`Fetch`] implementation.

use super::traits::{Fetch, FetchResponse};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client used for `api` tools.
#[derive(Debug, Clone)]
pub struct HttpInvoker {
    http: reqwest::Client,
    timeout: Duration,
}

impl HttpInvoker {
    /// Create a client whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { http, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl Fetch for HttpInvoker {
    async fn get(&self, url: &str) -> Result<FetchResponse> {
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        debug!("GET {} -> {} ({} bytes)", url, status, body.len());
        Ok(FetchResponse {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    async fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let _ = stream.read(&mut buf).await.unwrap();
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.flush().await.unwrap();
        });
        format!("http://127.0.0.1:{port}/")
    }

    #[tokio::test]
    async fn non_success_status_is_still_a_response() {
        let url = serve_once(
            "HTTP/1.1 404 Not Found\r\nContent-Length: 9\r\nConnection: close\r\n\r\nnot found",
        )
        .await;

        let invoker = HttpInvoker::new(DEFAULT_TIMEOUT).unwrap();
        let resp = invoker.get(&url).await.unwrap();

        assert_eq!(resp.status, 404);
        assert!(!resp.is_success());
        assert_eq!(resp.body, "not found");
    }

    #[tokio::test]
    async fn timeout_is_a_transport_fault() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        // Accept and never answer.
        let _server = tokio::spawn(async move {
            let (_stream, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let invoker = HttpInvoker::new(Duration::from_millis(200)).unwrap();
        let result = invoker.get(&format!("http://127.0.0.1:{port}/")).await;
        assert!(result.is_err());
    }
}
