//! `HttpTransport` backed by `reqwest`.
//!
//! One `reqwest::Client` (and its connection pool) is shared by every call.
//! The per-request timeout comes from the request itself, so a single
//! transport can serve clients configured with different timeouts.

use async_trait::async_trait;
use reqwest::Client;

use crate::domain::TransportError;
use crate::ports::{HttpMethod, HttpTransport, OutboundRequest, RawResponse};

/// Production transport.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport with a default `reqwest` client.
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder()
            .build()
            .map_err(|e| TransportError::new(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    /// Wraps an existing client (custom TLS, proxies, pools).
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    fn method(method: HttpMethod) -> reqwest::Method {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: OutboundRequest) -> Result<RawResponse, TransportError> {
        let mut builder = self
            .client
            .request(Self::method(request.method), request.url.as_str())
            .timeout(request.timeout);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::warn!(
                method = %request.method,
                url = %request.url,
                timed_out = e.is_timeout(),
                error = %e,
                "Layer request failed in transport"
            );
            TransportError::new(e.to_string())
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::new(format!("failed to read response body: {}", e)))?
            .to_vec();

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn get(url: String, timeout: Duration) -> OutboundRequest {
        OutboundRequest {
            method: HttpMethod::Get,
            url,
            headers: vec![
                ("Authorization".to_string(), "Bearer t0k3n".to_string()),
                ("If-None-Match".to_string(), "\"etag-1\"".to_string()),
            ],
            body: None,
            timeout,
        }
    }

    #[tokio::test]
    async fn sends_headers_and_reads_response() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let n = socket.read(&mut buf).await.unwrap();
            let raw = String::from_utf8_lossy(&buf[..n]).to_string();
            socket
                .write_all(
                    b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nETag: \"etag-2\"\r\nContent-Length: 2\r\nConnection: close\r\n\r\n[]",
                )
                .await
                .unwrap();
            raw
        });

        let transport = ReqwestTransport::new().unwrap();
        let response = transport
            .send(get(
                format!("http://{}/apps/app/users/u1/blocks", addr),
                Duration::from_secs(5),
            ))
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, b"[]");
        assert_eq!(response.header("etag"), Some("\"etag-2\""));

        let raw = server.await.unwrap().to_ascii_lowercase();
        assert!(raw.starts_with("get /apps/app/users/u1/blocks http/1.1"));
        assert!(raw.contains("authorization: bearer t0k3n"));
        assert!(raw.contains("if-none-match: \"etag-1\""));
    }

    #[tokio::test]
    async fn timeout_surfaces_as_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // Accept and hold the connection without answering.
        let _server = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
            drop(socket);
        });

        let transport = ReqwestTransport::new().unwrap();
        let result = transport
            .send(get(format!("http://{}/apps/app/x", addr), Duration::from_millis(100)))
            .await;

        assert!(result.is_err());
    }
}
