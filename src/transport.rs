//! Shared, authenticated HTTP transport used by every product client.
//!
//! Grounded in `anthropic_client::Client`'s config-driven `reqwest::Client`
//! wrapper: one client built once, shared via `Arc`, every call attaching
//! the same `Accept`/`Content-Type`/`Authorization` headers and interpreting
//! the status code the same way.

use crate::config::ConnectionConfig;
use crate::error::{GatewayError, TransportError};
use reqwest::Method;
use std::time::Duration;

const MAX_ERROR_BODY_CHARS: usize = 500;

/// Thin wrapper around a shared `reqwest::Client`. Holds no per-product
/// state — base URL, auth, and timeout all come from the `ConnectionConfig`
/// passed to each call.
#[derive(Debug, Clone)]
pub struct Transport {
    client: reqwest::Client,
}

impl Transport {
    /// Builds a transport whose connect/read timeout is bounded by
    /// `timeout_seconds`.
    ///
    /// # Errors
    /// Returns a [`TransportError::Io`] if the underlying client fails to
    /// build (e.g. TLS backend initialization failure).
    pub fn new(timeout_seconds: u64) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| TransportError::Io("client".to_string(), e.to_string()))?;
        Ok(Self { client })
    }

    /// Sends an authenticated GET, returning the raw response body.
    ///
    /// # Errors
    /// Returns [`GatewayError::Transport`] on network failure, timeout, or
    /// a non-2xx status.
    pub async fn get(&self, config: &ConnectionConfig, url: &str) -> Result<String, GatewayError> {
        self.send(config, Method::GET, url, None).await
    }

    /// Sends an authenticated POST with a JSON body.
    ///
    /// # Errors
    /// Returns [`GatewayError::Transport`] on network failure, timeout, or
    /// a non-2xx status.
    pub async fn post(
        &self,
        config: &ConnectionConfig,
        url: &str,
        body: String,
    ) -> Result<String, GatewayError> {
        self.send(config, Method::POST, url, Some(body)).await
    }

    /// Sends an authenticated PUT with a JSON body.
    ///
    /// # Errors
    /// Returns [`GatewayError::Transport`] on network failure, timeout, or
    /// a non-2xx status.
    pub async fn put(
        &self,
        config: &ConnectionConfig,
        url: &str,
        body: String,
    ) -> Result<String, GatewayError> {
        self.send(config, Method::PUT, url, Some(body)).await
    }

    /// Sends an authenticated DELETE.
    ///
    /// # Errors
    /// Returns [`GatewayError::Transport`] on network failure, timeout, or
    /// a non-2xx status.
    pub async fn delete(&self, config: &ConnectionConfig, url: &str) -> Result<String, GatewayError> {
        self.send(config, Method::DELETE, url, None).await
    }

    async fn send(
        &self,
        config: &ConnectionConfig,
        method: Method,
        url: &str,
        body: Option<String>,
    ) -> Result<String, GatewayError> {
        let mut request = self
            .client
            .request(method.clone(), url)
            .header("Accept", "application/json")
            .header("Authorization", config.credentials().authorization_header());

        if let Some(body) = body {
            request = request.header("Content-Type", "application/json").body(body);
        }

        tracing::debug!(%method, %url, "sending request");

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout(url.to_string())
            } else {
                TransportError::Io(url.to_string(), e.to_string())
            }
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::Io(url.to_string(), e.to_string()))?;

        if status.is_success() {
            Ok(text)
        } else {
            let truncated_body = truncate(&text, MAX_ERROR_BODY_CHARS);
            tracing::warn!(
                status = status.as_u16(),
                %url,
                body = %truncated_body,
                "non-2xx response"
            );
            Err(TransportError::Remote {
                status: status.as_u16(),
                method: method.to_string(),
                url: url.to_string(),
                truncated_body,
            }
            .into())
        }
    }
}

fn truncate(body: &str, max_chars: usize) -> String {
    if body.chars().count() <= max_chars {
        return body.to_string();
    }
    let mut truncated: String = body.chars().take(max_chars.saturating_sub(3)).collect();
    truncated.push_str("...");
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Credentials;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(base_url: &str) -> ConnectionConfig {
        ConnectionConfig::new(
            base_url,
            Credentials::api_token("a@b.c", "xyz").unwrap(),
            5,
        )
        .unwrap()
    }

    #[test]
    fn truncate_adds_ellipsis_within_limit() {
        let body = "x".repeat(600);
        let t = truncate(&body, 500);
        assert_eq!(t.len(), 500);
        assert!(t.ends_with("..."));
    }

    #[test]
    fn truncate_leaves_short_body_untouched() {
        assert_eq!(truncate("short", 500), "short");
    }

    #[tokio::test]
    async fn get_attaches_auth_and_accept_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ok"))
            .and(header("Accept", "application/json"))
            .and(header("Authorization", "Basic YUBiLmM6eHl6"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"ok\":true}"))
            .mount(&server)
            .await;

        let transport = Transport::new(5).unwrap();
        let cfg = config(&server.uri());
        let body = transport.get(&cfg, &format!("{}/ok", server.uri())).await.unwrap();
        assert_eq!(body, "{\"ok\":true}");
    }

    #[tokio::test]
    async fn non_2xx_status_becomes_remote_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/broken"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let transport = Transport::new(5).unwrap();
        let cfg = config(&server.uri());
        let err = transport
            .get(&cfg, &format!("{}/broken", server.uri()))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "REMOTE_ERROR");
    }

    #[tokio::test]
    async fn post_sends_content_type_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/create"))
            .and(header("Content-Type", "application/json"))
            .respond_with(ResponseTemplate::new(201).set_body_string("{\"id\":1}"))
            .mount(&server)
            .await;

        let transport = Transport::new(5).unwrap();
        let cfg = config(&server.uri());
        let body = transport
            .post(&cfg, &format!("{}/create", server.uri()), "{}".to_string())
            .await
            .unwrap();
        assert_eq!(body, "{\"id\":1}");
    }
}
