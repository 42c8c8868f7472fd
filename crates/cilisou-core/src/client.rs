//! HTTP client for listing pages
//!
//! A thin wrapper over reqwest that issues exactly one GET per fetch.
//! A failed attempt surfaces immediately; retrying a rate-sensitive
//! index is the caller's problem, not the transport's.

use std::time::Duration;

use crate::error::{GatewayError, Result};
use crate::url::build_listing_url;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Configuration for the listing HTTP client
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: Option<u64>,
    /// Optional upstream proxy URL applied to all listing requests
    pub proxy: Option<String>,
}

/// HTTP client for fetching listing pages from the resolved mirror
pub struct ListingClient {
    client: reqwest::Client,
}

impl ListingClient {
    /// Create a client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.unwrap_or(30)))
            .user_agent(USER_AGENT);

        if let Some(proxy) = &config.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy).map_err(GatewayError::Fetch)?);
        }

        let client = builder.build().map_err(GatewayError::Fetch)?;
        Ok(Self { client })
    }

    /// Fetch one listing page for `term` at `page` from the mirror base
    ///
    /// Single attempt, no retry. A non-success status maps to
    /// [`GatewayError::FetchStatus`] without reading the body.
    pub async fn fetch_listing(&self, base_url: &str, term: &str, page: &str) -> Result<String> {
        let url = build_listing_url(base_url, term, page);
        tracing::debug!("fetching listing {}", url);

        let response = self.client.get(&url).send().await.map_err(GatewayError::Fetch)?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::FetchStatus(status));
        }

        response.text().await.map_err(GatewayError::Fetch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_client_creation() {
        assert!(ListingClient::new().is_ok());
    }

    #[test]
    fn test_client_with_proxy() {
        let client = ListingClient::with_config(ClientConfig {
            timeout_secs: Some(10),
            proxy: Some("http://127.0.0.1:8080".to_string()),
        });
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_with_invalid_proxy() {
        let client = ListingClient::with_config(ClientConfig {
            timeout_secs: None,
            proxy: Some("not a proxy url".to_string()),
        });
        assert!(client.is_err());
    }

    #[tokio::test]
    async fn test_fetch_listing_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/ubuntu/page-1.html"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>listing</html>"))
            .expect(1)
            .mount(&server)
            .await;

        let client = ListingClient::new().unwrap();
        let base = format!("{}/", server.uri());
        let body = client.fetch_listing(&base, "ubuntu", "1").await.unwrap();
        assert_eq!(body, "<html>listing</html>");
    }

    #[tokio::test]
    async fn test_fetch_listing_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = ListingClient::new().unwrap();
        let err = client
            .fetch_listing(&server.uri(), "ubuntu", "1")
            .await
            .unwrap_err();
        match err {
            GatewayError::FetchStatus(status) => assert_eq!(status.as_u16(), 503),
            other => panic!("Expected FetchStatus, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_listing_single_attempt() {
        let server = MockServer::start().await;
        // expect(1) verifies exactly one request arrives even on failure.
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let client = ListingClient::new().unwrap();
        assert!(client.fetch_listing(&server.uri(), "q", "1").await.is_err());
    }

    #[tokio::test]
    async fn test_fetch_listing_encodes_term() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/big%20buck/page-2.html"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&server)
            .await;

        let client = ListingClient::new().unwrap();
        let body = client
            .fetch_listing(&server.uri(), "big buck", "2")
            .await
            .unwrap();
        assert_eq!(body, "ok");
    }
}
