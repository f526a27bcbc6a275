//! HTTP transport for oEmbed lookups.
//!
//! [`Transport`] is the seam the metadata fetcher talks through. The default
//! [`HttpTransport`] is a pooled `reqwest` client with compression and fixed
//! timeouts; tests substitute an in-memory fake.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, instrument};

use crate::config::HttpConfig;

/// Status and body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues GET requests on behalf of the metadata fetcher.
///
/// An `Err` means the endpoint could not be reached at all. Error statuses
/// come back as a normal [`FetchResponse`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<FetchResponse>;
}

/// `reqwest`-backed transport.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport from explicit settings.
    pub fn with_config(config: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            // ═══════════════════════════════════════════════════════════════
            // CONNECTIONS
            // ═══════════════════════════════════════════════════════════════
            // Let the provider negotiate HTTP/2, keep connections for reuse
            .http2_adaptive_window(true)
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .tcp_nodelay(true)
            .use_rustls_tls()
            // ═══════════════════════════════════════════════════════════════
            // COMPRESSION (auto-negotiated via Accept-Encoding)
            // ═══════════════════════════════════════════════════════════════
            .brotli(true)
            .gzip(true)
            .deflate(true)
            // ═══════════════════════════════════════════════════════════════
            // TIMEOUTS
            // ═══════════════════════════════════════════════════════════════
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.timeout_secs))
            // ═══════════════════════════════════════════════════════════════
            // REDIRECTS
            // ═══════════════════════════════════════════════════════════════
            // oEmbed endpoints redirect http -> https
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, query), fields(endpoint = %endpoint))]
    async fn fetch(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<FetchResponse> {
        debug!("Requesting oEmbed document");
        let response = self.client.get(endpoint).query(query).send().await?;
        let status = response.status();

        info!(
            status = %status,
            version = ?response.version(),
            "Response received"
        );

        let body = response.text().await?;
        Ok(FetchResponse {
            status: status.as_u16(),
            body,
        })
    }
}
