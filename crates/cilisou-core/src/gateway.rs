//! High-level gateway API
//!
//! Owns all mutable pipeline state (rate records, mirror cache) and
//! runs one inbound request through admission, mirror resolution,
//! listing fetch and record extraction.

use std::time::{Duration, Instant};

use crate::client::{ClientConfig, ListingClient};
use crate::error::{GatewayError, Result};
use crate::mirror::{DEFAULT_MIRROR_TTL, MirrorCache, ResolveBackend};
use crate::parser::parse_listing;
use crate::rate_gate::{DEFAULT_COOLDOWN, RateGate};
use crate::types::TorrentRecord;

/// Configuration for a [`Gateway`] instance
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Fixed seed address the browser navigates from
    pub seed_url: String,
    /// Lifetime of a resolved mirror address (default: 1 hour)
    pub mirror_ttl: Duration,
    /// Minimum spacing between admitted requests per client (default: 10 s)
    pub cooldown: Duration,
    /// Optional upstream proxy for listing requests
    pub proxy: Option<String>,
    /// Listing request timeout in seconds
    pub timeout_secs: Option<u64>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            seed_url: String::new(),
            mirror_ttl: DEFAULT_MIRROR_TTL,
            cooldown: DEFAULT_COOLDOWN,
            proxy: None,
            timeout_secs: None,
        }
    }
}

/// The scraping gateway
///
/// Generic over the mirror-resolution backend so the heavyweight
/// browser stays out of tests.
pub struct Gateway<B> {
    backend: B,
    rate_gate: RateGate,
    mirror: MirrorCache,
    client: ListingClient,
    seed_url: String,
}

impl<B: ResolveBackend> Gateway<B> {
    /// Create a gateway around a resolution backend
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (e.g. a
    /// malformed proxy URL).
    pub fn new(backend: B, config: GatewayConfig) -> Result<Self> {
        let client = ListingClient::with_config(ClientConfig {
            timeout_secs: config.timeout_secs,
            proxy: config.proxy,
        })?;

        Ok(Self {
            backend,
            rate_gate: RateGate::new(config.cooldown),
            mirror: MirrorCache::new(config.mirror_ttl),
            client,
            seed_url: config.seed_url,
        })
    }

    /// Run one search request through the whole pipeline
    ///
    /// Admission happens first; a rejected client triggers no resolution
    /// or fetch. An admitted client consumes its cooldown slot even if a
    /// later stage fails.
    ///
    /// # Errors
    /// - [`GatewayError::RateLimited`] inside the cooldown window
    /// - [`GatewayError::Resolution`] when the mirror cannot be resolved
    /// - [`GatewayError::Fetch`] / [`GatewayError::FetchStatus`] on
    ///   listing transport failures
    pub async fn search(
        &self,
        client_id: &str,
        term: &str,
        page: &str,
    ) -> Result<Vec<TorrentRecord>> {
        let now = Instant::now();

        self.rate_gate
            .admit(client_id, now)
            .await
            .map_err(|retry_after| GatewayError::RateLimited { retry_after })?;

        let base_url = self.mirror.base_url(&self.backend, &self.seed_url, now).await?;
        let html = self.client.fetch_listing(&base_url, term, page).await?;
        parse_listing(&html)
    }

    /// The configured cooldown, for surfacing retry hints to callers
    pub fn cooldown(&self) -> Duration {
        self.rate_gate.cooldown()
    }
}
