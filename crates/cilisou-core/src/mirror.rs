//! Mirror resolution and caching
//!
//! The index site rotates its entry domain, so the live base address is
//! discovered by pointing a headless browser at a fixed seed address
//! and reading back wherever the redirects land. Resolution is
//! expensive and carries the same rate-sensitivity as scraping the site
//! itself, which is why the result is cached with a long TTL.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::error::MirrorError;

/// Default lifetime of a resolved mirror address.
pub const DEFAULT_MIRROR_TTL: Duration = Duration::from_secs(60 * 60);

/// Resolves the live base address of the index site from a seed address
///
/// The concrete mechanism (local headless browser, remote automation
/// endpoint) is an injected collaborator; tests substitute a mock.
#[async_trait]
pub trait ResolveBackend: Send + Sync {
    /// Navigate from `seed_url` and return the final address reached
    async fn resolve(&self, seed_url: &str) -> Result<String, MirrorError>;
}

/// A resolved mirror address and the time it was obtained
#[derive(Debug, Clone)]
pub struct CachedMirror {
    pub base_url: String,
    pub resolved_at: Instant,
}

/// TTL cache over a [`ResolveBackend`]
///
/// The slot is guarded by an async mutex held across the backend call,
/// so concurrent callers that both observe a stale mirror serialize:
/// the second re-checks freshness after acquiring the lock and reuses
/// the first caller's result instead of resolving again (single-flight).
pub struct MirrorCache {
    ttl: Duration,
    slot: Mutex<Option<CachedMirror>>,
}

impl MirrorCache {
    /// Create an empty cache with the given TTL
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Mutex::new(None),
        }
    }

    /// Return a fresh base address, resolving through `backend` if needed
    ///
    /// A cached address is fresh while `now - resolved_at < ttl`; at the
    /// TTL boundary or beyond it is stale and triggers resolution. On
    /// backend failure the cached value is left untouched and the error
    /// propagates; the caller must not fall back to the stale address.
    pub async fn base_url<B: ResolveBackend + ?Sized>(
        &self,
        backend: &B,
        seed_url: &str,
        now: Instant,
    ) -> Result<String, MirrorError> {
        let mut slot = self.slot.lock().await;

        if let Some(cached) = slot.as_ref()
            && now.saturating_duration_since(cached.resolved_at) < self.ttl
        {
            debug!("mirror cache hit: {}", cached.base_url);
            return Ok(cached.base_url.clone());
        }

        info!("mirror cache stale or empty, resolving via {}", seed_url);
        let base_url = backend.resolve(seed_url).await?;
        info!("mirror resolved to {}", base_url);

        *slot = Some(CachedMirror {
            base_url: base_url.clone(),
            resolved_at: now,
        });
        Ok(base_url)
    }

    /// The configured mirror lifetime
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

/// Headless-browser resolution backend
///
/// Either launches a local sandboxless Chrome or attaches to a remote
/// DevTools endpoint when one is configured.
pub struct ChromiumBackend {
    remote_url: Option<String>,
    request_timeout: Duration,
}

impl ChromiumBackend {
    /// Create a backend; `remote_url` is a DevTools websocket address
    /// of a remote automation service, `None` launches a local browser
    pub fn new(remote_url: Option<String>) -> Self {
        Self {
            remote_url,
            request_timeout: Duration::from_secs(30),
        }
    }

    async fn open_session(&self) -> Result<BrowserSession, MirrorError> {
        let (browser, mut handler) = match &self.remote_url {
            Some(remote) => {
                info!("attaching to remote browser at {}", remote);
                Browser::connect(remote.clone())
                    .await
                    .map_err(|e| MirrorError::Session(e.to_string()))?
            }
            None => {
                let config = BrowserConfig::builder()
                    .arg("--no-sandbox")
                    .arg("--disable-dev-shm-usage")
                    .request_timeout(self.request_timeout)
                    .build()
                    .map_err(MirrorError::Session)?;
                Browser::launch(config)
                    .await
                    .map_err(|e| MirrorError::Session(e.to_string()))?
            }
        };

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("browser handler event error: {e:?}");
                }
            }
        });

        Ok(BrowserSession {
            browser,
            handler: handler_task,
        })
    }
}

#[async_trait]
impl ResolveBackend for ChromiumBackend {
    async fn resolve(&self, seed_url: &str) -> Result<String, MirrorError> {
        let session = self.open_session().await?;
        // The session must come down on every exit path, so the
        // navigation outcome is captured before teardown.
        let outcome = read_final_url(&session.browser, seed_url).await;
        session.shutdown().await;
        outcome
    }
}

async fn read_final_url(browser: &Browser, seed_url: &str) -> Result<String, MirrorError> {
    let page = browser
        .new_page(seed_url)
        .await
        .map_err(|e| MirrorError::Navigation(e.to_string()))?;

    page.wait_for_navigation()
        .await
        .map_err(|e| MirrorError::Navigation(e.to_string()))?;

    page.url()
        .await
        .map_err(|e| MirrorError::Navigation(e.to_string()))?
        .ok_or(MirrorError::NoFinalAddress)
}

/// A running browser and its event-handler task
///
/// The handler task must not outlive the browser; `shutdown` closes the
/// browser process and aborts the handler, and `Drop` aborts the handler
/// as a fallback if teardown is skipped by an early return.
struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
}

impl BrowserSession {
    async fn shutdown(mut self) {
        if let Err(e) = self.browser.close().await {
            debug!("browser close failed: {e:?}");
        }
        let _ = self.browser.wait().await;
        self.handler.abort();
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        self.handler.abort();
    }
}
