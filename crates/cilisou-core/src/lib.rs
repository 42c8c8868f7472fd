//! Cilisou Gateway Core Library
//!
//! Scraping core for a magnet-index gateway. The target site rotates
//! its entry domain, so the gateway:
//! - resolves the live mirror address with a headless browser and
//!   caches it for an hour
//! - throttles repeat callers per client identity (10 s cooldown)
//! - fetches search-result listing pages from the resolved mirror
//! - extracts structured torrent records (title, magnet link, size,
//!   popularity, file manifest) with per-field "unknown" fallbacks
//! - renders the results as JSON, Markdown or plain text
//!
//! # Example
//!
//! ```no_run
//! use cilisou_core::{ChromiumBackend, Gateway, GatewayConfig, OutputFormat, format};
//!
//! #[tokio::main]
//! async fn main() -> cilisou_core::Result<()> {
//!     let backend = ChromiumBackend::new(None);
//!     let gateway = Gateway::new(backend, GatewayConfig {
//!         seed_url: "https://ver.emoncili.com/".to_string(),
//!         ..Default::default()
//!     })?;
//!
//!     let records = gateway.search("127.0.0.1", "ubuntu", "1").await?;
//!     println!("{}", format::render("1", &records, OutputFormat::Markdown));
//!     Ok(())
//! }
//! ```
//!
//! The transport shell (HTTP routing, parameter validation, status
//! mapping) lives in the `cilisou-server` crate; this crate only sees
//! an already-validated `{client_id, term, page}` triple.

mod client;
mod error;
pub mod format;
mod gateway;
mod mirror;
pub mod parser;
mod rate_gate;
mod types;
pub mod url;

// Re-export client types
pub use client::{ClientConfig, ListingClient};

// Re-export error types
pub use error::{GatewayError, MirrorError, Result};

// Re-export gateway API
pub use gateway::{Gateway, GatewayConfig};

// Re-export mirror resolution types
pub use mirror::{CachedMirror, ChromiumBackend, DEFAULT_MIRROR_TTL, MirrorCache, ResolveBackend};

// Re-export rate gate
pub use rate_gate::{DEFAULT_COOLDOWN, RateGate};

// Re-export parser entry point
pub use parser::parse_listing;

// Re-export data types
pub use types::{OutputFormat, TorrentRecord, UNKNOWN};
