//! Environment-variable configuration for the server shell

use std::env;

/// Seed address the mirror resolution always starts from. The index
/// publishes its current domain by redirecting from here.
pub const SEED_URL: &str = "https://ver.emoncili.com/";

const DEFAULT_PORT: u16 = 3000;

/// Process-wide configuration read once at startup
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// TCP port to listen on (`PORT`, default 3000)
    pub port: u16,
    /// Optional outbound proxy for listing requests (`HTTP_PROXY`)
    pub proxy: Option<String>,
    /// Optional remote DevTools websocket endpoint; when absent a local
    /// headless browser is launched (`BROWSER_REMOTE_URL`)
    pub browser_remote_url: Option<String>,
}

impl ServerConfig {
    /// Read configuration from the process environment
    ///
    /// # Errors
    /// Returns an error when `PORT` is set but not a valid port number.
    pub fn from_env() -> anyhow::Result<Self> {
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a port number, got {raw:?}"))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            port,
            proxy: env::var("HTTP_PROXY").ok(),
            browser_remote_url: env::var("BROWSER_REMOTE_URL").ok(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_port() {
        assert_eq!(DEFAULT_PORT, 3000);
    }

    #[test]
    fn test_seed_url_has_trailing_slash() {
        assert!(SEED_URL.ends_with('/'));
    }
}
