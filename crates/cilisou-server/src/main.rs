mod config;
mod routes;
mod search;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cilisou_core::{ChromiumBackend, Gateway, GatewayConfig};

use config::{SEED_URL, ServerConfig};
use routes::create_router;
use state::AppState;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env().context("Failed to read configuration")?;
    info!("Outbound proxy: {}", config.proxy.as_deref().unwrap_or("none"));
    info!(
        "Browser backend: {}",
        config
            .browser_remote_url
            .as_deref()
            .unwrap_or("local headless")
    );

    let backend = ChromiumBackend::new(config.browser_remote_url.clone());
    let gateway = Gateway::new(
        backend,
        GatewayConfig {
            seed_url: SEED_URL.to_string(),
            proxy: config.proxy.clone(),
            ..Default::default()
        },
    )
    .context("Failed to create gateway")?;

    let state = Arc::new(AppState::new(gateway));
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server is running on http://localhost:{}", config.port);

    // Per-connection peer addresses feed the rate gate's client identity.
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
