//! URL Reputation API backend
//!
//! Rust/Axum service relaying Google Safe Browsing verdicts.

use reputation_api::config::Config;
use reputation_api::gateway::SafeBrowsingGateway;
use reputation_api::{build_router, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Fails fast on a missing credential; that is a deployment error.
    let config = Config::from_env()?;
    let addr = format!("0.0.0.0:{}", config.port);

    let gateway = SafeBrowsingGateway::new(config.api_key.clone(), config.lookup_timeout);
    let app = build_router(AppState { gateway });

    tracing::info!("reputation API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
