use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use sell_oauth::{api, store, AppState, Config, SharedState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sell_oauth=info,tower_http=info".into()),
        )
        .init();

    // Load config
    let config = Config::from_env()?;
    info!("sell-oauth v{}", env!("CARGO_PKG_VERSION"));
    info!(
        auth_url = %config.auth_url,
        token_url = %config.token_url,
        redirect_uri = %config.redirect_uri,
        "Provider endpoints configured"
    );

    let addr = config.bind_addr();
    let state: SharedState = Arc::new(AppState::new(config)?);

    // Start session sweep daemon
    let daemon_state = state.clone();
    tokio::spawn(async move {
        store::sweep_daemon(daemon_state).await;
    });

    // Build router
    let app = api::router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server is running on http://{addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
