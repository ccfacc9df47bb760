//! Moneta API server binary.
//!
//! Wires configuration, the database pool, and the token service
//! together, then serves the HTTP API.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use moneta_api::{AppState, create_router};
use moneta_db::connect;
use moneta_shared::{AppConfig, JwtService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moneta=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;

    let db = connect(&config.database.url)
        .await
        .context("failed to connect to database")?;
    info!("Connected to database");

    let jwt_service = JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expires_minutes,
        config.jwt.refresh_token_expires_days,
    );

    let state = AppState {
        db: Arc::new(db),
        jwt_service: Arc::new(jwt_service),
    };

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Moneta API listening on {addr}");

    axum::serve(listener, create_router(state)).await?;

    Ok(())
}
