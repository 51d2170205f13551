use std::sync::Arc;

use axum::{routing::get, Router};
use sqlx::postgres::PgPoolOptions;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

mod client;
mod config;
mod db;
mod error;
mod handlers;
mod models;
mod services;

use crate::client::ProductClient;
use crate::config::Config;
use crate::db::PgInventoryStore;
use crate::services::InventoryService;

/// Shared application state, cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub inventory: Arc<InventoryService>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (ignored in production where env vars are injected)
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,inventory_service=debug,inventory_events=info".into()),
        )
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env()?;

    info!("Connecting to PostgreSQL...");
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;
    info!("Database connection pool established.");

    info!("Running migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Migrations complete.");

    info!(
        base_url = %config.product_service.base_url,
        timeout_ms = config.product_service.timeout.as_millis() as u64,
        max_attempts = config.product_service.retry.max_attempts(),
        "Configuring product service client"
    );
    let catalog = ProductClient::new(config.product_service)?;

    let state = AppState {
        inventory: Arc::new(InventoryService::new(
            Arc::new(PgInventoryStore::new(pool)),
            Arc::new(catalog),
        )),
    };

    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    info!("Inventory service listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_router(state: AppState) -> Router {
    Router::new()
        // ── Health ──────────────────────────────────────────────────────────
        .route("/health", get(handlers::health))

        // ── Inventory by product ────────────────────────────────────────────
        .route(
            "/api/v1/inventories/products/:product_id",
            get(handlers::inventories::get_inventory_details)
                .patch(handlers::inventories::update_inventory_quantity),
        )

        // ── Middleware ──────────────────────────────────────────────────────
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
