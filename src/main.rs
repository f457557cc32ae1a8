//! Shopfront server entry point.

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use shopfront::adapters::agent::HttpAgentGateway;
use shopfront::adapters::http::{
    api_router, AuthHandlers, CatalogHandlers, ChatHandlers, OrderHandlers,
};
use shopfront::adapters::postgres::{
    PostgresCatalogReader, PostgresCustomerAuthenticator, PostgresOrderReader,
};
use shopfront::adapters::storage::LocalAttachmentStore;
use shopfront::application::{ProductBrowseService, SessionOrchestrator};
use shopfront::config::{AppConfig, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;
    info!("connected to database");

    let gateway = Arc::new(HttpAgentGateway::new(config.agent.clone())?);
    let attachments = Arc::new(LocalAttachmentStore::new(config.storage.clone()));
    let orchestrator = Arc::new(SessionOrchestrator::new(gateway, attachments));

    let catalog_reader = Arc::new(PostgresCatalogReader::new(pool.clone()));
    let browse = Arc::new(ProductBrowseService::new(catalog_reader));
    let order_reader = Arc::new(PostgresOrderReader::new(pool.clone()));
    let authenticator = Arc::new(PostgresCustomerAuthenticator::new(pool.clone()));

    let app = api_router(
        AuthHandlers::new(authenticator),
        CatalogHandlers::new(browse),
        OrderHandlers::new(order_reader),
        ChatHandlers::new(orchestrator),
    )
    .layer(TraceLayer::new_for_http())
    .layer(TimeoutLayer::new(Duration::from_secs(
        config.server.request_timeout_secs,
    )))
    .layer(cors_layer(&config.server));

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "shopfront server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shopfront server stopped");
    Ok(())
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins = server.cors_origins_list();
    if origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(parsed)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to install shutdown handler");
    }
}
