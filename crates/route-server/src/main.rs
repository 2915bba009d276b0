//! Route server - edit sessions, seamark lookup and export downloads

use anyhow::Result;
use axum::routing::get;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use route_server::api;
use route_server::config::Config;
use route_server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("route_server=debug".parse()?))
        .init();

    tracing::info!("Starting route server...");

    let config = Config::from_env();
    let port = config.server_port;
    tracing::info!(
        "Overpass endpoint {} (timeout {}s), units {}, labels '{}'",
        config.overpass_url,
        config.overpass_timeout_s,
        config.distance_unit,
        config.table_lang
    );
    let state = Arc::new(AppState::new(config)?);

    let app = api::routes()
        .route("/health", get(|| async { "OK" }))
        .route("/v1/stream", get(api::ws::ws_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
