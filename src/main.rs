// src/main.rs
mod routes;
mod handlers;
mod models;
mod database;
mod state;
mod dtos; // expose DTO modules
mod error;
mod usecases;

use axum::{routing::get, Router};
use tracing_subscriber::fmt::init as tracing_init;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use dotenvy::dotenv;
use std::net::{SocketAddr, IpAddr};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_init();

    // Load environment variables
    dotenv().ok();

    // Connect to the document store
    let database_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set");
    let database_name = std::env::var("DATABASE_NAME")
        .unwrap_or_else(|_| "store".to_string());
    let client = database::connect(&database_url).await
        .expect("Failed to connect to MongoDB");
    let db = client.database(&database_name);

    // Create application state
    let app_state = state::AppState::new(&db);

    // Ensure collection indexes before serving traffic
    if let Err(e) = app_state.usecase.init_indexes().await {
        tracing::warn!(error=?e, "Failed to create product indexes");
    }

    // Build application
    let api = routes::create_router()
        .route("/", get(|| async { "Store API" }))
        .route("/health", get(health_check));

    let app = Router::new()
        .merge(api)
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server (axum 0.8 style) with HOST/PORT env and graceful port selection
    let host_str = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let host: IpAddr = host_str.parse().unwrap_or_else(|_| "127.0.0.1".parse().unwrap());
    let base_port = std::env::var("PORT").ok().and_then(|p| p.parse::<u16>().ok()).unwrap_or(3000);

    // Try base_port..base_port+20 to avoid crash when address is in use
    let listener = {
        let mut bound = None;
        for offset in 0u16..=20 {
            let port = base_port.saturating_add(offset);
            let addr = SocketAddr::from((host, port));
            match TcpListener::bind(addr).await {
                Ok(l) => { bound = Some((l, addr)); break; }
                Err(e) => {
                    if offset == 0 { tracing::warn!(%addr, error=%e, "Port in use, trying next"); }
                }
            }
        }
        match bound {
            Some((l, addr)) => {
                tracing::info!("Server running on {}", addr);
                l
            }
            None => {
                tracing::error!("Failed to bind to any port starting at {} on {}", base_port, host);
                return;
            }
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error=%e, "Server error");
    }
}

async fn health_check() -> &'static str {
    "OK"
}
