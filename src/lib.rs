pub mod auth;
pub mod config;
mod db;
pub mod errors;
mod http;
mod middleware;
pub mod models;
mod state;
pub mod stats;

use axum::{Router, http::StatusCode, middleware as axum_middleware};
use middleware::{cors_layer, create_rate_limiter, rate_limit_middleware};
use sqlx::postgres::PgPoolOptions;
use std::{net::SocketAddr, time::Duration};
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::{config::Config, errors::error_response, state::AppState};

const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;
const DB_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

pub async fn start_server() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            return;
        }
    };

    let postgres = match PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .acquire_timeout(DB_ACQUIRE_TIMEOUT)
        .connect(&config.database_url)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to connect to Postgres: {}", e);
            return;
        }
    };

    if let Err(e) = sqlx::migrate!("./migrations").run(&postgres).await {
        tracing::error!("Failed to run migrations: {}", e);
        return;
    }

    let port = config.port;
    let global_rate_limiter = create_rate_limiter(config.rate_limit_per_minute);
    let auth_rate_limiter = create_rate_limiter(config.auth_rate_limit_per_minute);
    let cors = cors_layer(&config.allowed_origins);

    let state = AppState::new(postgres, config);

    let app = Router::new()
        .merge(http::create_http_routes(state, auth_rate_limiter))
        .fallback(|| async { error_response(StatusCode::NOT_FOUND, "Route not found") })
        .layer(axum_middleware::from_fn(move |req, next| {
            rate_limit_middleware(global_rate_limiter.clone(), req, next)
        }))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind port {}: {}", port, e);
            return;
        }
    };

    tracing::info!("Server running at http://127.0.0.1:{}", port);

    if let Err(e) = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    {
        tracing::error!("Server error: {}", e);
    }
}
