// Server module - Router assembly and the listening loop

use axum::{
    Router,
    http::HeaderValue,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};
use std::any::Any;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::api::error::ApiError;
use crate::api_docs;
use crate::infrastructure::config::Config;
use crate::infrastructure::db;
use crate::infrastructure::rate_limit::{self, RateLimitConfig, RateLimiter};
use crate::infrastructure::AppState;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to open database: {0}")]
    Database(#[from] sea_orm::DbErr),
    #[error("Failed to bind to {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },
    #[error("HTTP server error: {0}")]
    Serve(std::io::Error),
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(AnyOrigin).allow_headers(AnyOrigin);

    // A literal "*" cannot be mixed into an origin list
    if allowed_origins.is_empty() || allowed_origins.iter().any(|o| o.trim() == "*") {
        return cors.allow_origin(AnyOrigin);
    }

    let mut origins = Vec::new();
    for origin in allowed_origins {
        match origin.parse::<HeaderValue>() {
            Ok(v) => origins.push(v),
            Err(e) => tracing::error!("Failed to parse CORS origin '{}': {}", origin, e),
        }
    }
    cors.allow_origin(origins)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    };

    tracing::error!("Error: {}", detail);
    ApiError::internal("Internal server error", detail).into_response()
}

/// Build the full application router around already-initialized state
pub fn build_router(state: AppState, config: &Config) -> Router {
    let limiter = RateLimiter::new(RateLimitConfig {
        max_requests: config.rate_limit_max,
        window: Duration::from_secs(config.rate_limit_window_secs),
    });

    Router::new()
        .nest("/api", api::api_router(state))
        .route("/api-docs/openapi.json", get(api_docs::openapi_json))
        .fallback(api::error::route_not_found)
        .layer(middleware::from_fn_with_state(
            limiter,
            rate_limit::limit_requests,
        ))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_allowed_origins))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

/// Open the database, serve until Ctrl-C, then close the connection
pub async fn run(config: Config) -> Result<(), ServerError> {
    let db = db::init_db(&config.database_url).await?;
    tracing::info!("Connected to database {}", config.database_url);

    let state = AppState::new(db);
    let app = build_router(state.clone(), &config);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;

    tracing::info!("Server running on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(ServerError::Serve)?;

    match state.db().clone().close().await {
        Ok(()) => tracing::info!("Database connection closed"),
        Err(e) => tracing::error!("Error closing database: {}", e),
    }

    Ok(())
}
