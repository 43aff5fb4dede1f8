// SPDX-FileCopyrightText: 2026 Guardian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the API.

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, patch, post},
    Router,
};
use guardian_auth::AccountService;
use guardian_config::model::GeneratorConfig;
use guardian_core::{GuardianError, StorageAdapter};
use guardian_vault::VaultService;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::session_middleware;
use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    pub accounts: AccountService,
    pub vault: VaultService,
    /// Storage handle for the health route.
    pub storage: Arc<dyn StorageAdapter>,
    /// Lengths used when `/api/generate` omits one.
    pub generator: GeneratorConfig,
    /// Process start time for uptime calculation.
    pub start_time: std::time::Instant,
}

/// Address the server binds to.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Build the full router.
///
/// Public:
/// - GET /health
/// - POST /api/register, POST /api/login
/// - GET /api/generate, POST /api/strength
///
/// Behind [`session_middleware`]:
/// - POST /api/logout, GET /api/user
/// - GET|POST /api/passwords, GET /api/passwords/stats
/// - PATCH|DELETE /api/passwords/{id}
pub fn build_router(state: GatewayState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::get_health))
        .route("/api/register", post(handlers::post_register))
        .route("/api/login", post(handlers::post_login))
        .route("/api/generate", get(handlers::get_generate))
        .route("/api/strength", post(handlers::post_strength))
        .with_state(state.clone());

    let api_routes = Router::new()
        .route("/api/logout", post(handlers::post_logout))
        .route("/api/user", get(handlers::get_user))
        .route(
            "/api/passwords",
            get(handlers::list_passwords).post(handlers::create_password),
        )
        .route("/api/passwords/stats", get(handlers::get_stats))
        .route(
            "/api/passwords/{id}",
            patch(handlers::update_password).delete(handlers::delete_password),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Bind and serve until `shutdown` is cancelled.
pub async fn start_server(
    config: &ServerConfig,
    state: GatewayState,
    shutdown: CancellationToken,
) -> Result<(), GuardianError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| GuardianError::Internal(format!("failed to bind {addr}: {e}")))?;

    tracing::info!("API server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| GuardianError::Internal(format!("server error: {e}")))?;

    tracing::info!("API server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_config_debug() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 5000,
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("127.0.0.1"));
        assert!(debug.contains("5000"));
    }
}
