//! HTTP API for the bracket service.
//!
//! This module provides the REST API over the bracket engine: creating and
//! generating brackets, recording match results, and serving bracket state
//! to the festival frontend.
//!
//! # Architecture
//!
//! The API is built with:
//! - **Axum**: Async web framework
//! - **Tower-http**: CORS middleware
//! - **Gateway identity**: The upstream auth gateway authenticates users and
//!   forwards `X-User-Id` / `X-User-Role`; authorization rules live in the
//!   bracket engine itself
//!
//! # Modules
//!
//! - [`brackets`]: Bracket lifecycle and match result endpoints
//! - [`middleware`]: Identity extraction for protected endpoints
//! - [`request_id`]: Request correlation ids and HTTP metrics
//!
//! # Endpoints Overview
//!
//! ## Public (spectators)
//! - `GET /health` - Server health status
//! - `GET /api/v1/brackets` - List brackets (`?tournament_id=&game=`)
//! - `GET /api/v1/brackets/{id}` - Full bracket with rounds
//!
//! ## Protected (identity headers required)
//! - `POST /api/v1/brackets` - Create bracket (admin)
//! - `POST /api/v1/brackets/{id}/generate` - Generate rounds (admin)
//! - `PUT  /api/v1/brackets/{id}/match/{round}/{match}` - Submit result
//!   (admin or involved captain)
//! - `POST /api/v1/brackets/{id}/complete` - Close bracket (admin)
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use eb_server::api::{AppState, create_router};
//! use esports_brackets::bracket::{BracketManager, Shuffler};
//! use esports_brackets::store::MemoryStore;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(MemoryStore::new());
//! let manager = BracketManager::with_store(store, Shuffler::new());
//!
//! let app = create_router(AppState { manager });
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # CORS
//!
//! CORS is configured permissively for development. In production, configure
//! appropriate origins, methods, and headers.

pub mod brackets;
pub mod middleware;
pub mod request_id;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post, put},
};
use esports_brackets::bracket::BracketManager;
use serde_json::json;
use tower_http::cors::CorsLayer;

/// Application state shared across all HTTP handlers.
///
/// Cloned per request; the manager is a handle around `Arc`ed repositories,
/// so clones are cheap.
#[derive(Clone)]
pub struct AppState {
    pub manager: BracketManager,
}

/// Create the complete API router with all endpoints and middleware.
///
/// # Arguments
///
/// - `state`: Application state with the bracket manager
///
/// # Returns
///
/// Configured Axum router ready to serve requests
pub fn create_router(state: AppState) -> Router {
    // API v1 routes (versioned for future evolution)
    let v1_routes = create_v1_router();

    // Root routes (health check - not versioned)
    let root_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .merge(root_routes)
        .nest("/api/v1", v1_routes)
        .layer(axum::middleware::from_fn(request_id::request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Create the API v1 router with all versioned endpoints.
///
/// Reads are public so spectators can follow brackets without an account;
/// mutating routes go through the identity middleware.
fn create_v1_router() -> Router<AppState> {
    // Public routes (no identity headers required)
    let public_routes = Router::new()
        .route("/brackets", get(brackets::list_brackets))
        .route("/brackets/{bracket_id}", get(brackets::get_bracket));

    // Protected routes (require gateway identity headers)
    let protected_routes = Router::new()
        .route("/brackets", post(brackets::create_bracket))
        .route(
            "/brackets/{bracket_id}/generate",
            post(brackets::generate_bracket),
        )
        .route(
            "/brackets/{bracket_id}/match/{round_number}/{match_number}",
            put(brackets::submit_result),
        )
        .route(
            "/brackets/{bracket_id}/complete",
            post(brackets::complete_bracket),
        )
        .layer(axum::middleware::from_fn(middleware::identity_middleware));

    // Combine v1 routes
    Router::new().merge(public_routes).merge(protected_routes)
}

/// Health check endpoint for monitoring and load balancers.
///
/// Confirms the bracket store is responsive and reports how many brackets
/// it currently holds.
///
/// # Example
///
/// ```bash
/// curl http://localhost:3000/health
/// # {"status":"healthy","version":"1.0.0","brackets":{"healthy":true,"count":4},"timestamp":"2025-11-22T10:30:00Z"}
/// ```
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    // An in-memory store only fails if a repository misbehaves, but the
    // check keeps the contract honest for future backends.
    let brackets = state.manager.list_brackets(None, None).await;
    let store_healthy = brackets.is_ok();
    let bracket_count = brackets.map(|b| b.len()).unwrap_or(0);

    let status_code = if store_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = json!({
        "status": if store_healthy { "healthy" } else { "unhealthy" },
        "version": env!("CARGO_PKG_VERSION"),
        "brackets": {
            "healthy": store_healthy,
            "count": bracket_count
        },
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (status_code, Json(response))
}
