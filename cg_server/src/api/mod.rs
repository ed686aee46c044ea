//! HTTP API for the chat game bot.
//!
//! A platform adapter (Telegram webhook bridge, test harness, ...) posts every
//! chat message here and performs the returned [`Reply`](chat_games::Reply).
//!
//! # Modules
//!
//! - [`commands`]: the message endpoint
//! - [`request_id`]: request correlation middleware
//!
//! # Endpoints Overview
//!
//! - `POST /api/v1/commands` - Handle one chat message
//! - `GET /health` - Server health status
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use cg_server::api::{create_router, AppState};
//! use chat_games::{Dispatcher, DispatcherConfig, NoopScoreService};
//! use chat_games::records::MemoryUserStore;
//! use std::sync::Arc;
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!
//! let dispatcher = Dispatcher::new(
//!     DispatcherConfig::default(),
//!     Arc::new(MemoryUserStore::new()),
//!     Arc::new(NoopScoreService),
//! );
//! let app = create_router(AppState::new(dispatcher));
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # CORS
//!
//! CORS is configured permissively. The endpoint is meant to sit behind the
//! platform adapter, not to be exposed publicly.

pub mod commands;
pub mod request_id;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
};
use chat_games::Dispatcher;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Application state shared across all HTTP handlers.
///
/// Cloned for each request; the dispatcher sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
}

impl AppState {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
        }
    }
}

/// Create the complete API router with all endpoints and middleware.
///
/// # Endpoint Summary
///
/// ```text
/// GET  /health            - Health check
/// POST /api/v1/commands   - Handle a chat message
/// ```
pub fn create_router(state: AppState) -> Router {
    let v1_routes = Router::new().route("/commands", post(commands::handle_command));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", v1_routes)
        .layer(axum::middleware::from_fn(request_id::request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint for monitoring and load balancers.
///
/// # Example
///
/// ```bash
/// curl http://localhost:8080/health
/// # {"status":"healthy","version":"0.1.0","active_games":2,"timestamp":"2025-11-22T10:30:00Z"}
/// ```
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let active_games = state.dispatcher.active_games().await;

    let response = json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "active_games": active_games,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (StatusCode::OK, Json(response))
}
