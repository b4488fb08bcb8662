//! schembot HTTP/JSON command gateway.
//!
//! This crate exposes the schematic-inspection command over HTTP: the chat
//! platform's slash command maps to `POST /commands/schem` (multipart upload
//! plus the opaque venue id), and the reply the bot would send comes back as
//! an ephemeral command response.

pub mod config;
pub mod error;
pub mod response;
pub mod routes;

pub use config::{Args, GatewayConfig};
pub use error::AppError;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::trace::TraceLayer;

/// Application state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration.
    pub config: GatewayConfig,
}

impl AppState {
    /// Create new application state.
    pub fn new(config: GatewayConfig) -> Self {
        Self { config }
    }
}

/// Create the router with all routes.
pub fn create_router(state: AppState) -> Router {
    // Headroom over the upload cap for multipart framing.
    let body_limit = state.config.max_upload_bytes + 64 * 1024;

    Router::new()
        .merge(routes::health::routes())
        .merge(routes::schem::routes())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
