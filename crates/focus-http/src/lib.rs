//! HTTP API for focusd
//!
//! Thin translation layer between JSON over HTTP and the focus gateway.
//! Handlers do no business logic of their own.

mod error;
mod handlers;
mod state;

pub use error::*;
pub use state::*;

use axum::routing::{get, post};
use axum::Router;

/// Build the API router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/focus/start", post(handlers::start_focus))
        .route("/api/focus/stop", post(handlers::stop_focus))
        .route("/api/focus/status", get(handlers::focus_status))
        .route("/api/focus/history", get(handlers::focus_history))
        .route("/api/usage", post(handlers::report_usage))
        .route("/api/usage/today", get(handlers::usage_today))
        .route("/api/profile", get(handlers::profile))
        .route("/api/presets", get(handlers::presets))
        .route("/api/health", get(handlers::health))
        .with_state(state)
}

#[cfg(test)]
mod tests;
