//! API route definitions
//!
//! - /health - liveness and interaction counters
//! - /api/v1/wells - wells offered by the viewer
//! - /api/v1/surfaces - surfaces with their visibility toggles
//! - /api/v1/model - model directory summary
//! - /api/v1/cross-section - current figure
//! - /api/v1/events - apply a viewer event

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{self, ViewerState};

/// Versioned API routes, nested under `/api/v1`.
pub fn api_routes(state: ViewerState) -> Router {
    Router::new()
        .route("/wells", get(handlers::list_wells))
        .route("/surfaces", get(handlers::list_surfaces))
        .route("/model", get(handlers::get_model))
        .route("/cross-section", get(handlers::get_cross_section))
        .route("/events", post(handlers::post_event))
        .with_state(state)
}

/// Health endpoint at root level
pub fn health_routes(state: ViewerState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .with_state(state)
}
