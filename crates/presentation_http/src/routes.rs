//! Route definitions

use axum::{
    Router,
    routing::{get, post},
};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Informational endpoints
        .route("/", get(handlers::system::banner))
        .route("/health", get(handlers::health::health_check))
        // Moderation endpoint
        .route("/moderate", post(handlers::moderate::moderate))
        // Attach state
        .with_state(state)
}
