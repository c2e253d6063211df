//! HTTP presentation layer for KidGuard
//!
//! Exposes the moderation endpoint plus health and banner routes.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
