//! Application state shared across handlers

use std::sync::Arc;

use application::{AuditService, ModerationService};

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Moderation service for query classification
    pub moderation: Arc<ModerationService>,
    /// Audit service for best-effort decision logging
    pub audit: Arc<AuditService>,
}

impl AppState {
    /// Create state from the assembled services
    pub fn new(moderation: Arc<ModerationService>, audit: Arc<AuditService>) -> Self {
        Self { moderation, audit }
    }
}
