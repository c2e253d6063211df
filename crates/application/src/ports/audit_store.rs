//! Port for audit record persistence
//!
//! Implemented by the document-store adapter. The audit path is
//! best-effort by contract: callers of this port absorb its failures.

use async_trait::async_trait;
use domain::AuditRecord;

use crate::error::ApplicationError;

/// Port for audit record storage
#[async_trait]
pub trait AuditStorePort: Send + Sync {
    /// Persist one moderation decision
    async fn insert(&self, record: &AuditRecord) -> Result<(), ApplicationError>;
}
