//! Audit record entity - one moderation decision handed to the audit store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{DeviceId, SearchQuery, Verdict};

/// A moderation decision queued for best-effort persistence
///
/// `recorded_at` is `None` on the write path; the store assigns the
/// server-side timestamp when the document is committed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Device that submitted the query
    pub device_id: DeviceId,
    /// The moderated query (trimmed)
    pub query: SearchQuery,
    /// Verdict returned to the caller
    pub verdict: Verdict,
    /// Store-assigned timestamp, absent until persisted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<DateTime<Utc>>,
}

impl AuditRecord {
    /// Create a record for a freshly computed verdict
    pub fn new(device_id: DeviceId, query: SearchQuery, verdict: Verdict) -> Self {
        Self {
            device_id,
            query,
            verdict,
            recorded_at: None,
        }
    }
}
