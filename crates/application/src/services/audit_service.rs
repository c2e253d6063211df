//! Audit service - best-effort persistence of moderation decisions
//!
//! Writes are fire-and-forget: the HTTP handler never awaits them and their
//! outcome can never alter a response that has already been computed.

use std::{fmt, sync::Arc};

use domain::{AuditRecord, DeviceId, SearchQuery, Verdict};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::ports::AuditStorePort;

/// Service that records moderation decisions to the audit store
pub struct AuditService {
    store: Option<Arc<dyn AuditStorePort>>,
}

impl fmt::Debug for AuditService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuditService")
            .field("enabled", &self.is_enabled())
            .finish_non_exhaustive()
    }
}

impl AuditService {
    /// Create a service backed by the given store, or a disabled one when
    /// the store was not configured at startup.
    pub fn new(store: Option<Arc<dyn AuditStorePort>>) -> Self {
        if store.is_none() {
            debug!("Audit store not configured, logging disabled");
        }
        Self { store }
    }

    /// Create a service with audit logging disabled
    pub fn disabled() -> Self {
        Self::new(None)
    }

    /// Whether a store is available for audit writes
    pub fn is_enabled(&self) -> bool {
        self.store.is_some()
    }

    /// Record one moderation decision, detached from the caller.
    ///
    /// Returns `None` without writing when the store is absent or the
    /// device id is a non-logging sentinel. Otherwise spawns the insert and
    /// returns the task handle; callers on the request path discard it,
    /// tests may await it. The spawned task logs failures and never
    /// propagates them.
    pub fn record(
        &self,
        device_id: &DeviceId,
        query: &SearchQuery,
        verdict: Verdict,
    ) -> Option<JoinHandle<()>> {
        let store = self.store.as_ref()?;

        if !device_id.is_loggable() {
            debug!(device = %device_id, "Sentinel device id, skipping audit write");
            return None;
        }

        let store = Arc::clone(store);
        let record = AuditRecord::new(device_id.clone(), query.clone(), verdict);

        Some(tokio::spawn(async move {
            match store.insert(&record).await {
                Ok(()) => debug!(
                    device = %record.device_id,
                    verdict = %record.verdict,
                    "Audit record written"
                ),
                Err(e) => warn!(
                    device = %record.device_id,
                    error = %e,
                    "Audit write failed"
                ),
            }
        }))
    }
}
