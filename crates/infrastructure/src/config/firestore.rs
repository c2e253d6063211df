//! Firestore audit store configuration.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Configuration for the Firestore document store used for audit logging.
///
/// Entirely optional: when the project id or credential is missing, audit
/// logging degrades to disabled and the service runs without it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirestoreConfig {
    /// Google Cloud project id owning the database
    #[serde(default)]
    pub project_id: String,

    /// API key (sensitive - never serialized or logged)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Base URL of the Firestore REST API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Collection receiving audit documents
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_base_url() -> String {
    "https://firestore.googleapis.com".to_string()
}

fn default_collection() -> String {
    "search_logs".to_string()
}

const fn default_timeout_ms() -> u64 {
    10000
}

impl Default for FirestoreConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            api_key: None,
            base_url: default_base_url(),
            collection: default_collection(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl FirestoreConfig {
    /// Whether both the project id and a non-empty credential are present
    pub fn is_configured(&self) -> bool {
        !self.project_id.trim().is_empty()
            && self
                .api_key
                .as_ref()
                .is_some_and(|key| !key.expose_secret().trim().is_empty())
    }
}
