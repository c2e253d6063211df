//! Firestore audit store - Implements AuditStorePort over the Firestore
//! REST API
//!
//! Each audit record becomes one document in the configured collection,
//! written through the `documents:commit` endpoint so the `timestamp` field
//! can be assigned server-side via a `REQUEST_TIME` transform.

use std::{collections::BTreeMap, time::Duration};

use application::{error::ApplicationError, ports::AuditStorePort};
use async_trait::async_trait;
use domain::AuditRecord;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::config::FirestoreConfig;

/// Audit store backed by Google Firestore
pub struct FirestoreAuditStore {
    client: Client,
    config: FirestoreConfig,
    api_key: SecretString,
}

impl std::fmt::Debug for FirestoreAuditStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirestoreAuditStore")
            .field("project_id", &self.config.project_id)
            .field("collection", &self.config.collection)
            .finish_non_exhaustive()
    }
}

impl FirestoreAuditStore {
    /// Create a new store from configuration.
    ///
    /// Fails when the project id or credential is missing; callers treat
    /// that as "audit logging disabled" rather than a startup error.
    pub fn new(config: FirestoreConfig) -> Result<Self, ApplicationError> {
        if !config.is_configured() {
            return Err(ApplicationError::Configuration(
                "Firestore project id or API key missing".to_string(),
            ));
        }

        // is_configured() guarantees the key is present
        let api_key = config.api_key.clone().ok_or_else(|| {
            ApplicationError::Configuration("Firestore API key missing".to_string())
        })?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| ApplicationError::ExternalService(e.to_string()))?;

        info!(
            project_id = %config.project_id,
            collection = %config.collection,
            "Initialized Firestore audit store"
        );

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    /// The commit endpoint for the configured database
    fn commit_url(&self) -> String {
        format!(
            "{}/v1/projects/{}/databases/(default)/documents:commit",
            self.config.base_url.trim_end_matches('/'),
            self.config.project_id
        )
    }

    /// Full resource name for a new document in the audit collection
    fn document_name(&self, document_id: &str) -> String {
        format!(
            "projects/{}/databases/(default)/documents/{}/{}",
            self.config.project_id, self.config.collection, document_id
        )
    }

    /// Build the commit body: one update write carrying the record fields
    /// and one transform assigning the server-side timestamp.
    fn commit_body(&self, record: &AuditRecord, document_id: &str) -> CommitRequest {
        let name = self.document_name(document_id);

        let mut fields = BTreeMap::new();
        fields.insert(
            "deviceId".to_string(),
            FirestoreValue::string(record.device_id.as_str()),
        );
        fields.insert(
            "query".to_string(),
            FirestoreValue::string(record.query.as_str()),
        );
        fields.insert(
            "action".to_string(),
            FirestoreValue::string(record.verdict.as_str()),
        );

        CommitRequest {
            writes: vec![
                Write {
                    update: Some(Document {
                        name: name.clone(),
                        fields,
                    }),
                    transform: None,
                },
                Write {
                    update: None,
                    transform: Some(DocumentTransform {
                        document: name,
                        field_transforms: vec![FieldTransform {
                            field_path: "timestamp".to_string(),
                            set_to_server_value: "REQUEST_TIME".to_string(),
                        }],
                    }),
                },
            ],
        }
    }
}

/// Firestore commit request
#[derive(Debug, Serialize)]
struct CommitRequest {
    writes: Vec<Write>,
}

#[derive(Debug, Serialize)]
struct Write {
    #[serde(skip_serializing_if = "Option::is_none")]
    update: Option<Document>,
    #[serde(skip_serializing_if = "Option::is_none")]
    transform: Option<DocumentTransform>,
}

#[derive(Debug, Serialize)]
struct Document {
    name: String,
    fields: BTreeMap<String, FirestoreValue>,
}

#[derive(Debug, Serialize)]
struct FirestoreValue {
    #[serde(rename = "stringValue")]
    string_value: String,
}

impl FirestoreValue {
    fn string(value: impl Into<String>) -> Self {
        Self {
            string_value: value.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct DocumentTransform {
    document: String,
    #[serde(rename = "fieldTransforms")]
    field_transforms: Vec<FieldTransform>,
}

#[derive(Debug, Serialize)]
struct FieldTransform {
    #[serde(rename = "fieldPath")]
    field_path: String,
    #[serde(rename = "setToServerValue")]
    set_to_server_value: String,
}

#[async_trait]
impl AuditStorePort for FirestoreAuditStore {
    #[instrument(skip(self, record), fields(device = %record.device_id))]
    async fn insert(&self, record: &AuditRecord) -> Result<(), ApplicationError> {
        let document_id = Uuid::new_v4().to_string();
        let body = self.commit_body(record, &document_id);

        let response = self
            .client
            .post(self.commit_url())
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| ApplicationError::ExternalService(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Firestore commit failed");
            return Err(ApplicationError::ExternalService(format!(
                "Firestore commit failed with status {status}"
            )));
        }

        debug!(document_id = %document_id, "Audit document committed");
        Ok(())
    }
}
