//! Integration tests for the infrastructure adapters using WireMock

use ai_core::GenerationConfig;
use application::ports::{AuditStorePort, GenerationPort};
use domain::{AuditRecord, DeviceId, SearchQuery, Verdict};
use infrastructure::{FirestoreAuditStore, FirestoreConfig, GeminiGenerationAdapter};
use secrecy::SecretString;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, header, method, path},
};

// =============================================================================
// Gemini generation adapter
// =============================================================================

fn generation_config(base_url: &str) -> GenerationConfig {
    GenerationConfig {
        base_url: base_url.to_string(),
        model: "test-model".to_string(),
        api_key: Some(SecretString::from("test-key")),
        timeout_ms: 5000,
    }
}

fn gemini_reply(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [
            {"content": {"parts": [{"text": text}]}, "finishReason": "STOP"}
        ]
    })
}

#[tokio::test]
async fn adapter_returns_raw_reply_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/test-model:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply("selfharm")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let adapter = GeminiGenerationAdapter::new(generation_config(&mock_server.uri()))
        .expect("Failed to create adapter");

    let reply = adapter.generate("some prompt").await.unwrap();
    assert_eq!(reply, "selfharm");
}

#[tokio::test]
async fn adapter_maps_server_failure_to_application_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exhausted"))
        .mount(&mock_server)
        .await;

    let adapter = GeminiGenerationAdapter::new(generation_config(&mock_server.uri()))
        .expect("Failed to create adapter");

    let err = adapter.generate("prompt").await.unwrap_err();
    assert!(matches!(
        err,
        application::ApplicationError::Generation(_)
    ));
}

// =============================================================================
// Firestore audit store
// =============================================================================

fn firestore_config(base_url: &str) -> FirestoreConfig {
    FirestoreConfig {
        project_id: "kidguard-test".to_string(),
        api_key: Some(SecretString::from("store-key")),
        base_url: base_url.to_string(),
        timeout_ms: 5000,
        ..Default::default()
    }
}

fn sample_record() -> AuditRecord {
    AuditRecord::new(
        DeviceId::new("tablet-42"),
        SearchQuery::new("cute cats").unwrap(),
        Verdict::Unblock,
    )
}

#[tokio::test]
async fn insert_commits_fields_and_server_timestamp() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(
            "/v1/projects/kidguard-test/databases/(default)/documents:commit",
        ))
        .and(header("x-goog-api-key", "store-key"))
        .and(body_partial_json(serde_json::json!({
            "writes": [
                {
                    "update": {
                        "fields": {
                            "deviceId": {"stringValue": "tablet-42"},
                            "query": {"stringValue": "cute cats"},
                            "action": {"stringValue": "unblock"}
                        }
                    }
                },
                {
                    "transform": {
                        "fieldTransforms": [
                            {"fieldPath": "timestamp", "setToServerValue": "REQUEST_TIME"}
                        ]
                    }
                }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "writeResults": [{}, {"transformResults": [{"timestampValue": "2026-01-01T00:00:00Z"}]}],
            "commitTime": "2026-01-01T00:00:00Z"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store =
        FirestoreAuditStore::new(firestore_config(&mock_server.uri())).expect("Failed to create");

    store.insert(&sample_record()).await.unwrap();
}

#[tokio::test]
async fn insert_surfaces_store_failure_as_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_string("permission denied"))
        .mount(&mock_server)
        .await;

    let store =
        FirestoreAuditStore::new(firestore_config(&mock_server.uri())).expect("Failed to create");

    let err = store.insert(&sample_record()).await.unwrap_err();
    assert!(matches!(
        err,
        application::ApplicationError::ExternalService(_)
    ));
}

#[tokio::test]
async fn insert_distinct_records_creates_distinct_documents() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "writeResults": [{}, {}]
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    let store =
        FirestoreAuditStore::new(firestore_config(&mock_server.uri())).expect("Failed to create");

    store.insert(&sample_record()).await.unwrap();
    store.insert(&sample_record()).await.unwrap();
}
