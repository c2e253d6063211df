//! Gemini REST client implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::config::GenerationConfig;
use crate::error::GenerationError;
use crate::ports::{
    GenerationEngine, GenerationRequest, GenerationResponse, SafetySetting, TokenUsage,
};

/// Generation engine backed by the Gemini `generateContent` endpoint
pub struct GeminiGenerationEngine {
    client: Client,
    config: GenerationConfig,
    api_key: SecretString,
}

impl std::fmt::Debug for GeminiGenerationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiGenerationEngine")
            .field("base_url", &self.config.base_url)
            .field("model", &self.config.model)
            .finish_non_exhaustive()
    }
}

impl GeminiGenerationEngine {
    /// Create a new engine from configuration.
    ///
    /// Fails when no API key is configured; the service cannot run without
    /// its generation credential.
    pub fn new(config: GenerationConfig) -> Result<Self, GenerationError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.expose_secret().trim().is_empty())
            .ok_or(GenerationError::MissingCredential)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| GenerationError::ConnectionFailed(e.to_string()))?;

        info!(
            base_url = %config.base_url,
            model = %config.model,
            "Initialized Gemini generation engine"
        );

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    /// Build the generateContent URL for the configured model
    fn api_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

/// Gemini-format generate request
#[derive(Debug, Serialize)]
struct GeminiGenerateRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "safetySettings", skip_serializing_if = "Vec::is_empty")]
    safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

/// Gemini-format generate response
#[derive(Debug, Deserialize)]
struct GeminiGenerateResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(rename = "usageMetadata")]
    usage_metadata: Option<GeminiUsageMetadata>,
    #[serde(rename = "modelVersion")]
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiUsageMetadata {
    #[serde(rename = "promptTokenCount", default)]
    prompt_token_count: Option<u32>,
    #[serde(rename = "candidatesTokenCount", default)]
    candidates_token_count: Option<u32>,
}

#[async_trait]
impl GenerationEngine for GeminiGenerationEngine {
    #[instrument(skip(self, request), fields(model = %self.config.model))]
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        let gemini_request = GeminiGenerateRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: request.prompt,
                }],
            }],
            safety_settings: request.safety_settings,
        };

        debug!("Sending request to Gemini");

        let response = self
            .client
            .post(self.api_url())
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&gemini_request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Generation request failed");
            return Err(GenerationError::ServerError {
                status: status.as_u16(),
                body,
            });
        }

        let gemini_response: GeminiGenerateResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;

        let candidate = gemini_response
            .candidates
            .into_iter()
            .next()
            .ok_or(GenerationError::EmptyResponse)?;

        let content = candidate
            .content
            .map(|c| {
                c.parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .filter(|text| !text.is_empty())
            .ok_or(GenerationError::EmptyResponse)?;

        let usage = gemini_response.usage_metadata.and_then(|u| {
            match (u.prompt_token_count, u.candidates_token_count) {
                (Some(prompt), Some(completion)) => Some(TokenUsage {
                    prompt_tokens: prompt,
                    completion_tokens: completion,
                    total_tokens: prompt + completion,
                }),
                _ => None,
            }
        });

        debug!(tokens = ?usage, "Generation completed");

        Ok(GenerationResponse {
            content,
            model: gemini_response
                .model_version
                .unwrap_or_else(|| self.config.model.clone()),
            usage,
            finish_reason: candidate.finish_reason,
        })
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key() -> GenerationConfig {
        GenerationConfig::with_api_key("test-key")
    }

    #[test]
    fn new_requires_api_key() {
        let result = GeminiGenerationEngine::new(GenerationConfig::default());
        assert!(matches!(result, Err(GenerationError::MissingCredential)));
    }

    #[test]
    fn new_rejects_blank_api_key() {
        let result = GeminiGenerationEngine::new(GenerationConfig::with_api_key("   "));
        assert!(matches!(result, Err(GenerationError::MissingCredential)));
    }

    #[test]
    fn api_url_targets_configured_model() {
        let engine = GeminiGenerationEngine::new(config_with_key()).unwrap();
        assert_eq!(
            engine.api_url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn api_url_tolerates_trailing_slash() {
        let mut config = config_with_key();
        config.base_url = "http://localhost:9090/".to_string();
        let engine = GeminiGenerationEngine::new(config).unwrap();
        assert_eq!(
            engine.api_url(),
            "http://localhost:9090/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn model_name_reports_config() {
        let engine = GeminiGenerationEngine::new(config_with_key()).unwrap();
        assert_eq!(engine.model_name(), "gemini-2.5-flash");
    }

    #[test]
    fn debug_omits_credential() {
        let engine = GeminiGenerationEngine::new(config_with_key()).unwrap();
        let debug = format!("{engine:?}");
        assert!(!debug.contains("test-key"));
    }

    #[test]
    fn request_wire_format() {
        let request = GeminiGenerateRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: "hello".to_string(),
                }],
            }],
            safety_settings: SafetySetting::moderation_policy().to_vec(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(json["safetySettings"].as_array().unwrap().len(), 4);
        assert_eq!(
            json["safetySettings"][3]["category"],
            "HARM_CATEGORY_DANGEROUS_CONTENT"
        );
    }

    #[test]
    fn response_wire_format_parses() {
        let json = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "unblock"}]}, "finishReason": "STOP"}
            ],
            "usageMetadata": {"promptTokenCount": 100, "candidatesTokenCount": 1},
            "modelVersion": "gemini-2.5-flash"
        }"#;
        let response: GeminiGenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.candidates.len(), 1);
        assert_eq!(
            response.candidates[0].content.as_ref().unwrap().parts[0].text,
            "unblock"
        );
    }

    #[test]
    fn response_without_candidates_parses() {
        let response: GeminiGenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(response.candidates.is_empty());
    }
}
