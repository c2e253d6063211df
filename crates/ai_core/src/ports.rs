//! Port definitions for the generation service
//!
//! Defines the trait (port) that generation clients must implement, plus
//! the request/response types shared with adapters.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

/// Harm category of the generation service's content filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HarmCategory {
    #[serde(rename = "HARM_CATEGORY_HARASSMENT")]
    Harassment,
    #[serde(rename = "HARM_CATEGORY_HATE_SPEECH")]
    HateSpeech,
    #[serde(rename = "HARM_CATEGORY_SEXUALLY_EXPLICIT")]
    SexuallyExplicit,
    #[serde(rename = "HARM_CATEGORY_DANGEROUS_CONTENT")]
    DangerousContent,
}

/// Blocking threshold for a harm category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HarmBlockThreshold {
    #[serde(rename = "BLOCK_NONE")]
    BlockNone,
    #[serde(rename = "BLOCK_ONLY_HIGH")]
    BlockOnlyHigh,
    #[serde(rename = "BLOCK_MEDIUM_AND_ABOVE")]
    BlockMediumAndAbove,
    #[serde(rename = "BLOCK_LOW_AND_ABOVE")]
    BlockLowAndAbove,
}

/// One harm-category filter setting on an outbound request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetySetting {
    pub category: HarmCategory,
    pub threshold: HarmBlockThreshold,
}

impl SafetySetting {
    pub const fn new(category: HarmCategory, threshold: HarmBlockThreshold) -> Self {
        Self {
            category,
            threshold,
        }
    }

    /// Filter policy for moderation prompts.
    ///
    /// The classifier has to read and categorize unsafe text, so the
    /// service-side filters are opened up except for a high-threshold
    /// filter on dangerous content.
    pub const fn moderation_policy() -> [Self; 4] {
        [
            Self::new(HarmCategory::Harassment, HarmBlockThreshold::BlockNone),
            Self::new(HarmCategory::HateSpeech, HarmBlockThreshold::BlockNone),
            Self::new(
                HarmCategory::SexuallyExplicit,
                HarmBlockThreshold::BlockNone,
            ),
            Self::new(
                HarmCategory::DangerousContent,
                HarmBlockThreshold::BlockOnlyHigh,
            ),
        ]
    }
}

/// Request for text generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// The prompt to submit
    pub prompt: String,
    /// Safety filter settings applied on the service side
    #[serde(default)]
    pub safety_settings: Vec<SafetySetting>,
}

impl GenerationRequest {
    /// Create a request with the moderation safety policy
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            safety_settings: SafetySetting::moderation_policy().to_vec(),
        }
    }

    /// Replace the safety settings
    #[must_use]
    pub fn with_safety_settings(mut self, settings: Vec<SafetySetting>) -> Self {
        self.safety_settings = settings;
        self
    }
}

/// Response from the generation service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Generated text
    pub content: String,
    /// Model that produced the response
    pub model: String,
    /// Token usage statistics, when reported
    pub usage: Option<TokenUsage>,
    /// Finish reason, when reported
    pub finish_reason: Option<String>,
}

/// Token usage statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Port for generation client implementations
#[async_trait]
pub trait GenerationEngine: Send + Sync {
    /// Submit a prompt and return the complete reply
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError>;

    /// Get the configured model name
    fn model_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_moderation_policy_by_default() {
        let req = GenerationRequest::new("classify this");
        assert_eq!(req.prompt, "classify this");
        assert_eq!(req.safety_settings.len(), 4);
    }

    #[test]
    fn moderation_policy_keeps_dangerous_content_filter() {
        let policy = SafetySetting::moderation_policy();
        let dangerous = policy
            .iter()
            .find(|s| s.category == HarmCategory::DangerousContent)
            .unwrap();
        assert_eq!(dangerous.threshold, HarmBlockThreshold::BlockOnlyHigh);

        for setting in policy
            .iter()
            .filter(|s| s.category != HarmCategory::DangerousContent)
        {
            assert_eq!(setting.threshold, HarmBlockThreshold::BlockNone);
        }
    }

    #[test]
    fn with_safety_settings_replaces_policy() {
        let req = GenerationRequest::new("x").with_safety_settings(vec![]);
        assert!(req.safety_settings.is_empty());
    }

    #[test]
    fn safety_setting_serializes_in_wire_format() {
        let setting = SafetySetting::new(HarmCategory::Harassment, HarmBlockThreshold::BlockNone);
        let json = serde_json::to_string(&setting).unwrap();
        assert!(json.contains("HARM_CATEGORY_HARASSMENT"));
        assert!(json.contains("BLOCK_NONE"));
    }

    #[test]
    fn dangerous_content_serializes_in_wire_format() {
        let setting = SafetySetting::new(
            HarmCategory::DangerousContent,
            HarmBlockThreshold::BlockOnlyHigh,
        );
        let json = serde_json::to_string(&setting).unwrap();
        assert!(json.contains("HARM_CATEGORY_DANGEROUS_CONTENT"));
        assert!(json.contains("BLOCK_ONLY_HIGH"));
    }

    #[test]
    fn generation_response_creation() {
        let resp = GenerationResponse {
            content: "unblock".to_string(),
            model: "gemini-2.5-flash".to_string(),
            usage: None,
            finish_reason: Some("STOP".to_string()),
        };
        assert_eq!(resp.content, "unblock");
        assert_eq!(resp.model, "gemini-2.5-flash");
    }

    #[test]
    fn token_usage_serialization() {
        let usage = TokenUsage {
            prompt_tokens: 120,
            completion_tokens: 1,
            total_tokens: 121,
        };
        let json = serde_json::to_string(&usage).unwrap();
        assert!(json.contains("prompt_tokens"));
        assert!(json.contains("121"));
    }
}
