//! Gemini generation adapter - Implements GenerationPort using ai_core

use ai_core::{GeminiGenerationEngine, GenerationConfig, GenerationEngine, GenerationRequest};
use application::{error::ApplicationError, ports::GenerationPort};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Adapter for the Gemini generation service
#[derive(Debug)]
pub struct GeminiGenerationAdapter {
    engine: GeminiGenerationEngine,
}

impl GeminiGenerationAdapter {
    /// Create a new adapter with the given configuration
    pub fn new(config: GenerationConfig) -> Result<Self, ApplicationError> {
        let engine = GeminiGenerationEngine::new(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self { engine })
    }

    /// Convert ai_core error to application error
    fn map_error(e: ai_core::GenerationError) -> ApplicationError {
        match e {
            ai_core::GenerationError::ConnectionFailed(msg) => {
                ApplicationError::ExternalService(format!("Gemini connection failed: {msg}"))
            }
            ai_core::GenerationError::Timeout(ms) => {
                ApplicationError::ExternalService(format!("Generation timeout after {ms}ms"))
            }
            other => ApplicationError::Generation(other.to_string()),
        }
    }
}

#[async_trait]
impl GenerationPort for GeminiGenerationAdapter {
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> Result<String, ApplicationError> {
        let response = self
            .engine
            .generate(GenerationRequest::new(prompt))
            .await
            .map_err(Self::map_error)?;

        debug!(
            model = %response.model,
            tokens = ?response.usage.as_ref().map(|u| u.total_tokens),
            "Generation completed"
        );

        Ok(response.content)
    }

    fn model_name(&self) -> String {
        self.engine.model_name().to_string()
    }
}
