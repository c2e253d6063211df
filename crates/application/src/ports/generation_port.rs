//! Generation port - Interface for the external text-generation service

use async_trait::async_trait;

use crate::error::ApplicationError;

/// Port for text-generation operations
#[async_trait]
pub trait GenerationPort: Send + Sync {
    /// Submit a prompt and return the raw textual reply
    async fn generate(&self, prompt: &str) -> Result<String, ApplicationError>;

    /// Get the name of the model behind this port
    fn model_name(&self) -> String;
}
