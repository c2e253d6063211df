//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `firestore`: audit store settings
//!
//! Generation settings live in `ai_core::GenerationConfig` and are embedded
//! here as a section.

mod firestore;
mod server;

use ai_core::GenerationConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub use firestore::FirestoreConfig;
pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Generation service configuration
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Firestore audit store configuration (optional)
    #[serde(default)]
    pub firestore: Option<FirestoreConfig>,
}

impl AppConfig {
    /// Load configuration from defaults, an optional `config.toml`, and the
    /// environment.
    ///
    /// Nested keys use the `KIDGUARD` prefix with `__` as separator
    /// (e.g. `KIDGUARD__SERVER__PORT`). The flat variables of the original
    /// deployment surface are honored as aliases afterwards:
    /// `GEMINI_API_KEY`, `PORT`, `FIRESTORE_PROJECT_ID`, `FIRESTORE_API_KEY`.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // Start with defaults
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default(
                "generation.base_url",
                "https://generativelanguage.googleapis.com",
            )?
            .set_default("generation.model", "gemini-2.5-flash")?
            // Load from file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables
            .add_source(
                config::Environment::with_prefix("KIDGUARD")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;
        config.apply_env_aliases();
        Ok(config)
    }

    /// Apply the flat environment variable aliases of the original
    /// deployment surface on top of whatever was loaded.
    fn apply_env_aliases(&mut self) {
        if let Ok(key) = std::env::var("GEMINI_API_KEY")
            && !key.trim().is_empty()
        {
            self.generation.api_key = Some(SecretString::from(key));
        }

        if let Ok(port) = std::env::var("PORT") {
            match port.parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(_) => warn!(value = %port, "Ignoring unparseable PORT"),
            }
        }

        let project_id = std::env::var("FIRESTORE_PROJECT_ID").ok();
        let api_key = std::env::var("FIRESTORE_API_KEY").ok();
        if project_id.is_some() || api_key.is_some() {
            let firestore = self.firestore.get_or_insert_with(FirestoreConfig::default);
            if let Some(project_id) = project_id {
                firestore.project_id = project_id;
            }
            if let Some(api_key) = api_key
                && !api_key.trim().is_empty()
            {
                firestore.api_key = Some(SecretString::from(api_key));
            }
        }
    }

    /// Validate the startup-critical parts of the configuration.
    ///
    /// The generation credential is mandatory: the service must not start
    /// serving moderation traffic without it. The Firestore section is
    /// optional by design and is not validated here.
    pub fn validate(&self) -> Result<(), String> {
        let has_key = self
            .generation
            .api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().trim().is_empty());

        if !has_key {
            return Err(
                "Generation API key missing: set GEMINI_API_KEY (or generation.api_key)"
                    .to_string(),
            );
        }
        Ok(())
    }

    /// The Firestore section, when present and fully configured
    pub fn firestore_if_configured(&self) -> Option<&FirestoreConfig> {
        self.firestore.as_ref().filter(|f| f.is_configured())
    }
}
