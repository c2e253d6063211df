//! Infrastructure layer - Adapters for external systems
//!
//! Implements the ports defined in the application layer: the Gemini
//! generation adapter and the Firestore audit store, plus configuration
//! loading.

pub mod adapters;
pub mod config;

pub use adapters::{FirestoreAuditStore, GeminiGenerationAdapter};
pub use config::{AppConfig, FirestoreConfig, ServerConfig};
