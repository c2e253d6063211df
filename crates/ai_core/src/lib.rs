//! AI core for KidGuard
//!
//! Client for the external text-generation service (Gemini), exposed
//! through the [`GenerationEngine`] port so the application layer never
//! touches the wire format.

pub mod config;
pub mod error;
mod gemini;
pub mod ports;

pub use config::GenerationConfig;
pub use error::GenerationError;
pub use gemini::GeminiGenerationEngine;
pub use ports::{
    GenerationEngine, GenerationRequest, GenerationResponse, HarmBlockThreshold, HarmCategory,
    SafetySetting, TokenUsage,
};
