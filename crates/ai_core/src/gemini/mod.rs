//! Gemini generation client
//!
//! Talks to the Google Generative Language REST API (`generateContent`).

mod client;

pub use client::GeminiGenerationEngine;
