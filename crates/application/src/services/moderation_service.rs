//! Moderation service - classifies search queries through the generation
//! service
//!
//! The one hard invariant of the whole system lives here: classification
//! never fails open. Every non-nominal path (transport error, auth error,
//! quota, unexpected or empty reply) resolves to [`Verdict::Block`].

use std::{fmt, sync::Arc, time::Instant};

use domain::{SearchQuery, Verdict};
use tracing::{debug, error, instrument, warn};

use crate::ports::GenerationPort;

/// Service that classifies search queries into verdicts
pub struct ModerationService {
    generation: Arc<dyn GenerationPort>,
}

impl fmt::Debug for ModerationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModerationService")
            .field("model", &self.generation.model_name())
            .finish_non_exhaustive()
    }
}

/// Build the fixed classification prompt for a query.
///
/// The query is embedded verbatim inside quotes; the category definitions,
/// worked examples, and the single-word output instruction are part of the
/// contract with the model and must stay stable.
fn classification_prompt(query: &SearchQuery) -> String {
    format!(
        r#"You are a child-safe search query filter.

Query: "{query}"

Classify into EXACTLY one category:
- "selfharm" → only for clear suicide, self-injury, or harmful depression intent
- "block" → adult content, violence, hate, weapons, illegal drugs, gambling
- "unblock" → everything else (fun videos, animals, games, stores, education, etc.)

Examples:
"cute cats" → unblock
"funny video" → unblock
"drug store near me" → unblock
"kill tony podcast" → unblock
"how to make drugs" → block
"porn videos" → block
"i want to die" → selfharm

Return ONLY the word: unblock, block, or selfharm
No extra text.
"#
    )
}

impl ModerationService {
    /// Create a new moderation service
    pub fn new(generation: Arc<dyn GenerationPort>) -> Self {
        Self { generation }
    }

    /// Classify a query into a verdict.
    ///
    /// Infallible by contract: the return value is always a member of the
    /// closed verdict set, and any upstream failure or unrecognized reply
    /// resolves to the restrictive default.
    #[instrument(skip(self, query), fields(query_len = query.as_str().len()))]
    pub async fn classify(&self, query: &SearchQuery) -> Verdict {
        let start = Instant::now();
        let prompt = classification_prompt(query);

        let reply = match self.generation.generate(&prompt).await {
            Ok(reply) => reply,
            Err(e) => {
                error!(error = %e, "Generation call failed, defaulting to block");
                return Verdict::fallback();
            }
        };

        #[allow(clippy::cast_possible_truncation)]
        let latency_ms = start.elapsed().as_millis() as u64;

        match Verdict::from_model_reply(&reply) {
            Some(verdict) => {
                debug!(verdict = %verdict, latency_ms, "Query classified");
                verdict
            }
            None => {
                warn!(reply = %reply, latency_ms, "Unexpected model reply, defaulting to block");
                Verdict::fallback()
            }
        }
    }

    /// Name of the model behind this service
    pub fn model_name(&self) -> String {
        self.generation.model_name()
    }
}
