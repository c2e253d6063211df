//! Moderation verdict value object
//!
//! The verdict set is closed: every classification, including every failure
//! path upstream of it, must resolve to exactly one of these three values.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Outcome of classifying a search query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// Safe for a child to see
    Unblock,
    /// Adult content, violence, hate, weapons, illegal drugs, gambling
    Block,
    /// Clear suicide, self-injury, or harmful depression intent
    Selfharm,
}

impl Verdict {
    /// The restrictive default applied whenever classification cannot be
    /// trusted (upstream error, unexpected reply, empty reply).
    pub const fn fallback() -> Self {
        Self::Block
    }

    /// Interpret a raw model reply as a verdict.
    ///
    /// Normalizes with trim + ASCII lowercase, then requires an exact match
    /// against one of the three words. Substring matching is deliberately
    /// not performed: a verbose reply that merely contains "unblock" must
    /// not unblock anything.
    pub fn from_model_reply(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "unblock" => Some(Self::Unblock),
            "block" => Some(Self::Block),
            "selfharm" => Some(Self::Selfharm),
            _ => None,
        }
    }

    /// The wire representation of this verdict
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unblock => "unblock",
            Self::Block => "block",
            Self::Selfharm => "selfharm",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Verdict {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_model_reply(s).ok_or_else(|| DomainError::InvalidVerdict(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn exact_words_parse() {
        assert_eq!(Verdict::from_model_reply("unblock"), Some(Verdict::Unblock));
        assert_eq!(Verdict::from_model_reply("block"), Some(Verdict::Block));
        assert_eq!(
            Verdict::from_model_reply("selfharm"),
            Some(Verdict::Selfharm)
        );
    }

    #[test]
    fn casing_and_whitespace_are_normalized() {
        assert_eq!(
            Verdict::from_model_reply("  UNBLOCK \n"),
            Some(Verdict::Unblock)
        );
        assert_eq!(Verdict::from_model_reply("Block"), Some(Verdict::Block));
        assert_eq!(
            Verdict::from_model_reply("\tSelfHarm "),
            Some(Verdict::Selfharm)
        );
    }

    #[test]
    fn verbose_replies_do_not_parse() {
        // No substring matching: these must all be rejected.
        assert_eq!(Verdict::from_model_reply("I would say: unblock"), None);
        assert_eq!(Verdict::from_model_reply("unblock."), None);
        assert_eq!(Verdict::from_model_reply("blocked"), None);
        assert_eq!(Verdict::from_model_reply("un block"), None);
    }

    #[test]
    fn empty_and_garbage_do_not_parse() {
        assert_eq!(Verdict::from_model_reply(""), None);
        assert_eq!(Verdict::from_model_reply("   "), None);
        assert_eq!(Verdict::from_model_reply("yes"), None);
    }

    #[test]
    fn fallback_is_block() {
        assert_eq!(Verdict::fallback(), Verdict::Block);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Verdict::Selfharm).unwrap(),
            r#""selfharm""#
        );
        assert_eq!(
            serde_json::from_str::<Verdict>(r#""unblock""#).unwrap(),
            Verdict::Unblock
        );
    }

    #[test]
    fn from_str_reports_offending_input() {
        let err = "gibberish".parse::<Verdict>().unwrap_err();
        assert!(err.to_string().contains("gibberish"));
    }

    proptest! {
        #[test]
        fn parse_is_total_and_closed(input in ".*") {
            // Either rejected, or one of exactly three values.
            if let Some(v) = Verdict::from_model_reply(&input) {
                prop_assert!(matches!(
                    v,
                    Verdict::Unblock | Verdict::Block | Verdict::Selfharm
                ));
            }
        }

        #[test]
        fn as_str_round_trips(v in prop_oneof![
            Just(Verdict::Unblock),
            Just(Verdict::Block),
            Just(Verdict::Selfharm),
        ]) {
            prop_assert_eq!(Verdict::from_model_reply(v.as_str()), Some(v));
        }
    }
}
