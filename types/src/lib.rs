//! Core domain types for Hoardkeep.
//!
//! This crate contains pure domain types with no IO, no async, and minimal
//! dependencies: validated pleas, canonical grant decisions, and the outward
//! claim records. Everything here can be used from any layer of the
//! workspace.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest number of treasure units a single decision may award.
pub const MAX_GRANT: u64 = 5;

/// Canonical cap on decision reasoning, in characters.
pub const MAX_REASONING_CHARS: usize = 200;

/// Longest plea accepted for evaluation, in characters.
pub const MAX_PLEA_CHARS: usize = 500;

/// Reasoning substituted when the oracle's judgment omits one.
pub const DEFAULT_REASONING: &str = "The dragon considered your plea.";

/// Reasoning attached to the fallback decision for unintelligible output.
pub const FALLBACK_REASONING: &str = "The dragon could not understand your plea.";

// ============================================================================
// Plea
// ============================================================================

/// An adventurer's plea, validated before any evaluation happens.
///
/// Guaranteed non-empty (after trimming) and at most [`MAX_PLEA_CHARS`]
/// characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Plea(String);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PleaError {
    #[error("Your plea cannot be empty")]
    Empty,
    #[error("Your plea is too long (max {MAX_PLEA_CHARS} characters)")]
    TooLong,
}

impl Plea {
    pub fn new(value: impl Into<String>) -> Result<Self, PleaError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(PleaError::Empty);
        }
        if value.chars().count() > MAX_PLEA_CHARS {
            return Err(PleaError::TooLong);
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Plea {
    type Error = PleaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Plea {
    type Error = PleaError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Plea> for String {
    fn from(value: Plea) -> Self {
        value.0
    }
}

impl AsRef<str> for Plea {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

// ============================================================================
// Decision
// ============================================================================

/// Canonical grant/deny judgment derived from oracle output.
///
/// Field declaration order is the canonical key order of the wire encoding
/// (`amount`, `give_treasure`, `reasoning`); independent executions must
/// serialize identically to be reconcilable by the validation host.
///
/// Missing fields take schema defaults when deserializing the host's
/// reconciled result; type mismatches are a parse error the caller handles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    #[serde(default)]
    pub amount: u64,
    #[serde(default, rename = "give_treasure")]
    pub grant: bool,
    #[serde(default = "Decision::default_reasoning")]
    pub reasoning: String,
}

impl Decision {
    /// The deterministic decision every unintelligible oracle reply maps to.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            amount: 0,
            grant: false,
            reasoning: FALLBACK_REASONING.to_string(),
        }
    }

    fn default_reasoning() -> String {
        DEFAULT_REASONING.to_string()
    }

    /// Canonical JSON encoding with stable key order.
    #[must_use]
    pub fn canonical_json(&self) -> String {
        serde_json::to_string(self).expect("decision serializes to JSON")
    }
}

// ============================================================================
// Outward records
// ============================================================================

/// Result record returned to the caller of a claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimOutcome {
    pub success: bool,
    pub message: String,
    pub reasoning: String,
    pub amount: u64,
}

/// Read-only snapshot of the treasury ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoardStats {
    pub treasure_remaining: u64,
    pub total_attempts: u64,
    pub successful_claims: u64,
}

// ============================================================================
// Helpers
// ============================================================================

/// Truncate to at most `max_chars` characters on a character boundary.
#[must_use]
pub fn truncate_chars(value: &str, max_chars: usize) -> String {
    match value.char_indices().nth(max_chars) {
        Some((idx, _)) => value[..idx].to_string(),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{Decision, MAX_PLEA_CHARS, Plea, PleaError, truncate_chars};

    #[test]
    fn plea_rejects_empty_input() {
        assert_eq!(Plea::new(""), Err(PleaError::Empty));
        assert_eq!(Plea::new("   \t "), Err(PleaError::Empty));
    }

    #[test]
    fn plea_rejects_oversized_input() {
        let long = "a".repeat(MAX_PLEA_CHARS + 1);
        assert_eq!(Plea::new(long), Err(PleaError::TooLong));
    }

    #[test]
    fn plea_accepts_boundary_length() {
        let plea = Plea::new("a".repeat(MAX_PLEA_CHARS));
        assert!(plea.is_ok());
    }

    #[test]
    fn plea_counts_characters_not_bytes() {
        // 500 three-byte characters are within the limit
        let plea = Plea::new("仙".repeat(MAX_PLEA_CHARS));
        assert!(plea.is_ok());
    }

    #[test]
    fn decision_serializes_with_canonical_key_order() {
        let decision = Decision {
            amount: 3,
            grant: true,
            reasoning: "clever riddle".to_string(),
        };
        assert_eq!(
            decision.canonical_json(),
            r#"{"amount":3,"give_treasure":true,"reasoning":"clever riddle"}"#
        );
    }

    #[test]
    fn decision_deserializes_missing_fields_to_defaults() {
        let decision: Decision = serde_json::from_str("{}").expect("empty object parses");
        assert!(!decision.grant);
        assert_eq!(decision.amount, 0);
        assert_eq!(decision.reasoning, super::DEFAULT_REASONING);
    }

    #[test]
    fn decision_rejects_type_mismatch() {
        let result = serde_json::from_str::<Decision>(r#"{"amount":"lots"}"#);
        assert!(result.is_err());
    }

    mod truncation {
        use super::truncate_chars;

        #[test]
        fn short_strings_pass_through() {
            assert_eq!(truncate_chars("hello", 200), "hello");
        }

        #[test]
        fn truncates_at_exact_count() {
            assert_eq!(truncate_chars("abcdef", 3), "abc");
        }

        #[test]
        fn respects_multibyte_boundaries() {
            assert_eq!(truncate_chars("日本語テスト", 3), "日本語");
        }

        #[test]
        fn empty_input_stays_empty() {
            assert_eq!(truncate_chars("", 5), "");
        }
    }
}
