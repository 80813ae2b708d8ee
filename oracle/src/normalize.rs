//! Reduction of raw oracle text to a canonical decision.

use hoardkeep_types::{
    DEFAULT_REASONING, Decision, MAX_GRANT, MAX_REASONING_CHARS, truncate_chars,
};
use serde_json::Value;

/// Reduce raw oracle output to a canonical [`Decision`].
///
/// Total: every input maps to a well-formed decision, and identical inputs
/// always yield identical decisions. Malformed structure, a non-object
/// payload, or an uncoercible `amount` all collapse to
/// [`Decision::fallback`]; individually missing fields take defaults.
#[must_use]
pub fn normalize(raw: &str) -> Decision {
    let cleaned = strip_fences(raw);

    let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(&cleaned) else {
        return Decision::fallback();
    };

    let amount = match fields.get("amount") {
        None => 0,
        Some(value) => match coerce_amount(value) {
            Some(n) => n.clamp(0, MAX_GRANT as i64) as u64,
            None => return Decision::fallback(),
        },
    };

    let grant = fields.get("give_treasure").is_some_and(truthy);

    let reasoning = match fields.get("reasoning") {
        None | Some(Value::Null) => DEFAULT_REASONING.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };

    Decision {
        amount,
        grant,
        reasoning: truncate_chars(&reasoning, MAX_REASONING_CHARS),
    }
}

/// Trim and drop markdown code-fence markers the oracle commonly wraps its
/// reply in.
fn strip_fences(raw: &str) -> String {
    raw.trim()
        .replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Integer coercion: booleans count as 0/1, numbers truncate toward zero,
/// numeric strings parse. Anything else is uncoercible.
fn coerce_amount(value: &Value) -> Option<i64> {
    match value {
        Value::Bool(b) => Some(i64::from(*b)),
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// JSON truthiness: null, false, 0, and empty strings/arrays/objects are
/// false; everything else is true.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::normalize;
    use hoardkeep_types::{DEFAULT_REASONING, Decision, FALLBACK_REASONING, MAX_REASONING_CHARS};

    #[test]
    fn well_formed_reply_passes_through() {
        let decision =
            normalize(r#"{"give_treasure": true, "amount": 3, "reasoning": "clever riddle"}"#);
        assert_eq!(
            decision,
            Decision {
                amount: 3,
                grant: true,
                reasoning: "clever riddle".to_string(),
            }
        );
    }

    #[test]
    fn markdown_fences_are_stripped() {
        let decision = normalize(
            "```json\n{\"give_treasure\": true, \"amount\": 2, \"reasoning\": \"fine\"}\n```",
        );
        assert!(decision.grant);
        assert_eq!(decision.amount, 2);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let decision = normalize("  \n {\"give_treasure\": false, \"amount\": 0} \n ");
        assert!(!decision.grant);
    }

    #[test]
    fn free_text_falls_back() {
        let decision = normalize("I refuse to answer");
        assert_eq!(decision, Decision::fallback());
        assert_eq!(decision.reasoning, FALLBACK_REASONING);
    }

    #[test]
    fn fallback_is_idempotent() {
        assert_eq!(normalize("I refuse to answer"), normalize("I refuse to answer"));
    }

    #[test]
    fn non_object_payload_falls_back() {
        assert_eq!(normalize("[1, 2, 3]"), Decision::fallback());
        assert_eq!(normalize("\"just a string\""), Decision::fallback());
        assert_eq!(normalize("42"), Decision::fallback());
    }

    #[test]
    fn empty_input_falls_back() {
        assert_eq!(normalize(""), Decision::fallback());
    }

    mod amount_coercion {
        use super::normalize;
        use hoardkeep_types::Decision;

        #[test]
        fn clamps_above_five() {
            assert_eq!(normalize(r#"{"amount": 50}"#).amount, 5);
        }

        #[test]
        fn clamps_below_zero() {
            assert_eq!(normalize(r#"{"amount": -3}"#).amount, 0);
        }

        #[test]
        fn missing_amount_defaults_to_zero() {
            assert_eq!(normalize(r#"{"give_treasure": true}"#).amount, 0);
        }

        #[test]
        fn numeric_string_parses() {
            assert_eq!(normalize(r#"{"amount": "4"}"#).amount, 4);
        }

        #[test]
        fn float_truncates_toward_zero() {
            assert_eq!(normalize(r#"{"amount": 3.9}"#).amount, 3);
        }

        #[test]
        fn boolean_counts_as_one() {
            assert_eq!(normalize(r#"{"amount": true}"#).amount, 1);
        }

        #[test]
        fn non_numeric_amount_fails_the_whole_reply() {
            assert_eq!(normalize(r#"{"amount": "lots", "give_treasure": true}"#), Decision::fallback());
            assert_eq!(normalize(r#"{"amount": null}"#), Decision::fallback());
            assert_eq!(normalize(r#"{"amount": [5]}"#), Decision::fallback());
        }
    }

    mod grant_coercion {
        use super::normalize;

        #[test]
        fn missing_grant_defaults_to_false() {
            assert!(!normalize(r#"{"amount": 3}"#).grant);
        }

        #[test]
        fn truthy_values_grant() {
            assert!(normalize(r#"{"give_treasure": true}"#).grant);
            assert!(normalize(r#"{"give_treasure": 1}"#).grant);
            assert!(normalize(r#"{"give_treasure": "yes"}"#).grant);
        }

        #[test]
        fn falsy_values_deny() {
            assert!(!normalize(r#"{"give_treasure": false}"#).grant);
            assert!(!normalize(r#"{"give_treasure": 0}"#).grant);
            assert!(!normalize(r#"{"give_treasure": ""}"#).grant);
            assert!(!normalize(r#"{"give_treasure": null}"#).grant);
            assert!(!normalize(r#"{"give_treasure": []}"#).grant);
        }
    }

    mod reasoning_coercion {
        use super::{DEFAULT_REASONING, MAX_REASONING_CHARS, normalize};

        #[test]
        fn missing_reasoning_takes_default() {
            assert_eq!(normalize(r#"{"amount": 1}"#).reasoning, DEFAULT_REASONING);
        }

        #[test]
        fn null_reasoning_takes_default() {
            assert_eq!(normalize(r#"{"reasoning": null}"#).reasoning, DEFAULT_REASONING);
        }

        #[test]
        fn long_reasoning_is_truncated() {
            let long = "x".repeat(MAX_REASONING_CHARS + 50);
            let decision = normalize(&format!(r#"{{"reasoning": "{long}"}}"#));
            assert_eq!(decision.reasoning.chars().count(), MAX_REASONING_CHARS);
        }

        #[test]
        fn non_string_reasoning_is_rendered_as_json() {
            let decision = normalize(r#"{"reasoning": 7}"#);
            assert_eq!(decision.reasoning, "7");
        }
    }

    #[test]
    fn canonical_encoding_is_stable_across_runs() {
        let a = normalize(r#"{"reasoning": "bold", "amount": 2, "give_treasure": true}"#);
        let b = normalize(r#"{"give_treasure": true, "amount": 2, "reasoning": "bold"}"#);
        assert_eq!(a.canonical_json(), b.canonical_json());
    }
}
