//! The replayable unit of work for one claim evaluation.

use hoardkeep_consensus::{UnitOfWork, UnitOfWorkError};

use crate::{Oracle, normalize};

/// One claim evaluation, packaged for the validation host.
///
/// Closes over a borrowed oracle and a fully rendered prompt. Each run is
/// exactly one oracle invocation whose raw output is normalized and encoded
/// canonically; the adapter reads and writes no shared state, so all
/// nondeterminism is confined to the oracle call itself.
pub struct ClaimEvaluation<'a, O> {
    oracle: &'a O,
    prompt: String,
}

impl<'a, O: Oracle> ClaimEvaluation<'a, O> {
    pub fn new(oracle: &'a O, prompt: String) -> Self {
        Self { oracle, prompt }
    }
}

impl<O: Oracle> UnitOfWork for ClaimEvaluation<'_, O> {
    async fn run(&self) -> Result<String, UnitOfWorkError> {
        let raw = self
            .oracle
            .evaluate(&self.prompt)
            .await
            .map_err(|e| UnitOfWorkError::new(e.to_string()))?;
        tracing::debug!(reply_bytes = raw.len(), "oracle replied");
        Ok(normalize(&raw).canonical_json())
    }
}

#[cfg(test)]
mod tests {
    use super::ClaimEvaluation;
    use crate::ScriptedOracle;
    use hoardkeep_consensus::UnitOfWork;

    #[tokio::test]
    async fn run_normalizes_and_encodes_canonically() {
        let oracle = ScriptedOracle::new([
            "```json\n{\"give_treasure\": true, \"amount\": 9, \"reasoning\": \"generous\"}\n```",
        ]);
        let unit = ClaimEvaluation::new(&oracle, "prompt".to_string());

        let result = unit.run().await.expect("runs");
        assert_eq!(
            result,
            r#"{"amount":5,"give_treasure":true,"reasoning":"generous"}"#
        );
    }

    #[tokio::test]
    async fn malformed_reply_encodes_the_fallback() {
        let oracle = ScriptedOracle::new(["no json here"]);
        let unit = ClaimEvaluation::new(&oracle, "prompt".to_string());

        let result = unit.run().await.expect("runs");
        assert_eq!(
            result,
            serde_json::to_string(&hoardkeep_types::Decision::fallback()).expect("serializes")
        );
    }

    #[tokio::test]
    async fn oracle_failure_fails_the_unit() {
        let oracle = ScriptedOracle::new(Vec::<String>::new());
        let unit = ClaimEvaluation::new(&oracle, "prompt".to_string());

        assert!(unit.run().await.is_err());
    }
}
