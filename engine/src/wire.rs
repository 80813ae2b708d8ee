//! Text-record surface mirroring the deployed contract interface.
//!
//! External callers exchange JSON records, not Rust types. Plea validation
//! happens here, before any counter is touched; fatal configuration errors
//! propagate to the host instead of being folded into a record.

use hoardkeep_consensus::ValidationHost;
use hoardkeep_oracle::Oracle;
use hoardkeep_types::{ClaimOutcome, Plea};
use serde::Serialize;

use crate::{EngineError, HoardContract, messages};

impl<O: Oracle, H: ValidationHost> HoardContract<O, H> {
    /// Validate, settle, and serialize one claim as a JSON record.
    ///
    /// An invalid plea produces a `success=false` record without touching
    /// the ledger.
    pub async fn claim_treasure_record(&mut self, plea: &str) -> Result<String, EngineError> {
        let outcome = match Plea::new(plea) {
            Ok(plea) => self.claim_treasure(&plea).await?,
            Err(err) => {
                tracing::info!(error = %err, "plea rejected before evaluation");
                ClaimOutcome {
                    success: false,
                    message: err.to_string(),
                    reasoning: messages::INVALID_PLEA_REASONING.to_string(),
                    amount: 0,
                }
            }
        };
        Ok(to_record(&outcome))
    }

    /// Serialized ledger snapshot.
    #[must_use]
    pub fn stats_record(&self) -> String {
        to_record(&self.stats())
    }
}

fn to_record<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).expect("records serialize to JSON")
}

#[cfg(test)]
mod tests {
    use crate::HoardContract;
    use hoardkeep_consensus::LocalHost;
    use hoardkeep_oracle::ScriptedOracle;

    #[tokio::test]
    async fn claim_record_uses_the_contract_field_names() {
        let oracle = ScriptedOracle::new([
            r#"{"give_treasure": true, "amount": 2, "reasoning": "a fine song"}"#,
        ]);
        let mut contract = HoardContract::new(oracle, LocalHost::new(), 100);

        let record = contract
            .claim_treasure_record("a song of embers")
            .await
            .expect("claim settles");
        let parsed: serde_json::Value = serde_json::from_str(&record).expect("record is JSON");
        assert_eq!(parsed["success"], true);
        assert_eq!(parsed["amount"], 2);
        assert!(parsed["message"].as_str().expect("message").contains("2 treasure"));
        assert_eq!(parsed["reasoning"], "a fine song");
    }

    #[tokio::test]
    async fn empty_plea_is_rejected_without_counting() {
        let oracle = ScriptedOracle::new(Vec::<String>::new());
        let mut contract = HoardContract::new(oracle, LocalHost::new(), 100);

        let record = contract
            .claim_treasure_record("   ")
            .await
            .expect("rejection is a record");
        let parsed: serde_json::Value = serde_json::from_str(&record).expect("record is JSON");
        assert_eq!(parsed["success"], false);
        assert_eq!(parsed["message"], "Your plea cannot be empty");
        assert_eq!(contract.stats().total_attempts, 0);
    }

    #[tokio::test]
    async fn oversized_plea_is_rejected_without_counting() {
        let oracle = ScriptedOracle::new(Vec::<String>::new());
        let mut contract = HoardContract::new(oracle, LocalHost::new(), 100);

        let record = contract
            .claim_treasure_record(&"a".repeat(501))
            .await
            .expect("rejection is a record");
        let parsed: serde_json::Value = serde_json::from_str(&record).expect("record is JSON");
        assert_eq!(parsed["success"], false);
        assert_eq!(contract.stats().total_attempts, 0);
    }

    #[tokio::test]
    async fn stats_record_uses_the_contract_field_names() {
        let oracle = ScriptedOracle::new(Vec::<String>::new());
        let contract = HoardContract::new(oracle, LocalHost::new(), 100);

        let parsed: serde_json::Value =
            serde_json::from_str(&contract.stats_record()).expect("record is JSON");
        assert_eq!(parsed["treasure_remaining"], 100);
        assert_eq!(parsed["total_attempts"], 0);
        assert_eq!(parsed["successful_claims"], 0);
    }
}
