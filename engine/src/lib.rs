//! Settlement engine for Hoardkeep.
//!
//! # Architecture
//!
//! [`HoardContract`] orchestrates one claim request end to end:
//!
//! ```text
//! plea -> empty-hoard check -> render prompt -> ClaimEvaluation (oracle +
//! normalizer) -> validation host (replayed, reconciled) -> Decision ->
//! TreasuryLedger::settle -> ClaimOutcome
//! ```
//!
//! The oracle and the validation host are injected; the engine never
//! assumes how many times, or where, an evaluation executes. Every claim is
//! a single logical transaction against the ledger: the empty-hoard check,
//! the settle commit, and the outcome derivation happen under one `&mut
//! self` borrow, so no interleaved read-then-write is possible within a
//! process. Serializing requests across processes is the host environment's
//! responsibility.

mod ledger;
mod messages;
mod wire;

pub use ledger::TreasuryLedger;

pub use hoardkeep_types::{ClaimOutcome, HoardStats, Plea, PleaError};

use hoardkeep_consensus::{AcceptanceSpec, ResolveError, ValidationHost, resolve_decision};
use hoardkeep_oracle::{
    ClaimEvaluation, EVALUATION_CRITERIA, EVALUATION_TASK, Oracle, render_prompt,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// The validation host supports none of the known call shapes. The
    /// deployment is misconfigured; the transaction aborts without counting
    /// an attempt.
    #[error("decision validation is unavailable: {0}")]
    ValidationUnavailable(#[source] ResolveError),
}

/// The treasure-hoard contract: a settlement engine over an injected oracle
/// and validation host.
pub struct HoardContract<O, H> {
    oracle: O,
    host: H,
    ledger: TreasuryLedger,
}

impl<O: Oracle, H: ValidationHost> HoardContract<O, H> {
    /// Fresh contract with a full hoard and zeroed counters.
    pub fn new(oracle: O, host: H, initial_treasure: u64) -> Self {
        Self::from_ledger(oracle, host, TreasuryLedger::new(initial_treasure))
    }

    /// Resume from ledger state the host environment persisted.
    pub fn from_ledger(oracle: O, host: H, ledger: TreasuryLedger) -> Self {
        Self {
            oracle,
            host,
            ledger,
        }
    }

    #[must_use]
    pub fn ledger(&self) -> &TreasuryLedger {
        &self.ledger
    }

    #[must_use]
    pub fn stats(&self) -> HoardStats {
        self.ledger.stats()
    }

    #[must_use]
    pub fn treasure_count(&self) -> u64 {
        self.ledger.treasure_remaining()
    }

    /// Evaluate one plea and settle the outcome against the ledger.
    ///
    /// Terminal branches:
    /// - empty hoard: failure outcome, no attempt counted;
    /// - systemic validation failure: failure outcome, attempt counted;
    /// - denial: failure outcome with the decision's reasoning, attempt
    ///   counted;
    /// - grant: success outcome with the committed amount (floored at 1,
    ///   capped at 5 and at the remaining hoard), attempt and success
    ///   counted.
    ///
    /// Only an exhausted call-form probe returns `Err`; that aborts the
    /// transaction before any counter changes.
    pub async fn claim_treasure(&mut self, plea: &Plea) -> Result<ClaimOutcome, EngineError> {
        if self.ledger.is_empty() {
            tracing::info!("claim rejected, hoard is empty");
            return Ok(ClaimOutcome {
                success: false,
                message: messages::EMPTY_HOARD.to_string(),
                reasoning: messages::EMPTY_HOARD_REASONING.to_string(),
                amount: 0,
            });
        }

        let prompt = render_prompt(plea);
        let evaluation = ClaimEvaluation::new(&self.oracle, prompt);
        let acceptance = AcceptanceSpec {
            task: EVALUATION_TASK,
            criteria: EVALUATION_CRITERIA,
        };

        let decision = match resolve_decision(&self.host, &evaluation, acceptance).await {
            Ok(decision) => decision,
            Err(err @ ResolveError::NoSupportedCallForm) => {
                tracing::error!("validation host exposes no known call form");
                return Err(EngineError::ValidationUnavailable(err));
            }
            Err(err) => {
                tracing::warn!(error = %err, "decision validation failed, settling as confusion");
                self.ledger.settle(false, 0);
                return Ok(ClaimOutcome {
                    success: false,
                    message: messages::CONFUSED.to_string(),
                    reasoning: messages::CONFUSED_REASONING.to_string(),
                    amount: 0,
                });
            }
        };

        if decision.grant {
            let committed = self.ledger.settle(true, decision.amount);
            tracing::info!(
                committed,
                remaining = self.ledger.treasure_remaining(),
                "claim granted"
            );
            Ok(ClaimOutcome {
                success: true,
                message: messages::granted(committed),
                reasoning: decision.reasoning,
                amount: committed,
            })
        } else {
            self.ledger.settle(false, 0);
            tracing::info!("claim denied");
            Ok(ClaimOutcome {
                success: false,
                message: messages::DENIED.to_string(),
                reasoning: decision.reasoning,
                amount: 0,
            })
        }
    }
}
