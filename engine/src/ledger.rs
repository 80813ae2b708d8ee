//! The treasury ledger: a single-writer resource pool.

use hoardkeep_types::{HoardStats, MAX_GRANT};
use serde::{Deserialize, Serialize};

/// Three-counter ledger for the treasure hoard.
///
/// [`TreasuryLedger::settle`] is the sole mutator and updates every field in
/// one commit step; taking `&mut self` makes interleaved read-then-write
/// impossible within a process. The struct is serde-serializable so the host
/// environment can persist it across calls.
///
/// Invariants for every reachable state: `successful_claims <=
/// total_attempts`, and `treasure_remaining` never increases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreasuryLedger {
    treasure_remaining: u64,
    total_attempts: u64,
    successful_claims: u64,
}

impl TreasuryLedger {
    #[must_use]
    pub fn new(initial_treasure: u64) -> Self {
        Self {
            treasure_remaining: initial_treasure,
            total_attempts: 0,
            successful_claims: 0,
        }
    }

    #[must_use]
    pub fn treasure_remaining(&self) -> u64 {
        self.treasure_remaining
    }

    #[must_use]
    pub fn total_attempts(&self) -> u64 {
        self.total_attempts
    }

    #[must_use]
    pub fn successful_claims(&self) -> u64 {
        self.successful_claims
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.treasure_remaining == 0
    }

    #[must_use]
    pub fn stats(&self) -> HoardStats {
        HoardStats {
            treasure_remaining: self.treasure_remaining,
            total_attempts: self.total_attempts,
            successful_claims: self.successful_claims,
        }
    }

    /// Commit one evaluated claim and return the committed amount.
    ///
    /// Counts the attempt; denials commit 0. A grant raises the requested
    /// amount to at least 1, caps it at [`MAX_GRANT`], caps it again at the
    /// remaining hoard (floor-then-cap is required policy), then debits the
    /// hoard and counts the success. Callers must check [`Self::is_empty`]
    /// before settling a grant; with a non-empty hoard the committed amount
    /// is always at least 1.
    pub(crate) fn settle(&mut self, grant: bool, requested: u64) -> u64 {
        self.total_attempts += 1;
        if !grant {
            return 0;
        }

        let committed = requested.clamp(1, MAX_GRANT).min(self.treasure_remaining);
        debug_assert!(committed >= 1, "grants settle against a non-empty hoard");
        self.treasure_remaining -= committed;
        self.successful_claims += 1;
        committed
    }
}
