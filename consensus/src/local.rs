//! In-process validation host for development and tests.

use crate::{AcceptanceSpec, CallForm, HostError, UnitOfWork, ValidationHost};

/// Runs the unit of work on the current executor instead of a validator
/// network.
///
/// With replication enabled the unit is replayed and, under
/// [`CallForm::StrictEquality`], every replay must match the leader run
/// byte-for-byte. The non-comparative forms accept the leader result as-is:
/// judging free-text acceptance criteria is the validator network's job,
/// not this host's.
#[derive(Debug, Clone)]
pub struct LocalHost {
    replicas: u32,
}

impl LocalHost {
    /// Single-execution host.
    #[must_use]
    pub fn new() -> Self {
        Self { replicas: 1 }
    }

    /// Replay the unit `replicas` times per resolution (minimum 1).
    #[must_use]
    pub fn with_replication(replicas: u32) -> Self {
        Self {
            replicas: replicas.max(1),
        }
    }
}

impl Default for LocalHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationHost for LocalHost {
    async fn resolve<U: UnitOfWork>(
        &self,
        form: CallForm,
        unit: &U,
        _acceptance: AcceptanceSpec<'_>,
    ) -> Result<String, HostError> {
        let leader = unit.run().await?;

        for replica in 1..self.replicas {
            let echo = unit.run().await?;
            if form == CallForm::StrictEquality && echo != leader {
                tracing::warn!(replica, "strict-equality replay diverged from leader");
                return Err(HostError::Disagreement(format!(
                    "replica {replica} diverged from the leader run"
                )));
            }
        }

        tracing::debug!(form = form.as_str(), replicas = self.replicas, "local host reconciled");
        Ok(leader)
    }
}
