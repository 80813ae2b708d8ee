//! Call-shape probing and decision parsing.

use hoardkeep_types::Decision;
use thiserror::Error;

use crate::{AcceptanceSpec, CallForm, HostError, UnitOfWork, ValidationHost};

/// Why no canonical decision was obtained.
///
/// [`ResolveError::NoSupportedCallForm`] is implementation-fatal: a
/// correctly configured deployment always exposes at least one known call
/// shape, so callers abort rather than count an attempt. Every other
/// variant is a systemic failure the caller converts into a user-visible
/// failure outcome.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("validation host supports none of the known call forms")]
    NoSupportedCallForm,
    #[error("decision validation failed: {0}")]
    Validation(#[source] HostError),
    #[error("validation host returned an unparsable decision: {0}")]
    UnparsableDecision(#[source] serde_json::Error),
}

impl ResolveError {
    /// True for errors that indicate a misconfigured deployment rather than
    /// a failed evaluation.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, ResolveError::NoSupportedCallForm)
    }
}

/// Drive a unit of work through the validation host and return the one
/// reconciled decision.
///
/// Call shapes are probed in [`CallForm::CANDIDATES`] order; an
/// [`HostError::UnsupportedForm`] reply advances to the next candidate and
/// the first supported form wins. The host's canonical result is parsed
/// with schema defaults for missing fields; output that does not parse as a
/// decision is a systemic failure, not a decision.
pub async fn resolve_decision<H, U>(
    host: &H,
    unit: &U,
    acceptance: AcceptanceSpec<'_>,
) -> Result<Decision, ResolveError>
where
    H: ValidationHost,
    U: UnitOfWork,
{
    for form in CallForm::CANDIDATES {
        match host.resolve(form, unit, acceptance).await {
            Ok(raw) => {
                tracing::debug!(form = form.as_str(), "validation host reconciled a result");
                return serde_json::from_str::<Decision>(&raw).map_err(|e| {
                    tracing::warn!(
                        form = form.as_str(),
                        error = %e,
                        "reconciled result does not parse as a decision"
                    );
                    ResolveError::UnparsableDecision(e)
                });
            }
            Err(HostError::UnsupportedForm(_)) => {
                tracing::debug!(form = form.as_str(), "call form unavailable, probing next");
            }
            Err(err) => {
                tracing::warn!(form = form.as_str(), error = %err, "decision validation failed");
                return Err(ResolveError::Validation(err));
            }
        }
    }

    Err(ResolveError::NoSupportedCallForm)
}
