//! Validation-host abstractions for nondeterministic units of work.
//!
//! # Architecture
//!
//! A claim decision is produced by a nondeterministic procedure (an oracle
//! call plus normalization). Before any state mutation, that procedure must
//! be reduced to a single agreed-upon result. This crate owns the seams:
//!
//! - [`UnitOfWork`] - one replayable execution attempt of the procedure
//! - [`ValidationHost`] - the external primitive that executes a unit across
//!   validating parties and reconciles the runs into one canonical result
//! - [`CallForm`] - the closed set of call shapes a host may support
//! - [`resolve_decision`] - drives a unit through a host, probing call
//!   shapes in order and parsing the reconciled result into a decision
//!
//! The core never assumes how many times, or where, a unit executes. Hosts
//! are also responsible for liveness: a hung or perpetually disagreeing
//! evaluation must surface as a [`HostError`], not block forever.
//!
//! Traits here use native async fns and are consumed through generics, so no
//! `Send` bound is imposed on implementations.
#![allow(async_fn_in_trait)]

mod local;
mod resolve;

pub use local::LocalHost;
pub use resolve::{ResolveError, resolve_decision};

use thiserror::Error;

/// A single execution attempt of a nondeterministic procedure.
///
/// The validation host may run a unit any number of times, on any executor,
/// so implementations must be pure from the host's perspective: no
/// shared-state reads or writes, every run a fresh invocation. The returned
/// string is the canonical encoding of the run's result.
pub trait UnitOfWork {
    async fn run(&self) -> Result<String, UnitOfWorkError>;
}

/// Failure of one execution attempt, reported to the host.
#[derive(Debug, Error)]
#[error("unit of work failed: {message}")]
pub struct UnitOfWorkError {
    message: String,
}

impl UnitOfWorkError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Closed set of call shapes a validation host may expose.
///
/// Host deployments differ in which reconciliation entry points they offer;
/// callers probe [`CallForm::CANDIDATES`] in order instead of branching on
/// errors from a single shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallForm {
    /// Criteria-driven reconciliation: each run is judged against the
    /// acceptance criteria rather than compared byte-for-byte.
    NonComparative,
    /// Older spelling of the non-comparative entry point.
    NonComparativeLegacy,
    /// Unconditional reconciliation requiring identical run outputs.
    StrictEquality,
}

impl CallForm {
    /// Probe order: newest call shape first, unconditional reconciliation
    /// last.
    pub const CANDIDATES: [CallForm; 3] = [
        CallForm::NonComparative,
        CallForm::NonComparativeLegacy,
        CallForm::StrictEquality,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CallForm::NonComparative => "non_comparative",
            CallForm::NonComparativeLegacy => "non_comparative_legacy",
            CallForm::StrictEquality => "strict_equality",
        }
    }
}

/// Task description and acceptance criteria handed to the validation host.
///
/// The strict-equality form ignores these; the non-comparative forms use
/// them to judge whether independent runs agree in substance.
#[derive(Debug, Clone, Copy)]
pub struct AcceptanceSpec<'a> {
    pub task: &'a str,
    pub criteria: &'a str,
}

/// The external reconciliation primitive.
///
/// Implementations execute the unit across validating parties under the
/// given call form and either return the single reconciled canonical result
/// or signal why no agreement was reached.
pub trait ValidationHost {
    async fn resolve<U: UnitOfWork>(
        &self,
        form: CallForm,
        unit: &U,
        acceptance: AcceptanceSpec<'_>,
    ) -> Result<String, HostError>;
}

/// Why the host produced no reconciled result.
#[derive(Debug, Error)]
pub enum HostError {
    /// The host does not implement this call shape; the caller should try
    /// the next candidate.
    #[error("call form {} is not available on this host", .0.as_str())]
    UnsupportedForm(CallForm),
    /// Independent executions could not be reconciled into one result.
    #[error("validating executions disagree: {0}")]
    Disagreement(String),
    /// The unit of work itself failed on an executor.
    #[error(transparent)]
    Unit(#[from] UnitOfWorkError),
    /// Host-internal failure (transport, scheduling, liveness cutoff).
    #[error("validation host failure: {0}")]
    Internal(String),
}
