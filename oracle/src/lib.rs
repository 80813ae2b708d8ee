//! Oracle adapters and decision normalization.
//!
//! # Architecture
//!
//! The oracle is an external nondeterministic reasoning engine; this crate
//! owns everything between a plea and a canonical decision:
//!
//! - [`Oracle`] - the evaluation seam: `evaluate(prompt) -> raw text`
//! - [`render_prompt`] - renders the fixed evaluation prompt for one plea
//! - [`normalize`] - total function reducing raw oracle text to a
//!   well-formed [`hoardkeep_types::Decision`]
//! - [`ClaimEvaluation`] - the unit of work the validation host replays:
//!   one oracle call, normalized, canonically encoded
//! - [`HttpOracle`] / [`ScriptedOracle`] - a wire adapter and an in-memory
//!   one for tests and offline runs
//!
//! Oracle output is untrusted: arbitrary formatting, wrong types, or no
//! structure at all. Nothing in this crate lets malformed output escape as
//! an error; the normalizer absorbs every malformed case into the
//! deterministic fallback decision.
#![allow(async_fn_in_trait)]

mod evaluate;
mod http;
mod normalize;
mod prompt;
mod scripted;

pub use evaluate::ClaimEvaluation;
pub use http::HttpOracle;
pub use normalize::normalize;
pub use prompt::{EVALUATION_CRITERIA, EVALUATION_TASK, render_prompt};
pub use scripted::ScriptedOracle;

use thiserror::Error;

/// External nondeterministic reasoning engine.
///
/// Implementations submit the prompt and return the raw reply text, which
/// callers must treat as untrusted and possibly malformed.
pub trait Oracle {
    async fn evaluate(&self, prompt: &str) -> Result<String, OracleError>;
}

#[derive(Debug, Error)]
pub enum OracleError {
    /// The endpoint answered with a non-success status.
    #[error("oracle endpoint returned {status}: {body}")]
    Endpoint { status: u16, body: String },
    /// Transport-level failure reaching the endpoint.
    #[error("oracle transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    /// The endpoint answered but not in the adapter's reply shape.
    #[error("oracle reply was not understood: {0}")]
    MalformedReply(String),
    /// A scripted oracle ran out of canned responses.
    #[error("scripted oracle has no responses left")]
    ScriptExhausted,
}
