//! Canned oracle for tests and offline runs.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::{Oracle, OracleError};

/// Replays a fixed script of replies instead of reasoning.
///
/// [`ScriptedOracle::new`] consumes one reply per evaluation and errors when
/// the script runs dry; [`ScriptedOracle::cycling`] rotates through the
/// script forever, which is what the offline demo mode wants.
#[derive(Debug)]
pub struct ScriptedOracle {
    replies: Mutex<VecDeque<String>>,
    cycle: bool,
}

impl ScriptedOracle {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            cycle: false,
        }
    }

    pub fn cycling<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            cycle: true,
        }
    }
}

impl Oracle for ScriptedOracle {
    async fn evaluate(&self, _prompt: &str) -> Result<String, OracleError> {
        let mut replies = self.replies.lock().expect("scripted oracle lock");
        let reply = replies.pop_front().ok_or(OracleError::ScriptExhausted)?;
        if self.cycle {
            replies.push_back(reply.clone());
        }
        Ok(reply)
    }
}
