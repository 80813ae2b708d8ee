//! HTTP oracle adapter.
//!
//! Speaks a minimal unary protocol: POST `{"prompt": ...}` to the configured
//! endpoint and read `{"text": ...}` back. There is no internal retry;
//! replaying an evaluation is the validation primitive's decision, not the
//! transport's.

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::{Oracle, OracleError};

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;

const MAX_ERROR_BODY_BYTES: usize = 32 * 1024;

/// Reasoning-engine endpoint reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpOracle {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(Deserialize)]
struct OracleReply {
    text: String,
}

impl HttpOracle {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, OracleError> {
        Self::with_timeout(endpoint, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, OracleError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

impl Oracle for HttpOracle {
    async fn evaluate(&self, prompt: &str) -> Result<String, OracleError> {
        let request_id = Uuid::new_v4();
        tracing::debug!(
            %request_id,
            prompt_chars = prompt.chars().count(),
            "dispatching oracle evaluation"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("X-Request-Id", request_id.to_string())
            .json(&json!({ "prompt": prompt }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = capped_body(response.text().await.unwrap_or_default());
            tracing::warn!(
                %request_id,
                status = status.as_u16(),
                "oracle endpoint rejected evaluation"
            );
            return Err(OracleError::Endpoint {
                status: status.as_u16(),
                body,
            });
        }

        let reply: OracleReply = response
            .json()
            .await
            .map_err(|e| OracleError::MalformedReply(e.to_string()))?;
        tracing::debug!(%request_id, reply_bytes = reply.text.len(), "oracle evaluation complete");
        Ok(reply.text)
    }
}

/// Bound error bodies so a misbehaving endpoint cannot bloat logs.
fn capped_body(mut body: String) -> String {
    if body.len() <= MAX_ERROR_BODY_BYTES {
        return body;
    }
    let mut cut = MAX_ERROR_BODY_BYTES;
    while !body.is_char_boundary(cut) {
        cut -= 1;
    }
    body.truncate(cut);
    body.push_str("...(truncated)");
    body
}
