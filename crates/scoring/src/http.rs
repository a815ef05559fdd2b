//! HTTP client for a generative scoring assistant.
//!
//! [`HttpScoringOracle`] POSTs the proposal fields as JSON to a configured
//! endpoint and expects an [`Assessment`] body back. The whole call is
//! bounded by a client-level timeout so a stuck assistant can never pin a
//! submission.

use std::time::Duration;

use crate::assessment::{Assessment, ProposalInput};
use crate::{OracleError, ScoringOracle};

/// Scoring oracle that delegates to an external assistant over HTTP.
pub struct HttpScoringOracle {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpScoringOracle {
    /// Create a client targeting `endpoint`, with every request bounded by
    /// `timeout`.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, OracleError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| OracleError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Assistant endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn classify(err: reqwest::Error) -> OracleError {
    if err.is_timeout() {
        OracleError::Timeout
    } else if err.is_decode() {
        OracleError::Malformed(err.to_string())
    } else {
        OracleError::Transport(err.to_string())
    }
}

#[async_trait::async_trait]
impl ScoringOracle for HttpScoringOracle {
    async fn assess(&self, input: &ProposalInput) -> Result<Assessment, OracleError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(input)
            .send()
            .await
            .map_err(classify)?
            .error_for_status()
            .map_err(|e| OracleError::Transport(e.to_string()))?;

        let assessment: Assessment = response.json().await.map_err(classify)?;

        tracing::debug!(
            endpoint = %self.endpoint,
            score = assessment.score,
            "Received assistant assessment",
        );

        assessment.into_checked()
    }
}
