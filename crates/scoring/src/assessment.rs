//! Input and output shapes of a scoring call.

use serde::{Deserialize, Serialize};

use crate::OracleError;

/// Normalized project fields handed to the oracle.
///
/// Built from a validated submission: the budget defaults to 0 when the
/// form carried none, the detailed description to the empty string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProposalInput {
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub budget: f64,
    pub description: String,
}

impl ProposalInput {
    pub fn new(
        title: impl Into<String>,
        abstract_text: impl Into<String>,
        budget: Option<f64>,
        description: Option<String>,
    ) -> Self {
        Self {
            title: title.into(),
            abstract_text: abstract_text.into(),
            budget: budget.unwrap_or(0.0),
            description: description.unwrap_or_default(),
        }
    }
}

/// Structured result of a scoring call.
///
/// The aliases accept the alternate key spellings some assistant revisions
/// produce (`scoreRationale`, `improvementRecommendations`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    /// Integer score, 0 to 100 inclusive.
    pub score: i32,
    /// Concise summary of the proposal.
    pub summary: String,
    /// Why the proposal received this score.
    #[serde(alias = "scoreRationale")]
    pub rationale: String,
    /// Actionable suggestions to improve the proposal.
    #[serde(alias = "improvementRecommendations")]
    pub recommendations: String,
}

impl Assessment {
    /// Enforce the score bounds the workflow accepts.
    ///
    /// An out-of-range score is malformed data, not a clampable value: the
    /// whole submission fails and nothing persists.
    pub fn into_checked(self) -> Result<Self, OracleError> {
        if (0..=100).contains(&self.score) {
            Ok(self)
        } else {
            Err(OracleError::Malformed(format!(
                "score {} outside 0..=100",
                self.score
            )))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
