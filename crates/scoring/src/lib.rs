//! Scoring Oracle adapters for project proposals.
//!
//! The workflow treats scoring as an opaque, possibly-slow,
//! possibly-failing collaborator behind the [`ScoringOracle`] trait. Two
//! implementations ship: [`HeuristicScoringOracle`], a deterministic local
//! scorer, and [`HttpScoringOracle`], which delegates to a generative
//! assistant over HTTP.

pub mod assessment;
pub mod heuristic;
pub mod http;

pub use assessment::{Assessment, ProposalInput};
pub use heuristic::HeuristicScoringOracle;
pub use http::HttpScoringOracle;

/// Errors a scoring call can surface. All of them are transient from the
/// submission's point of view: the caller reports a generic retryable
/// failure and persists nothing.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    /// The oracle could not be reached or the transport failed mid-call.
    #[error("Scoring transport error: {0}")]
    Transport(String),

    /// The oracle did not answer within the configured deadline.
    #[error("Scoring call timed out")]
    Timeout,

    /// The oracle answered with data the workflow refuses to accept
    /// (unparseable body, or a score outside 0..=100).
    #[error("Malformed scoring response: {0}")]
    Malformed(String),
}

/// An assessment provider for project proposals.
///
/// Invoked exactly once per successfully validated project submission.
/// Implementations must be cancel-safe: the caller may drop the future on
/// timeout, and no entity state may depend on a completed call.
#[async_trait::async_trait]
pub trait ScoringOracle: Send + Sync {
    async fn assess(&self, input: &ProposalInput) -> Result<Assessment, OracleError>;
}
