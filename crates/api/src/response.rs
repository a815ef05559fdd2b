//! Shared response envelope types for API handlers.

use ctei_scoring::Assessment;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope for read endpoints that use
/// one.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Result of a successful workflow submission.
///
/// Project flows carry the full scoring result; product flows omit it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse<T: Serialize> {
    /// User-facing success message.
    pub message: String,
    /// The persisted entity.
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scoring: Option<Assessment>,
}
