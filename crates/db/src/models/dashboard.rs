//! Aggregate shapes for the dashboard view.

use serde::Serialize;
use sqlx::FromRow;

/// Number of projects in one `estado`.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub estado: String,
    pub count: i64,
}

/// Portal-wide aggregate summary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_projects: i64,
    pub total_products: i64,
    pub by_estado: Vec<StatusCount>,
    /// Mean of the live AI scores, absent while no project has been scored.
    pub average_ai_score: Option<f64>,
}
