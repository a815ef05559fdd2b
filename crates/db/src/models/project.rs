//! Project entity model and DTOs.

use ctei_core::types::{Id, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A project row from the `projects` table.
///
/// `estado` is stored as its string literal; membership is guaranteed by
/// validation and by the table CHECK constraint.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Id,
    pub titulo: String,
    pub resumen: String,
    pub presupuesto: Option<f64>,
    pub estado: String,
    pub entidad_proponente: String,
    pub plazo: Option<Timestamp>,
    pub is_public: bool,
    pub description: Option<String>,
    pub lead_investigator_id: Option<Id>,
    pub ai_score: Option<i32>,
    pub ai_summary: Option<String>,
    pub ai_rationale: Option<String>,
    pub ai_recommendations: Option<String>,
    /// Optimistic concurrency counter, bumped on every update.
    pub version: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The single live AI assessment, written on every scored submission.
#[derive(Debug, Clone)]
pub struct AssessmentFields {
    pub ai_score: i32,
    pub ai_summary: String,
    pub ai_rationale: String,
    pub ai_recommendations: String,
}

/// Insert DTO for the create path. The workflow assigns the identity and
/// the derived defaults before persisting.
#[derive(Debug, Clone)]
pub struct NewProject {
    pub id: Id,
    pub titulo: String,
    pub resumen: String,
    pub presupuesto: Option<f64>,
    pub estado: String,
    pub entidad_proponente: String,
    /// Placeholder deadline assigned at creation.
    pub plazo: Option<Timestamp>,
    pub is_public: bool,
    pub description: Option<String>,
    pub lead_investigator_id: Option<Id>,
    pub assessment: AssessmentFields,
}

/// Update DTO for the update path.
///
/// Carries exactly the fields a submission edits, plus the freshly computed
/// assessment. Everything else on the row (`created_at`, `plazo`,
/// `lead_investigator_id`) stays untouched by the update statement.
#[derive(Debug, Clone)]
pub struct ProjectPatch {
    pub titulo: String,
    pub resumen: String,
    /// `None` clears the stored budget: the form submitted "not provided".
    pub presupuesto: Option<f64>,
    pub estado: String,
    pub entidad_proponente: String,
    pub is_public: bool,
    pub description: Option<String>,
    pub assessment: AssessmentFields,
}
