//! The proposal submission workflow.
//!
//! Each HTTP submission makes one pass through a fixed pipeline:
//!
//! ```text
//! RECEIVED -> VALIDATED -> SCORED -> RECONCILED -> PERSISTED -> INVALIDATED -> DONE
//! ```
//!
//! Product flows skip the SCORED stage. A validation or scoring failure is
//! terminal and persists nothing; side effects are strictly ordered and
//! each stage runs only after the previous one succeeded. Persistence is
//! the last committing action — view invalidation after it is fire-and-
//! forget and never rolls the write back.

pub mod product;
pub mod project;

use ctei_core::attachments::AttachmentError;
use ctei_core::error::CoreError;
use ctei_core::types::Id;
use ctei_core::validation::FieldErrors;
use ctei_db::models::project::AssessmentFields;
use ctei_scoring::Assessment;
use uuid::Uuid;

use crate::error::AppError;
use crate::forms::StagedFile;
use crate::uploads::UploadStore;

pub use product::{create_product, update_product, ProductOutcome};
pub use project::{create_project, update_project, ProjectOutcome};

/// User-facing success messages, one per workflow entry point.
pub const PROJECT_CREATED_MESSAGE: &str = "¡Propuesta de proyecto creada y evaluada con éxito!";
pub const PROJECT_UPDATED_MESSAGE: &str =
    "¡Propuesta de proyecto actualizada y evaluada con éxito!";
pub const PRODUCT_CREATED_MESSAGE: &str = "Producto creado con éxito.";
pub const PRODUCT_UPDATED_MESSAGE: &str = "Producto actualizado con éxito.";

/// Placeholder deadline assigned at project creation.
pub(crate) const DEFAULT_DEADLINE_DAYS: i64 = 365;

/// Stages of one submission, in pipeline order. Used for tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStage {
    Received,
    Validated,
    Scored,
    Reconciled,
    Persisted,
    Invalidated,
    Done,
}

impl SubmissionStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Validated => "validated",
            Self::Scored => "scored",
            Self::Reconciled => "reconciled",
            Self::Persisted => "persisted",
            Self::Invalidated => "invalidated",
            Self::Done => "done",
        }
    }
}

/// Parse a client-supplied entity id. An unparseable id is the same
/// not-found condition as a missing row, never a validation error.
pub(crate) fn parse_entity_id(entity: &'static str, raw: &str) -> Result<Id, AppError> {
    Uuid::parse_str(raw).map_err(|_| not_found(entity, raw))
}

pub(crate) fn not_found(entity: &'static str, raw: &str) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity,
        id: raw.to_string(),
    })
}

/// Surface a reconciler failure as a field error on `attachments`.
pub(crate) fn attachment_field_error(err: AttachmentError) -> AppError {
    let mut fields = FieldErrors::new();
    fields.push("attachments", err.to_string());
    AppError::Form(fields)
}

pub(crate) fn assessment_fields(assessment: &Assessment) -> AssessmentFields {
    AssessmentFields {
        ai_score: assessment.score,
        ai_summary: assessment.summary.clone(),
        ai_rationale: assessment.rationale.clone(),
        ai_recommendations: assessment.recommendations.clone(),
    }
}

/// Write the staged bytes under their reconciled filenames.
///
/// `records` are the freshly created attachment records, in the same order
/// as `staged`. Files land on disk before the database transaction runs;
/// if one write fails, the ones already written are removed and the
/// submission fails with nothing persisted.
pub(crate) async fn persist_staged_bytes(
    uploads: &UploadStore,
    records: &[ctei_core::attachments::AttachmentRecord],
    staged: &[StagedFile],
) -> Result<Vec<String>, AppError> {
    let mut written = Vec::with_capacity(staged.len());
    for (record, file) in records.iter().zip(staged) {
        match uploads.store(&record.filename, &file.bytes).await {
            Ok(_) => written.push(record.filename.clone()),
            Err(e) => {
                remove_files(uploads, &written).await;
                return Err(AppError::InternalError(format!(
                    "Failed to store attachment '{}': {e}",
                    record.original_name
                )));
            }
        }
    }
    Ok(written)
}

/// Best-effort removal of stored files after a failed database write.
pub(crate) async fn remove_files(uploads: &UploadStore, filenames: &[String]) {
    for filename in filenames {
        uploads.remove(filename).await;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
