//! Project create/update flows: validate → score → reconcile → persist →
//! invalidate.

use chrono::{Duration, Utc};
use ctei_core::attachments::{reconcile, RelatedType, StagedUpload};
use ctei_core::error::CoreError;
use ctei_core::types::Id;
use ctei_core::validation::{validate_project_form, ValidatedProject};
use ctei_db::models::project::{NewProject, Project, ProjectPatch};
use ctei_db::repositories::{ProjectRepo, UserRepo};
use ctei_events::views;
use ctei_scoring::{Assessment, ProposalInput};
use uuid::Uuid;

use crate::error::AppError;
use crate::forms::Submission;
use crate::state::AppState;
use crate::workflow::{
    assessment_fields, attachment_field_error, not_found, parse_entity_id, persist_staged_bytes,
    remove_files, SubmissionStage, DEFAULT_DEADLINE_DAYS, PROJECT_CREATED_MESSAGE,
    PROJECT_UPDATED_MESSAGE,
};

/// Result of a successful project submission.
#[derive(Debug)]
pub struct ProjectOutcome {
    pub message: String,
    pub project: Project,
    pub assessment: Assessment,
}

/// Create a new project from a raw submission.
///
/// Assigns the identity, the creation defaults (placeholder deadline, lead
/// investigator reference) and the first AI assessment.
pub async fn create_project(
    state: &AppState,
    submission: Submission,
) -> Result<ProjectOutcome, AppError> {
    let validated = validate_project_form(&submission.fields).map_err(AppError::Form)?;
    tracing::debug!(stage = SubmissionStage::Validated.as_str(), "Project submission validated");

    let assessment = score(state, &validated).await?;

    let lead_investigator_id = resolve_lead_investigator(state, &validated).await?;

    // The workflow assigns the identity so the reconciled attachments can
    // reference their parent before the insert runs.
    let project_id = Uuid::new_v4();
    let Submission {
        existing, staged, ..
    } = submission;
    let retained_len = existing.len();
    let staged_meta: Vec<StagedUpload> = staged.iter().map(|f| f.meta.clone()).collect();
    let attachments = reconcile(existing, &staged_meta, RelatedType::Project, project_id)
        .map_err(attachment_field_error)?;
    tracing::debug!(
        stage = SubmissionStage::Reconciled.as_str(),
        attachment_count = attachments.len(),
        "Attachments reconciled",
    );

    let written =
        persist_staged_bytes(&state.uploads, &attachments[retained_len..], &staged).await?;

    let input = NewProject {
        id: project_id,
        titulo: validated.titulo.clone(),
        resumen: validated.resumen.clone(),
        presupuesto: validated.presupuesto,
        estado: validated.estado.as_str().to_string(),
        entidad_proponente: validated.entidad_proponente.clone(),
        plazo: Some(Utc::now() + Duration::days(DEFAULT_DEADLINE_DAYS)),
        is_public: validated.is_public,
        description: validated.description.clone(),
        lead_investigator_id,
        assessment: assessment_fields(&assessment),
    };

    let project = match ProjectRepo::create(&state.pool, &input, &attachments).await {
        Ok(project) => project,
        Err(e) => {
            remove_files(&state.uploads, &written).await;
            return Err(e.into());
        }
    };
    tracing::info!(
        stage = SubmissionStage::Persisted.as_str(),
        project_id = %project.id,
        ai_score = project.ai_score,
        "Project created",
    );

    invalidate_project_views(state, project.id);

    Ok(ProjectOutcome {
        message: PROJECT_CREATED_MESSAGE.to_string(),
        project,
        assessment,
    })
}

/// Update an existing project from a raw submission.
///
/// Merges the submitted fields plus a freshly computed assessment and the
/// reconciled attachment set; `created_at`, `plazo` and the lead
/// investigator reference stay untouched. The optimistic version check
/// turns a concurrent writer into a conflict instead of a lost update.
pub async fn update_project(
    state: &AppState,
    raw_id: &str,
    submission: Submission,
) -> Result<ProjectOutcome, AppError> {
    let validated = validate_project_form(&submission.fields).map_err(AppError::Form)?;
    tracing::debug!(stage = SubmissionStage::Validated.as_str(), "Project submission validated");

    let assessment = score(state, &validated).await?;

    let project_id = parse_entity_id("Proyecto", raw_id)?;
    let Submission {
        existing, staged, ..
    } = submission;
    let retained_len = existing.len();
    let staged_meta: Vec<StagedUpload> = staged.iter().map(|f| f.meta.clone()).collect();
    let attachments = reconcile(existing, &staged_meta, RelatedType::Project, project_id)
        .map_err(attachment_field_error)?;

    // No row is locked while the oracle runs: the version read happens
    // here, after scoring, and the write below re-checks it.
    let current = ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or_else(|| not_found("Proyecto", raw_id))?;

    let written =
        persist_staged_bytes(&state.uploads, &attachments[retained_len..], &staged).await?;

    let patch = ProjectPatch {
        titulo: validated.titulo.clone(),
        resumen: validated.resumen.clone(),
        presupuesto: validated.presupuesto,
        estado: validated.estado.as_str().to_string(),
        entidad_proponente: validated.entidad_proponente.clone(),
        is_public: validated.is_public,
        description: validated.description.clone(),
        assessment: assessment_fields(&assessment),
    };

    let updated = match ProjectRepo::update_submission(
        &state.pool,
        project_id,
        current.version,
        &patch,
        &attachments,
    )
    .await
    {
        Ok(Some(project)) => project,
        Ok(None) => {
            remove_files(&state.uploads, &written).await;
            // The row either vanished or a concurrent writer bumped the
            // version between our read and the write.
            let still_there = ProjectRepo::find_by_id(&state.pool, project_id)
                .await?
                .is_some();
            return Err(if still_there {
                AppError::Core(CoreError::Conflict(
                    "El proyecto fue modificado por otro usuario. Intenta de nuevo.".into(),
                ))
            } else {
                not_found("Proyecto", raw_id)
            });
        }
        Err(e) => {
            remove_files(&state.uploads, &written).await;
            return Err(e.into());
        }
    };
    tracing::info!(
        stage = SubmissionStage::Persisted.as_str(),
        project_id = %updated.id,
        ai_score = updated.ai_score,
        version = updated.version,
        "Project updated",
    );

    invalidate_project_views(state, updated.id);

    Ok(ProjectOutcome {
        message: PROJECT_UPDATED_MESSAGE.to_string(),
        project: updated,
        assessment,
    })
}

/// Consult the oracle exactly once for a validated submission and enforce
/// the score bounds on whatever comes back.
async fn score(state: &AppState, validated: &ValidatedProject) -> Result<Assessment, AppError> {
    let input = ProposalInput::new(
        validated.titulo.clone(),
        validated.resumen.clone(),
        validated.presupuesto,
        validated.description.clone(),
    );
    let assessment = state.oracle.assess(&input).await?.into_checked()?;
    tracing::debug!(
        stage = SubmissionStage::Scored.as_str(),
        score = assessment.score,
        "Proposal scored",
    );
    Ok(assessment)
}

/// Resolve the optional lead investigator reference from the form.
async fn resolve_lead_investigator(
    state: &AppState,
    validated: &ValidatedProject,
) -> Result<Option<Id>, AppError> {
    let Some(raw) = &validated.lead_investigator_id else {
        return Ok(None);
    };
    let id = parse_entity_id("Usuario", raw)?;
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Usuario", raw))?;
    Ok(Some(user.id))
}

/// Every cached view that could show this project.
fn invalidate_project_views(state: &AppState, id: Id) {
    state.invalidations.invalidate(views::PROJECT_LIST);
    state.invalidations.invalidate(views::project_detail(id));
    state.invalidations.invalidate(views::DASHBOARD);
    tracing::debug!(
        stage = SubmissionStage::Invalidated.as_str(),
        project_id = %id,
        "Views invalidated",
    );
}
