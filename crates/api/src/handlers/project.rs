//! Handlers for the `/projects` resource.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use ctei_core::attachments::RelatedType;
use ctei_db::models::attachment::Attachment;
use ctei_db::models::product::Product;
use ctei_db::models::project::Project;
use ctei_db::models::user::User;
use ctei_db::repositories::{AttachmentRepo, ProductRepo, ProjectRepo, UserRepo};
use ctei_events::views;
use serde::Serialize;

use crate::error::AppResult;
use crate::forms::read_submission;
use crate::response::SubmissionResponse;
use crate::state::AppState;
use crate::workflow::{self, not_found, parse_entity_id};

/// A project with its owned entities and the resolved lead investigator,
/// as rendered on the detail page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    /// Current user record, looked up by id at read time.
    pub lead_investigator: Option<User>,
    pub products: Vec<Product>,
    pub attachments: Vec<Attachment>,
}

/// POST /api/v1/projects
///
/// Runs the full submission workflow: validate, score, reconcile
/// attachments, persist, invalidate.
pub async fn create(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<SubmissionResponse<Project>>)> {
    let submission = read_submission(multipart).await?;
    let outcome = workflow::create_project(&state, submission).await?;
    Ok((
        StatusCode::CREATED,
        Json(SubmissionResponse {
            message: outcome.message,
            data: outcome.project,
            scoring: Some(outcome.assessment),
        }),
    ))
}

/// GET /api/v1/projects
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Project>>> {
    let projects = ProjectRepo::list(&state.pool).await?;
    Ok(Json(projects))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ProjectDetail>> {
    let project_id = parse_entity_id("Proyecto", &id)?;
    let project = ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or_else(|| not_found("Proyecto", &id))?;

    let lead_investigator = match project.lead_investigator_id {
        Some(user_id) => UserRepo::find_by_id(&state.pool, user_id).await?,
        None => None,
    };
    let products = ProductRepo::list_by_project(&state.pool, project.id).await?;
    let attachments =
        AttachmentRepo::list_for(&state.pool, RelatedType::Project.as_str(), project.id).await?;

    Ok(Json(ProjectDetail {
        project,
        lead_investigator,
        products,
        attachments,
    }))
}

/// PUT /api/v1/projects/{id}
///
/// Re-runs the workflow, overwriting the live AI assessment.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> AppResult<Json<SubmissionResponse<Project>>> {
    let submission = read_submission(multipart).await?;
    let outcome = workflow::update_project(&state, &id, submission).await?;
    Ok(Json(SubmissionResponse {
        message: outcome.message,
        data: outcome.project,
        scoring: Some(outcome.assessment),
    }))
}

/// DELETE /api/v1/projects/{id}
///
/// Cascades to the project's products and every related attachment; the
/// stored attachment files are removed best-effort after the rows are gone.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let project_id = parse_entity_id("Proyecto", &id)?;

    // Collect stored filenames before the rows disappear.
    let mut filenames: Vec<String> =
        AttachmentRepo::list_for(&state.pool, RelatedType::Project.as_str(), project_id)
            .await?
            .into_iter()
            .map(|a| a.filename)
            .collect();
    for product in ProductRepo::list_by_project(&state.pool, project_id).await? {
        filenames.extend(
            AttachmentRepo::list_for(&state.pool, RelatedType::Product.as_str(), product.id)
                .await?
                .into_iter()
                .map(|a| a.filename),
        );
    }

    let deleted = ProjectRepo::delete(&state.pool, project_id).await?;
    if !deleted {
        return Err(not_found("Proyecto", &id));
    }

    workflow::remove_files(&state.uploads, &filenames).await;

    state.invalidations.invalidate(views::PROJECT_LIST);
    state.invalidations.invalidate(views::project_detail(project_id));
    state.invalidations.invalidate(views::PRODUCT_LIST);
    state.invalidations.invalidate(views::DASHBOARD);

    Ok(StatusCode::NO_CONTENT)
}
