//! Product create/update flows.
//!
//! Same pipeline as the project flows minus the scoring stage, and the
//! parent project resolves before anything is written: a missing parent is
//! a terminal not-found error distinct from field validation.

use ctei_core::attachments::{reconcile, RelatedType, StagedUpload};
use ctei_core::error::CoreError;
use ctei_core::types::Id;
use ctei_core::validation::validate_product_form;
use ctei_db::models::product::{NewProduct, Product, ProductPatch};
use ctei_db::models::project::Project;
use ctei_db::repositories::{ProductRepo, ProjectRepo};
use ctei_events::views;
use uuid::Uuid;

use crate::error::AppError;
use crate::forms::Submission;
use crate::state::AppState;
use crate::workflow::{
    attachment_field_error, not_found, parse_entity_id, persist_staged_bytes, remove_files,
    SubmissionStage, PRODUCT_CREATED_MESSAGE, PRODUCT_UPDATED_MESSAGE,
};

/// Result of a successful product submission.
#[derive(Debug)]
pub struct ProductOutcome {
    pub message: String,
    pub product: Product,
}

/// Create a new product under the stated project.
///
/// The route supplies the owning project id; it participates in validation
/// as the `projectId` field, exactly as a hidden form field would.
pub async fn create_product(
    state: &AppState,
    project_id_raw: &str,
    mut submission: Submission,
) -> Result<ProductOutcome, AppError> {
    submission
        .fields
        .insert("projectId".to_string(), project_id_raw.to_string());
    let validated = validate_product_form(&submission.fields).map_err(AppError::Form)?;
    tracing::debug!(stage = SubmissionStage::Validated.as_str(), "Product submission validated");

    // Products never score, and nothing may be written until the parent
    // project resolves.
    let project = resolve_project(state, &validated.project_id).await?;

    let product_id = Uuid::new_v4();
    let Submission {
        existing, staged, ..
    } = submission;
    let retained_len = existing.len();
    let staged_meta: Vec<StagedUpload> = staged.iter().map(|f| f.meta.clone()).collect();
    let attachments = reconcile(existing, &staged_meta, RelatedType::Product, product_id)
        .map_err(attachment_field_error)?;

    let written =
        persist_staged_bytes(&state.uploads, &attachments[retained_len..], &staged).await?;

    let input = NewProduct {
        id: product_id,
        project_id: project.id,
        titulo: validated.titulo.clone(),
        descripcion: validated.descripcion.clone(),
        product_type: validated.product_type.as_str().to_string(),
        is_public: validated.is_public,
    };

    let product = match ProductRepo::create(&state.pool, &input, &attachments).await {
        Ok(product) => product,
        Err(e) => {
            remove_files(&state.uploads, &written).await;
            return Err(e.into());
        }
    };
    tracing::info!(
        stage = SubmissionStage::Persisted.as_str(),
        product_id = %product.id,
        project_id = %project.id,
        "Product created",
    );

    invalidate_product_views(state, project.id, product.id);

    Ok(ProductOutcome {
        message: PRODUCT_CREATED_MESSAGE.to_string(),
        product,
    })
}

/// Update a product that must already belong to the stated project.
pub async fn update_product(
    state: &AppState,
    project_id_raw: &str,
    raw_id: &str,
    mut submission: Submission,
) -> Result<ProductOutcome, AppError> {
    submission
        .fields
        .insert("projectId".to_string(), project_id_raw.to_string());
    let validated = validate_product_form(&submission.fields).map_err(AppError::Form)?;
    tracing::debug!(stage = SubmissionStage::Validated.as_str(), "Product submission validated");

    let project = resolve_project(state, &validated.project_id).await?;
    let product_id = parse_entity_id("Producto", raw_id)?;

    let Submission {
        existing, staged, ..
    } = submission;
    let retained_len = existing.len();
    let staged_meta: Vec<StagedUpload> = staged.iter().map(|f| f.meta.clone()).collect();
    let attachments = reconcile(existing, &staged_meta, RelatedType::Product, product_id)
        .map_err(attachment_field_error)?;

    // A product filed under a different project is a not-found condition.
    let current = ProductRepo::find_in_project(&state.pool, project.id, product_id)
        .await?
        .ok_or_else(|| not_found("Producto", raw_id))?;

    let written =
        persist_staged_bytes(&state.uploads, &attachments[retained_len..], &staged).await?;

    let patch = ProductPatch {
        titulo: validated.titulo.clone(),
        descripcion: validated.descripcion.clone(),
        product_type: validated.product_type.as_str().to_string(),
        is_public: validated.is_public,
    };

    let updated = match ProductRepo::update_submission(
        &state.pool,
        project.id,
        product_id,
        current.version,
        &patch,
        &attachments,
    )
    .await
    {
        Ok(Some(product)) => product,
        Ok(None) => {
            remove_files(&state.uploads, &written).await;
            let still_there = ProductRepo::find_in_project(&state.pool, project.id, product_id)
                .await?
                .is_some();
            return Err(if still_there {
                AppError::Core(CoreError::Conflict(
                    "El producto fue modificado por otro usuario. Intenta de nuevo.".into(),
                ))
            } else {
                not_found("Producto", raw_id)
            });
        }
        Err(e) => {
            remove_files(&state.uploads, &written).await;
            return Err(e.into());
        }
    };
    tracing::info!(
        stage = SubmissionStage::Persisted.as_str(),
        product_id = %updated.id,
        version = updated.version,
        "Product updated",
    );

    invalidate_product_views(state, project.id, updated.id);

    Ok(ProductOutcome {
        message: PRODUCT_UPDATED_MESSAGE.to_string(),
        product: updated,
    })
}

/// Resolve the parent project or fail the submission.
async fn resolve_project(state: &AppState, raw: &str) -> Result<Project, AppError> {
    let id = parse_entity_id("Proyecto", raw)?;
    ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Proyecto", raw))
}

/// Every cached view that could show this product.
fn invalidate_product_views(state: &AppState, project_id: Id, product_id: Id) {
    state.invalidations.invalidate(views::PRODUCT_LIST);
    state.invalidations.invalidate(views::product_detail(product_id));
    state.invalidations.invalidate(views::project_detail(project_id));
    state.invalidations.invalidate(views::DASHBOARD);
    tracing::debug!(
        stage = SubmissionStage::Invalidated.as_str(),
        product_id = %product_id,
        "Views invalidated",
    );
}
