//! Handlers for products.
//!
//! Products are nested under their owning project:
//! `/projects/{project_id}/products[/{id}]`. A flat read-only listing
//! lives at `/products`, and the code → label catalog at `/product-types`.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use ctei_core::attachments::RelatedType;
use ctei_core::product_type::{self, ProductTypeInfo};
use ctei_db::models::attachment::Attachment;
use ctei_db::models::product::Product;
use ctei_db::repositories::{AttachmentRepo, ProductRepo, ProjectRepo};
use ctei_events::views;
use serde::Serialize;

use crate::error::AppResult;
use crate::forms::read_submission;
use crate::response::SubmissionResponse;
use crate::state::AppState;
use crate::workflow::{self, not_found, parse_entity_id};

/// A product with its attachment set, as rendered on the detail page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub attachments: Vec<Attachment>,
}

/// POST /api/v1/projects/{project_id}/products
///
/// Runs the product workflow: validate, resolve the parent project,
/// reconcile attachments, persist, invalidate. Never scores.
pub async fn create(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<SubmissionResponse<Product>>)> {
    let submission = read_submission(multipart).await?;
    let outcome = workflow::create_product(&state, &project_id, submission).await?;
    Ok((
        StatusCode::CREATED,
        Json(SubmissionResponse {
            message: outcome.message,
            data: outcome.product,
            scoring: None,
        }),
    ))
}

/// GET /api/v1/projects/{project_id}/products
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> AppResult<Json<Vec<Product>>> {
    let id = parse_entity_id("Proyecto", &project_id)?;
    ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Proyecto", &project_id))?;
    let products = ProductRepo::list_by_project(&state.pool, id).await?;
    Ok(Json(products))
}

/// GET /api/v1/projects/{project_id}/products/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((project_id, id)): Path<(String, String)>,
) -> AppResult<Json<ProductDetail>> {
    let parent_id = parse_entity_id("Proyecto", &project_id)?;
    let product_id = parse_entity_id("Producto", &id)?;
    let product = ProductRepo::find_in_project(&state.pool, parent_id, product_id)
        .await?
        .ok_or_else(|| not_found("Producto", &id))?;
    let attachments =
        AttachmentRepo::list_for(&state.pool, RelatedType::Product.as_str(), product.id).await?;
    Ok(Json(ProductDetail {
        product,
        attachments,
    }))
}

/// PUT /api/v1/projects/{project_id}/products/{id}
pub async fn update(
    State(state): State<AppState>,
    Path((project_id, id)): Path<(String, String)>,
    multipart: Multipart,
) -> AppResult<Json<SubmissionResponse<Product>>> {
    let submission = read_submission(multipart).await?;
    let outcome = workflow::update_product(&state, &project_id, &id, submission).await?;
    Ok(Json(SubmissionResponse {
        message: outcome.message,
        data: outcome.product,
        scoring: None,
    }))
}

/// DELETE /api/v1/projects/{project_id}/products/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path((project_id, id)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    let parent_id = parse_entity_id("Proyecto", &project_id)?;
    let product_id = parse_entity_id("Producto", &id)?;

    let filenames: Vec<String> =
        AttachmentRepo::list_for(&state.pool, RelatedType::Product.as_str(), product_id)
            .await?
            .into_iter()
            .map(|a| a.filename)
            .collect();

    let deleted = ProductRepo::delete_in_project(&state.pool, parent_id, product_id).await?;
    if !deleted {
        return Err(not_found("Producto", &id));
    }

    workflow::remove_files(&state.uploads, &filenames).await;

    state.invalidations.invalidate(views::PRODUCT_LIST);
    state.invalidations.invalidate(views::product_detail(product_id));
    state.invalidations.invalidate(views::project_detail(parent_id));
    state.invalidations.invalidate(views::DASHBOARD);

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/products
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    let products = ProductRepo::list(&state.pool).await?;
    Ok(Json(products))
}

/// GET /api/v1/product-types
pub async fn list_product_types() -> Json<Vec<ProductTypeInfo>> {
    Json(product_type::catalog())
}
