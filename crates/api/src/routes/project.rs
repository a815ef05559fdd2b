//! Route definitions for the `/projects` resource.
//!
//! Also nests product routes under `/projects/{project_id}/products`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{product, project};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                                  -> list
/// POST   /                                  -> create
/// GET    /{id}                              -> get_by_id
/// PUT    /{id}                              -> update
/// DELETE /{id}                              -> delete
///
/// GET    /{project_id}/products             -> list_by_project
/// POST   /{project_id}/products             -> create
/// GET    /{project_id}/products/{id}        -> get_by_id
/// PUT    /{project_id}/products/{id}        -> update
/// DELETE /{project_id}/products/{id}        -> delete
/// ```
pub fn router() -> Router<AppState> {
    let product_routes = Router::new()
        .route("/", get(product::list_by_project).post(product::create))
        .route(
            "/{id}",
            get(product::get_by_id)
                .put(product::update)
                .delete(product::delete),
        );

    Router::new()
        .route("/", get(project::list).post(project::create))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .nest("/{project_id}/products", product_routes)
}
