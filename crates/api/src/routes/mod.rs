pub mod dashboard;
pub mod health;
pub mod project;
pub mod user;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /projects                                list, create (multipart)
/// /projects/{id}                           get detail, update (multipart), delete
/// /projects/{project_id}/products          list, create (multipart)
/// /projects/{project_id}/products/{id}     get, update (multipart), delete
///
/// /products                                flat list of all products
/// /product-types                           code → label catalog
///
/// /users                                   list
/// /users/{id}                              get
///
/// /dashboard/summary                       aggregate summary widget
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Project routes (also nest the product sub-resource).
        .nest("/projects", project::router())
        // Flat product listing.
        .route("/products", get(handlers::product::list))
        // Product type catalog.
        .route("/product-types", get(handlers::product::list_product_types))
        // Users.
        .nest("/users", user::router())
        // Dashboard widget data.
        .nest("/dashboard", dashboard::router())
}
