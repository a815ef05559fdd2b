//! Route definitions for the `/users` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/users`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(user::list))
        .route("/{id}", get(user::get_by_id))
}
