//! Handlers for the `/users` resource. Read-only: user administration
//! beyond listing is out of scope while authentication is not enforced.

use axum::extract::{Path, State};
use axum::Json;
use ctei_db::models::user::User;
use ctei_db::repositories::UserRepo;

use crate::error::AppResult;
use crate::state::AppState;
use crate::workflow::{not_found, parse_entity_id};

/// GET /api/v1/users
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(users))
}

/// GET /api/v1/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<User>> {
    let user_id = parse_entity_id("Usuario", &id)?;
    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| not_found("Usuario", &id))?;
    Ok(Json(user))
}
