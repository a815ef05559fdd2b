//! User entity model.

use ctei_core::types::{Id, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A user row from the `users` table.
///
/// Role literals are the constants in `ctei_core::roles`.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Id,
    pub email: String,
    pub nombre: String,
    pub apellidos: String,
    pub organizacion: Option<String>,
    pub role: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
