//! Repository for the `users` table.

use ctei_core::types::Id;
use sqlx::PgPool;

use crate::models::user::User;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, email, nombre, apellidos, organizacion, role, is_active, created_at, updated_at";

/// Provides read operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Find a user by ID.
    pub async fn find_by_id(pool: &PgPool, id: Id) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all users, alphabetically by last name.
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY apellidos, nombre");
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }
}
