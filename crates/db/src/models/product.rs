//! Product entity model and DTOs.

use ctei_core::types::{Id, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A product row from the `products` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Id,
    pub project_id: Id,
    pub titulo: String,
    pub descripcion: String,
    pub product_type: String,
    pub is_public: bool,
    /// Optimistic concurrency counter, bumped on every update.
    pub version: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Insert DTO for the create path.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub id: Id,
    pub project_id: Id,
    pub titulo: String,
    pub descripcion: String,
    pub product_type: String,
    pub is_public: bool,
}

/// Update DTO: the fields a product submission edits.
#[derive(Debug, Clone)]
pub struct ProductPatch {
    pub titulo: String,
    pub descripcion: String,
    pub product_type: String,
    pub is_public: bool,
}
