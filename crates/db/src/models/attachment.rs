//! Attachment metadata rows.

use ctei_core::types::{Id, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// An attachment row from the `attachments` table.
///
/// Serializes with the portal's wire keys (`size`, `originalName`, ...) so
/// rows can embed directly in project and product responses.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: Id,
    pub filename: String,
    pub original_name: String,
    pub mime_type: String,
    #[serde(rename = "size")]
    pub size_bytes: i64,
    pub url: String,
    pub related_id: Id,
    pub related_type: String,
    pub uploaded_at: Timestamp,
}
