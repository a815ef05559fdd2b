//! Repository for the `attachments` table.

use ctei_core::attachments::AttachmentRecord;
use ctei_core::types::Id;
use sqlx::{PgConnection, PgPool};

use crate::models::attachment::Attachment;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, filename, original_name, mime_type, size_bytes, url, related_id, related_type, uploaded_at";

/// Provides read and wholesale-replace operations for attachment metadata.
pub struct AttachmentRepo;

impl AttachmentRepo {
    /// List a parent's attachments in upload order.
    pub async fn list_for(
        pool: &PgPool,
        related_type: &str,
        related_id: Id,
    ) -> Result<Vec<Attachment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM attachments
             WHERE related_type = $1 AND related_id = $2
             ORDER BY uploaded_at, id"
        );
        sqlx::query_as::<_, Attachment>(&query)
            .bind(related_type)
            .bind(related_id)
            .fetch_all(pool)
            .await
    }

    /// Replace a parent's attachment set wholesale.
    ///
    /// Runs on a connection so callers can compose it with the parent write
    /// in one transaction. Rows are immutable, so replacement is a delete
    /// of the old set followed by inserts of the reconciled set.
    pub async fn replace_for(
        conn: &mut PgConnection,
        related_type: &str,
        related_id: Id,
        attachments: &[AttachmentRecord],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM attachments WHERE related_type = $1 AND related_id = $2")
            .bind(related_type)
            .bind(related_id)
            .execute(&mut *conn)
            .await?;

        for record in attachments {
            sqlx::query(
                "INSERT INTO attachments
                     (id, filename, original_name, mime_type, size_bytes, url,
                      related_id, related_type, uploaded_at)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
            )
            .bind(record.id)
            .bind(&record.filename)
            .bind(&record.original_name)
            .bind(&record.mime_type)
            .bind(record.size)
            .bind(&record.url)
            .bind(record.related_id)
            .bind(record.related_type.as_str())
            .bind(record.uploaded_at)
            .execute(&mut *conn)
            .await?;
        }

        Ok(())
    }

    /// Delete every attachment belonging to a parent. Returns the number of
    /// rows removed.
    pub async fn delete_for(
        conn: &mut PgConnection,
        related_type: &str,
        related_id: Id,
    ) -> Result<u64, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM attachments WHERE related_type = $1 AND related_id = $2")
                .bind(related_type)
                .bind(related_id)
                .execute(&mut *conn)
                .await?;
        Ok(result.rows_affected())
    }
}
