//! Repository for the `products` table.

use ctei_core::attachments::{AttachmentRecord, RelatedType};
use ctei_core::types::Id;
use sqlx::PgPool;

use crate::models::product::{NewProduct, Product, ProductPatch};
use crate::repositories::AttachmentRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, project_id, titulo, descripcion, product_type, is_public, version, created_at, updated_at";

/// Provides CRUD operations for products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product together with its reconciled attachment set,
    /// in one transaction. Returns the created row.
    pub async fn create(
        pool: &PgPool,
        input: &NewProduct,
        attachments: &[AttachmentRecord],
    ) -> Result<Product, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO products (id, project_id, titulo, descripcion, product_type, is_public)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let product = sqlx::query_as::<_, Product>(&query)
            .bind(input.id)
            .bind(input.project_id)
            .bind(&input.titulo)
            .bind(&input.descripcion)
            .bind(&input.product_type)
            .bind(input.is_public)
            .fetch_one(&mut *tx)
            .await?;

        AttachmentRepo::replace_for(&mut tx, RelatedType::Product.as_str(), product.id, attachments)
            .await?;

        tx.commit().await?;
        Ok(product)
    }

    /// Find a product by its ID.
    pub async fn find_by_id(pool: &PgPool, id: Id) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a product that belongs to the stated project. A product that
    /// exists under a different project is a not-found condition.
    pub async fn find_in_project(
        pool: &PgPool,
        project_id: Id,
        id: Id,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1 AND project_id = $2");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's products, oldest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: Id,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM products WHERE project_id = $1 ORDER BY created_at, id");
        sqlx::query_as::<_, Product>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// List all products ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products ORDER BY created_at DESC, id");
        sqlx::query_as::<_, Product>(&query).fetch_all(pool).await
    }

    /// Apply a validated submission to an existing product of the stated
    /// project and replace its attachment set, in one transaction.
    ///
    /// Returns `None` when no row matches id + project + expected version;
    /// callers distinguish not-found from a version conflict by
    /// re-fetching.
    pub async fn update_submission(
        pool: &PgPool,
        project_id: Id,
        id: Id,
        expected_version: i64,
        patch: &ProductPatch,
        attachments: &[AttachmentRecord],
    ) -> Result<Option<Product>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE products SET
                titulo = $4,
                descripcion = $5,
                product_type = $6,
                is_public = $7,
                version = version + 1,
                updated_at = NOW()
             WHERE id = $1 AND project_id = $2 AND version = $3
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(project_id)
            .bind(expected_version)
            .bind(&patch.titulo)
            .bind(&patch.descripcion)
            .bind(&patch.product_type)
            .bind(patch.is_public)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(product) = updated else {
            return Ok(None);
        };

        AttachmentRepo::replace_for(&mut tx, RelatedType::Product.as_str(), product.id, attachments)
            .await?;

        tx.commit().await?;
        Ok(Some(product))
    }

    /// Permanently delete a product of the stated project together with its
    /// attachments. Returns `true` if a row was removed.
    pub async fn delete_in_project(
        pool: &PgPool,
        project_id: Id,
        id: Id,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        AttachmentRepo::delete_for(&mut tx, RelatedType::Product.as_str(), id).await?;

        let result = sqlx::query("DELETE FROM products WHERE id = $1 AND project_id = $2")
            .bind(id)
            .bind(project_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
