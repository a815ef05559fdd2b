//! Repository for the `projects` table.

use ctei_core::attachments::{AttachmentRecord, RelatedType};
use ctei_core::types::Id;
use sqlx::PgPool;

use crate::models::project::{NewProject, Project, ProjectPatch};
use crate::repositories::AttachmentRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, titulo, resumen, presupuesto, estado, entidad_proponente, plazo, \
     is_public, description, lead_investigator_id, ai_score, ai_summary, ai_rationale, \
     ai_recommendations, version, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project together with its reconciled attachment set,
    /// in one transaction. Returns the created row.
    pub async fn create(
        pool: &PgPool,
        input: &NewProject,
        attachments: &[AttachmentRecord],
    ) -> Result<Project, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO projects
                 (id, titulo, resumen, presupuesto, estado, entidad_proponente, plazo,
                  is_public, description, lead_investigator_id,
                  ai_score, ai_summary, ai_rationale, ai_recommendations)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(input.id)
            .bind(&input.titulo)
            .bind(&input.resumen)
            .bind(input.presupuesto)
            .bind(&input.estado)
            .bind(&input.entidad_proponente)
            .bind(input.plazo)
            .bind(input.is_public)
            .bind(&input.description)
            .bind(input.lead_investigator_id)
            .bind(input.assessment.ai_score)
            .bind(&input.assessment.ai_summary)
            .bind(&input.assessment.ai_rationale)
            .bind(&input.assessment.ai_recommendations)
            .fetch_one(&mut *tx)
            .await?;

        AttachmentRepo::replace_for(&mut tx, RelatedType::Project.as_str(), project.id, attachments)
            .await?;

        tx.commit().await?;
        Ok(project)
    }

    /// Find a project by its ID.
    pub async fn find_by_id(pool: &PgPool, id: Id) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all projects ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY created_at DESC, id");
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }

    /// Apply a validated submission to an existing project and replace its
    /// attachment set, in one transaction.
    ///
    /// The row must still carry `expected_version`: a concurrent writer
    /// bumps the counter and this call then returns `None` without
    /// touching anything. `None` is also returned when no row with the
    /// given `id` exists; callers distinguish the two by re-fetching.
    ///
    /// `created_at`, `plazo` and `lead_investigator_id` are never written
    /// by this statement.
    pub async fn update_submission(
        pool: &PgPool,
        id: Id,
        expected_version: i64,
        patch: &ProjectPatch,
        attachments: &[AttachmentRecord],
    ) -> Result<Option<Project>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE projects SET
                titulo = $3,
                resumen = $4,
                presupuesto = $5,
                estado = $6,
                entidad_proponente = $7,
                is_public = $8,
                description = $9,
                ai_score = $10,
                ai_summary = $11,
                ai_rationale = $12,
                ai_recommendations = $13,
                version = version + 1,
                updated_at = NOW()
             WHERE id = $1 AND version = $2
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(expected_version)
            .bind(&patch.titulo)
            .bind(&patch.resumen)
            .bind(patch.presupuesto)
            .bind(&patch.estado)
            .bind(&patch.entidad_proponente)
            .bind(patch.is_public)
            .bind(&patch.description)
            .bind(patch.assessment.ai_score)
            .bind(&patch.assessment.ai_summary)
            .bind(&patch.assessment.ai_rationale)
            .bind(&patch.assessment.ai_recommendations)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(project) = updated else {
            return Ok(None);
        };

        AttachmentRepo::replace_for(&mut tx, RelatedType::Project.as_str(), project.id, attachments)
            .await?;

        tx.commit().await?;
        Ok(Some(project))
    }

    /// Permanently delete a project, cascading to its products and every
    /// related attachment. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: Id) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // Attachment rows are polymorphic, so both parents' sets are
        // cleared here; the products themselves go via ON DELETE CASCADE.
        sqlx::query(
            "DELETE FROM attachments
             WHERE related_type = 'PRODUCT'
               AND related_id IN (SELECT id FROM products WHERE project_id = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        AttachmentRepo::delete_for(&mut tx, RelatedType::Project.as_str(), id).await?;

        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::debug!(project_id = %id, "Project deleted with cascade");
        }
        Ok(deleted)
    }
}
