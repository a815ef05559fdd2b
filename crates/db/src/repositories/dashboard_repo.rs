//! Aggregate queries for the dashboard view.

use sqlx::PgPool;

use crate::models::dashboard::{DashboardSummary, StatusCount};

/// Provides the portal-wide aggregate summary.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Compute the dashboard summary in one round of aggregate queries.
    pub async fn summary(pool: &PgPool) -> Result<DashboardSummary, sqlx::Error> {
        let by_estado = sqlx::query_as::<_, StatusCount>(
            "SELECT estado, COUNT(*) AS count FROM projects GROUP BY estado ORDER BY estado",
        )
        .fetch_all(pool)
        .await?;

        let total_projects: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM projects")
            .fetch_one(pool)
            .await?;

        let total_products: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(pool)
            .await?;

        let average_ai_score: Option<f64> =
            sqlx::query_scalar("SELECT AVG(ai_score)::DOUBLE PRECISION FROM projects")
                .fetch_one(pool)
                .await?;

        Ok(DashboardSummary {
            total_projects,
            total_products,
            by_estado,
            average_ai_score,
        })
    }
}
