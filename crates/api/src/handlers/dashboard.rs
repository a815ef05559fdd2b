//! Dashboard widget data.

use axum::extract::State;
use axum::Json;
use ctei_db::models::dashboard::DashboardSummary;
use ctei_db::repositories::DashboardRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/dashboard/summary
///
/// Project counts by estado, entity totals, and the mean live AI score.
pub async fn summary(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<DashboardSummary>>> {
    let summary = DashboardRepo::summary(&state.pool).await?;
    Ok(Json(DataResponse { data: summary }))
}
