use std::sync::Arc;

use ctei_events::InvalidationBus;
use ctei_scoring::ScoringOracle;

use crate::config::ServerConfig;
use crate::uploads::UploadStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: ctei_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Scoring oracle consulted by the project workflow.
    pub oracle: Arc<dyn ScoringOracle>,
    /// View-invalidation bus; the rendering layer subscribes.
    pub invalidations: Arc<InvalidationBus>,
    /// Attachment byte storage.
    pub uploads: UploadStore,
}
