#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Entity ids arrive as raw strings from clients; an unparseable id is
    /// the same not-found condition as a missing row.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
