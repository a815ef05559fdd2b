/// All entity primary keys are UUIDs, assigned by the workflow at creation.
pub type Id = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
