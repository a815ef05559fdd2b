//! View-invalidation signalling for the CTeI Nexus portal.
//!
//! After a mutation persists, the workflow publishes the logical view keys
//! whose cached representations are now stale. The rendering layer (or any
//! other interested party) subscribes and recomputes; publication is
//! fire-and-forget and never affects the persisted write.

pub mod bus;

pub use bus::{InvalidationBus, ViewInvalidation};

/// Logical view-key names and constructors.
pub mod views {
    use ctei_core::types::Id;

    pub const PROJECT_LIST: &str = "project-list";
    pub const PRODUCT_LIST: &str = "product-list";
    pub const DASHBOARD: &str = "dashboard";

    pub fn project_detail(id: Id) -> String {
        format!("project-detail:{id}")
    }

    pub fn product_detail(id: Id) -> String {
        format!("product-detail:{id}")
    }
}
