//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - Plain insert/patch DTOs built by the workflow layer
//!
//! API responses serialize rows with camelCase keys, matching the portal's
//! wire format.

pub mod attachment;
pub mod dashboard;
pub mod product;
pub mod project;
pub mod user;
