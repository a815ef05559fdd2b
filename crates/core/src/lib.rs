//! Domain types and pure logic for the CTeI Nexus research portal.
//!
//! This crate has no I/O: it holds the entity enumerations, the form
//! validation layer, and the attachment reconciler. Persistence lives in
//! `ctei-db`, scoring in `ctei-scoring`, and HTTP in `ctei-api`.

pub mod attachments;
pub mod error;
pub mod product_type;
pub mod roles;
pub mod status;
pub mod types;
pub mod validation;
