//! Well-known user role literals.
//!
//! These must match the CHECK constraint and seed data in
//! `20260301000001_create_users_table.sql`.

pub const ROLE_ADMINISTRADOR: &str = "ADMINISTRADOR";
pub const ROLE_INVESTIGADOR: &str = "INVESTIGADOR";
pub const ROLE_COMUNIDAD: &str = "COMUNIDAD";
