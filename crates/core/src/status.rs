//! Project lifecycle states.
//!
//! Any state may follow any other: the portal does not enforce a transition
//! table on `estado` (the stored literals are only membership-checked, here
//! and by the database CHECK constraint).

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Lifecycle state of a project proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    Propuesto,
    EnCurso,
    Finalizado,
    Cancelado,
}

/// All valid `estado` literals, as stored and as submitted by forms.
pub const VALID_STATUS_STRINGS: &[&str] =
    &["PROPUESTO", "EN_CURSO", "FINALIZADO", "CANCELADO"];

impl ProjectStatus {
    /// Return the status as its stored string literal.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Propuesto => "PROPUESTO",
            Self::EnCurso => "EN_CURSO",
            Self::Finalizado => "FINALIZADO",
            Self::Cancelado => "CANCELADO",
        }
    }

    /// Parse a status from its stored string literal.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "PROPUESTO" => Ok(Self::Propuesto),
            "EN_CURSO" => Ok(Self::EnCurso),
            "FINALIZADO" => Ok(Self::Finalizado),
            "CANCELADO" => Ok(Self::Cancelado),
            _ => Err(CoreError::Validation(format!(
                "Invalid estado '{s}'. Must be one of: {}",
                VALID_STATUS_STRINGS.join(", ")
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
