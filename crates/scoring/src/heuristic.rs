//! Deterministic local scoring.
//!
//! Scores a proposal from a handful of conditional additions over the
//! field lengths and budget thresholds. Useful for development and tests,
//! and as the fallback when no assistant endpoint is configured. Always
//! produces an in-bounds score.

use crate::assessment::{Assessment, ProposalInput};
use crate::{OracleError, ScoringOracle};

/// Budget below which a proposal is considered modest and efficient.
const MODEST_BUDGET: f64 = 500_000.0;

/// Budget above which feasibility concerns start to weigh on the score.
const LARGE_BUDGET: f64 = 2_000_000.0;

/// Deterministic heuristic scorer.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicScoringOracle;

impl HeuristicScoringOracle {
    pub fn new() -> Self {
        Self
    }

    fn score(input: &ProposalInput) -> i32 {
        let mut score = 40;

        if input.title.chars().count() >= 15 {
            score += 5;
        }
        if input.abstract_text.chars().count() >= 120 {
            score += 15;
        } else if input.abstract_text.chars().count() >= 80 {
            score += 8;
        }
        if !input.description.is_empty() {
            score += 10;
        }
        if input.description.chars().count() >= 200 {
            score += 5;
        }
        if input.budget > 0.0 && input.budget <= MODEST_BUDGET {
            score += 15;
        } else if input.budget > MODEST_BUDGET && input.budget <= LARGE_BUDGET {
            score += 10;
        } else if input.budget > LARGE_BUDGET {
            score += 5;
        }

        score.clamp(0, 100)
    }

    fn recommendations(input: &ProposalInput) -> String {
        let mut suggestions = Vec::new();
        if input.budget <= 0.0 {
            suggestions.push("Especifica un presupuesto estimado para la propuesta.");
        }
        if input.description.chars().count() < 200 {
            suggestions.push("Amplía la descripción metodológica del proyecto.");
        }
        if input.abstract_text.chars().count() < 120 {
            suggestions.push("Extiende el resumen con objetivos medibles.");
        }
        if suggestions.is_empty() {
            return "La propuesta está completa; considera añadir un análisis de impacto preliminar.".to_string();
        }
        suggestions
            .iter()
            .enumerate()
            .map(|(i, s)| format!("{}. {s}", i + 1))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[async_trait::async_trait]
impl ScoringOracle for HeuristicScoringOracle {
    async fn assess(&self, input: &ProposalInput) -> Result<Assessment, OracleError> {
        let score = Self::score(input);

        let summary = format!(
            "Propuesta '{}' presentada con un presupuesto de {}.",
            input.title,
            if input.budget > 0.0 {
                format!("{:.0}", input.budget)
            } else {
                "monto sin especificar".to_string()
            }
        );

        let rationale = format!(
            "El puntaje de {score} refleja la completitud de la propuesta: \
             resumen de {} caracteres, descripción {} y presupuesto {}.",
            input.abstract_text.chars().count(),
            if input.description.is_empty() {
                "ausente"
            } else {
                "presente"
            },
            if input.budget > 0.0 {
                "definido"
            } else {
                "sin definir"
            },
        );

        Ok(Assessment {
            score,
            summary,
            rationale,
            recommendations: Self::recommendations(input),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
