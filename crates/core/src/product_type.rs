//! Derived-product type codes and their human labels.
//!
//! The codes follow the national research-product classification used by
//! the portal; each maps to one Spanish display label.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Classification code of a derived product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductType {
    ArtOpenA1,
    LibA1,
    CapLibA1,
    Pa1,
    Sf,
    Di,
    EmA,
    GenContImp,
    GenContVirt,
    TesDoc,
    TesMaes,
    ProyIdFor,
}

/// Every product type, in catalog order.
pub const ALL_PRODUCT_TYPES: &[ProductType] = &[
    ProductType::ArtOpenA1,
    ProductType::LibA1,
    ProductType::CapLibA1,
    ProductType::Pa1,
    ProductType::Sf,
    ProductType::Di,
    ProductType::EmA,
    ProductType::GenContImp,
    ProductType::GenContVirt,
    ProductType::TesDoc,
    ProductType::TesMaes,
    ProductType::ProyIdFor,
];

impl ProductType {
    /// Return the classification code as stored and submitted.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ArtOpenA1 => "ART_OPEN_A1",
            Self::LibA1 => "LIB_A1",
            Self::CapLibA1 => "CAP_LIB_A1",
            Self::Pa1 => "PA1",
            Self::Sf => "SF",
            Self::Di => "DI",
            Self::EmA => "EM_A",
            Self::GenContImp => "GEN_CONT_IMP",
            Self::GenContVirt => "GEN_CONT_VIRT",
            Self::TesDoc => "TES_DOC",
            Self::TesMaes => "TES_MAES",
            Self::ProyIdFor => "PROY_ID_FOR",
        }
    }

    /// Spanish display label for the code.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ArtOpenA1 => "Artículo A1",
            Self::LibA1 => "Libro A1",
            Self::CapLibA1 => "Capítulo de Libro A1",
            Self::Pa1 => "Patente A1",
            Self::Sf => "Software",
            Self::Di => "Diseño Industrial",
            Self::EmA => "Empresa de Base Tecnológica",
            Self::GenContImp => "Contenido Impreso",
            Self::GenContVirt => "Contenido Virtual",
            Self::TesDoc => "Tesis Doctoral",
            Self::TesMaes => "Tesis de Maestría",
            Self::ProyIdFor => "Proyecto Formativo",
        }
    }

    /// Parse a classification code.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        ALL_PRODUCT_TYPES
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!("Invalid product type code '{s}'"))
            })
    }
}

/// One catalog entry for the `/product-types` listing.
#[derive(Debug, Clone, Serialize)]
pub struct ProductTypeInfo {
    pub code: &'static str,
    pub label: &'static str,
}

/// The full code → label catalog, in stable order.
pub fn catalog() -> Vec<ProductTypeInfo> {
    ALL_PRODUCT_TYPES
        .iter()
        .map(|t| ProductTypeInfo {
            code: t.as_str(),
            label: t.label(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_code_round_trips() {
        for t in ALL_PRODUCT_TYPES {
            assert_eq!(ProductType::from_str(t.as_str()).unwrap(), *t);
        }
    }

    #[test]
    fn every_code_has_a_label() {
        for t in ALL_PRODUCT_TYPES {
            assert!(!t.label().is_empty());
        }
    }

    #[test]
    fn article_code_and_label() {
        assert_eq!(ProductType::ArtOpenA1.as_str(), "ART_OPEN_A1");
        assert_eq!(ProductType::ArtOpenA1.label(), "Artículo A1");
    }

    #[test]
    fn software_code_and_label() {
        assert_eq!(ProductType::Sf.as_str(), "SF");
        assert_eq!(ProductType::Sf.label(), "Software");
    }

    #[test]
    fn unknown_code_rejected() {
        let err = ProductType::from_str("ART_Z9").unwrap_err();
        assert!(err.to_string().contains("Invalid product type code"));
    }

    #[test]
    fn empty_code_rejected() {
        assert!(ProductType::from_str("").is_err());
    }

    #[test]
    fn catalog_covers_all_types() {
        let catalog = catalog();
        assert_eq!(catalog.len(), ALL_PRODUCT_TYPES.len());
        assert!(catalog.iter().any(|e| e.code == "TES_DOC"));
        assert!(catalog.iter().any(|e| e.label == "Patente A1"));
    }
}
