//! Form validation for project and product submissions.
//!
//! The input is the raw field-name → string mapping of a submitted form.
//! Every rule runs; failures are collected into one [`FieldErrors`] map
//! keyed by the submitted field name, so a client can render all problems
//! at once. On success the raw strings normalize into a strongly-typed
//! record ready for scoring and persistence.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::product_type::ProductType;
use crate::status::ProjectStatus;

/// Fixed top-level message returned with any field-validation failure.
pub const INVALID_FORM_MESSAGE: &str = "Error: revisa los campos del formulario.";

/// Minimum `titulo` length for a project.
pub const PROJECT_TITLE_MIN_CHARS: usize = 10;

/// Minimum `resumen` length for a project.
pub const PROJECT_ABSTRACT_MIN_CHARS: usize = 50;

/// Minimum `entidadProponente` length.
pub const PROPOSING_ENTITY_MIN_CHARS: usize = 3;

/// Minimum `titulo` length for a product.
pub const PRODUCT_TITLE_MIN_CHARS: usize = 5;

/// Minimum `descripcion` length for a product.
pub const PRODUCT_DESCRIPTION_MIN_CHARS: usize = 10;

/// Raw submitted form fields, keyed by field name.
pub type RawFields = BTreeMap<String, String>;

/// Aggregate validation failure: field name → human-readable messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one message against a field.
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields that have at least one error.
    pub fn field_count(&self) -> usize {
        self.0.len()
    }

    /// Messages recorded for a field, if any.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }
}

/// A project submission that passed every rule.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedProject {
    pub titulo: String,
    pub resumen: String,
    /// `None` when the form omitted the budget; never zero.
    pub presupuesto: Option<f64>,
    pub estado: ProjectStatus,
    pub entidad_proponente: String,
    pub is_public: bool,
    pub description: Option<String>,
    /// Raw id of the lead investigator, resolved against the user store by
    /// the workflow; absent when the form carried none.
    pub lead_investigator_id: Option<String>,
}

/// A product submission that passed every rule.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedProduct {
    pub titulo: String,
    pub descripcion: String,
    pub product_type: ProductType,
    pub is_public: bool,
    /// Raw id of the owning project. Kept as a string: resolution happens
    /// in the workflow, where an unresolvable id is a not-found condition
    /// rather than a field error.
    pub project_id: String,
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// A field value that is present and non-empty, or `None`.
fn non_empty<'a>(fields: &'a RawFields, name: &str) -> Option<&'a str> {
    fields.get(name).map(String::as_str).filter(|s| !s.is_empty())
}

/// Checkbox-style boolean: `"on"`, `"true"` and `"1"` are true, anything
/// else (including absence) is false.
fn parse_bool(fields: &RawFields, name: &str) -> bool {
    matches!(non_empty(fields, name), Some("on") | Some("true") | Some("1"))
}

/// Validate a raw project form.
///
/// Runs every rule and returns all failures together; on success the
/// normalized record's values match the accepted inputs exactly.
pub fn validate_project_form(fields: &RawFields) -> Result<ValidatedProject, FieldErrors> {
    let mut errors = FieldErrors::new();

    let titulo = fields.get("titulo").cloned().unwrap_or_default();
    if char_len(&titulo) < PROJECT_TITLE_MIN_CHARS {
        errors.push(
            "titulo",
            format!("Título debe tener al menos {PROJECT_TITLE_MIN_CHARS} caracteres"),
        );
    }

    let resumen = fields.get("resumen").cloned().unwrap_or_default();
    if char_len(&resumen) < PROJECT_ABSTRACT_MIN_CHARS {
        errors.push(
            "resumen",
            format!("Resumen debe tener al menos {PROJECT_ABSTRACT_MIN_CHARS} caracteres"),
        );
    }

    // Empty or absent coerces to "not provided" — never to zero, never to
    // an error. A non-empty value must parse to a strictly positive number.
    let presupuesto = match non_empty(fields, "presupuesto") {
        None => None,
        Some(raw) => match raw.parse::<f64>() {
            Ok(value) if value.is_finite() && value > 0.0 => Some(value),
            _ => {
                errors.push("presupuesto", "El presupuesto debe ser un número positivo");
                None
            }
        },
    };

    let estado = match ProjectStatus::from_str(
        fields.get("estado").map(String::as_str).unwrap_or(""),
    ) {
        Ok(estado) => Some(estado),
        Err(_) => {
            errors.push("estado", "Estado inválido");
            None
        }
    };

    let entidad_proponente = fields
        .get("entidadProponente")
        .cloned()
        .unwrap_or_default();
    if char_len(&entidad_proponente) < PROPOSING_ENTITY_MIN_CHARS {
        errors.push("entidadProponente", "Entidad proponente requerida");
    }

    let is_public = parse_bool(fields, "isPublic");
    let description = non_empty(fields, "description").map(str::to_string);
    let lead_investigator_id =
        non_empty(fields, "leadInvestigatorId").map(str::to_string);

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ValidatedProject {
        titulo,
        resumen,
        presupuesto,
        // Membership was checked above; `estado` is present on the Ok path.
        estado: estado.unwrap_or(ProjectStatus::Propuesto),
        entidad_proponente,
        is_public,
        description,
        lead_investigator_id,
    })
}

/// Validate a raw product form.
pub fn validate_product_form(fields: &RawFields) -> Result<ValidatedProduct, FieldErrors> {
    let mut errors = FieldErrors::new();

    let titulo = fields.get("titulo").cloned().unwrap_or_default();
    if char_len(&titulo) < PRODUCT_TITLE_MIN_CHARS {
        errors.push(
            "titulo",
            format!("Título debe tener al menos {PRODUCT_TITLE_MIN_CHARS} caracteres"),
        );
    }

    let descripcion = fields.get("descripcion").cloned().unwrap_or_default();
    if char_len(&descripcion) < PRODUCT_DESCRIPTION_MIN_CHARS {
        errors.push(
            "descripcion",
            format!("Descripción debe tener al menos {PRODUCT_DESCRIPTION_MIN_CHARS} caracteres"),
        );
    }

    let product_type = match ProductType::from_str(
        fields.get("productType").map(String::as_str).unwrap_or(""),
    ) {
        Ok(t) => Some(t),
        Err(_) => {
            errors.push("productType", "Tipo de producto inválido");
            None
        }
    };

    let is_public = parse_bool(fields, "isPublic");

    let project_id = fields.get("projectId").cloned().unwrap_or_default();
    if project_id.is_empty() {
        errors.push("projectId", "Proyecto asociado requerido");
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ValidatedProduct {
        titulo,
        descripcion,
        product_type: product_type.unwrap_or(ProductType::ArtOpenA1),
        is_public,
        project_id,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
