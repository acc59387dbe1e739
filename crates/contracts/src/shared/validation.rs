//! Client-side validation errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One or more mandatory fields are missing or blank
    #[error("Campos obligatorios faltantes: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// A numeric form field could not be parsed
    #[error("Valor inválido para {field}: '{value}'")]
    InvalidNumber { field: String, value: String },

    /// The form does not know the field
    #[error("Campo desconocido: {0}")]
    UnknownField(String),
}

/// Check that every `(label, value)` pair has a non-blank value.
pub fn require_fields(fields: &[(&str, String)]) -> Result<(), ValidationError> {
    let missing: Vec<String> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(label, _)| label.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingFields(missing))
    }
}
