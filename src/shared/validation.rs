//! Validation Utilities

use validator::ValidationErrors;

use super::error::{AppError, FieldError};

/// Flatten validation errors into field errors, sorted by field name.
///
/// Every violation is kept, not only the first one per field.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut field_errors: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| FieldError {
                field: field.to_string(),
                message: e
                    .message
                    .clone()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string()),
            })
        })
        .collect();

    field_errors.sort_by(|a, b| a.field.cmp(&b.field));
    field_errors
}

/// Convert validation errors to AppError
pub fn validation_error(errors: ValidationErrors) -> AppError {
    AppError::Validation(field_errors(&errors))
}
