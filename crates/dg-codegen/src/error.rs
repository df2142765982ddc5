//! Error types for the dg-codegen crate.

use dg_core::FieldError;

/// Errors that can occur while rendering a model.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GenerateError {
    /// The model name cannot be used as a Dart class name.
    #[error("invalid model class name '{0}': expected letters, digits, '_' or '$', not starting with a digit")]
    InvalidModelName(String),

    /// There are no fields to forward to the base class constructor.
    #[error("cannot generate '{0}' without any fields")]
    NoFields(String),

    /// A field declaration does not have the `final <type> <name>;` shape.
    #[error("malformed field: {0}")]
    MalformedField(#[from] FieldError),
}
