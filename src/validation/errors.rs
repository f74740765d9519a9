//! # Validation Errors
//!
//! Error types for request argument validation.

use thiserror::Error;

use super::types::ArgType;

/// Result type for argument validation
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Argument validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// An argument could not be coerced to its declared type
    #[error("invalid type of argument {name}, {expected} required")]
    InvalidArgumentType { name: String, expected: ArgType },

    /// An argument is declared in neither the required nor the optional schema
    #[error("argument {0} not allowed")]
    UnexpectedArgument(String),

    /// Required arguments that were never received, in schema order
    #[error("arguments {} required but not passed", .0.join(", "))]
    MissingArguments(Vec<String>),
}
