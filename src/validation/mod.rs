//! # Request Validation
//!
//! Schema-driven validation and coercion of request arguments, shared by
//! every endpoint.

pub mod errors;
pub mod types;
pub mod validator;

pub use errors::{ValidationError, ValidationResult};
pub use types::{ArgType, ArgValue};
pub use validator::{ArgSchema, ValidArgs};
