//! # Selector Errors
//!
//! Error types for parsing the boulder selector language.

use thiserror::Error;

/// Result type for selector parsing
pub type SelectorResult<T> = Result<T, SelectorError>;

/// Selector parsing errors
///
/// Both variants are recoverable: the listing handler turns them into a
/// failure envelope instead of aborting the request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// The query matched none of the `rect`, `circle` or `sector` forms
    #[error("unknown select query {0}")]
    UnknownSelector(String),

    /// A selector form matched but one of its fields is not a number
    #[error("malformed argument '{argument}' in select query {query}")]
    MalformedSelectorArgument { argument: String, query: String },
}
