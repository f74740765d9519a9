//! # Boulder Selectors
//!
//! A small query language for picking boulders by location:
//! `rect[...]`, `circle[...]` and `sector[...]`. Parsing lives in
//! [`grammar`], evaluation in [`filter`]. Both are pure and stateless.

pub mod errors;
pub mod filter;
pub mod grammar;

pub use errors::{SelectorError, SelectorResult};
pub use filter::{Located, Selector};
pub use grammar::parse_selector;
