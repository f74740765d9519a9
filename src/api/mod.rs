//! # Catalog HTTP API
//!
//! JSON endpoints over the catalog:
//!
//! - `GET /boulder?q=<selector>&problems=<bool>`
//! - `GET /boulder/<id>`
//! - `POST /boulder/add`
//! - `POST /problem/add`
//!
//! Every request is checked against its endpoint's [`ArgSchema`] before the
//! handler runs. Answers use the `{ok, ...}` [`Envelope`].
//!
//! [`ArgSchema`]: crate::validation::ArgSchema

pub mod envelope;
pub mod errors;
pub mod handlers;
pub mod routes;

pub use envelope::{verify, Envelope};
pub use errors::{ApiError, ApiResult};
pub use routes::{catalog_routes, CatalogState};
