//! # HTTP Server Module
//!
//! Serves the catalog API over axum.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/boulder`, `/boulder/<id>`, `/boulder/add`, `/problem/add` - Catalog API

pub mod config;
pub mod observability_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use server::HttpServer;
