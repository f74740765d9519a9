//! Observability for the catalog service
//!
//! Structured JSON logging only. Logging never fails a request.
//!
//! # Usage
//!
//! ```ignore
//! use ocd::observability::Logger;
//!
//! Logger::info("BOULDER_ADDED", &[("boulder_id", "4")]);
//! ```

mod logger;

pub use logger::{Logger, Severity};
