//! ocd - a boulder and problem catalog served over a JSON HTTP API
//!
//! Boulders can be listed through a small spatial selector language
//! (`rect[...]`, `circle[...]`, `sector[...]`), fetched with their problems,
//! and added one at a time.

pub mod api;
pub mod catalog;
pub mod cli;
pub mod http_server;
pub mod observability;
pub mod selector;
pub mod validation;
