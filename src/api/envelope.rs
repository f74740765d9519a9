//! # Response Envelope
//!
//! Every endpoint answers with a JSON object carrying an `ok` flag:
//!
//! - success: `{"ok": true, "<field>": <value>}`
//! - failure: `{"ok": false, "error": "<message>"}`
//!
//! The body is always followed by a newline.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::{Map, Value};

use super::errors::{ApiError, ApiResult};
use crate::observability::Logger;
use crate::validation::{ArgSchema, ValidArgs};

/// A JSON envelope plus the status it is sent with
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    status: StatusCode,
    body: Map<String, Value>,
}

impl Envelope {
    /// Success envelope with a single payload field
    pub fn field<T: Serialize>(name: &str, value: T) -> ApiResult<Self> {
        let mut body = Map::new();
        body.insert("ok".to_string(), Value::Bool(true));
        body.insert(name.to_string(), serde_json::to_value(value)?);
        Ok(Self {
            status: StatusCode::OK,
            body,
        })
    }

    /// Success envelope under `result`
    pub fn result<T: Serialize>(value: T) -> ApiResult<Self> {
        Self::field("result", value)
    }

    /// Failure envelope for an error
    pub fn failure(err: &ApiError) -> Self {
        let mut body = Map::new();
        body.insert("ok".to_string(), Value::Bool(false));
        body.insert("error".to_string(), Value::String(err.to_string()));
        Self {
            status: err.status_code(),
            body,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn is_ok(&self) -> bool {
        self.body.get("ok") == Some(&Value::Bool(true))
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.body.get(field)
    }

    /// Serialized body with the trailing newline
    pub fn to_text(&self) -> String {
        let mut text = Value::Object(self.body.clone()).to_string();
        text.push('\n');
        text
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            self.to_text(),
        )
            .into_response()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        Envelope::failure(&self).into_response()
    }
}

/// Validate `received` against `schema`, then run `handler` on the coerced
/// arguments.
///
/// The handler is never invoked when validation fails. Any error, from the
/// validator or the handler, becomes a failure envelope.
pub fn verify<I, K, V, F>(route: &str, schema: &ArgSchema, received: I, handler: F) -> Envelope
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
    F: FnOnce(&ValidArgs) -> ApiResult<Envelope>,
{
    let outcome = schema
        .validate(received)
        .map_err(ApiError::from)
        .and_then(|args| handler(&args));

    match outcome {
        Ok(envelope) => envelope,
        Err(err) => {
            let message = err.to_string();
            if err.is_fault() {
                Logger::error("STORE_FAILURE", &[("route", route), ("error", &message)]);
            } else {
                Logger::warn("REQUEST_REJECTED", &[("route", route), ("error", &message)]);
            }
            Envelope::failure(&err)
        }
    }
}
