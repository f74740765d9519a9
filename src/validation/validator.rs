//! Request argument validator
//!
//! Validation semantics:
//! - Every required argument is present and coerces to its declared type
//! - Optional arguments, when present, coerce to their declared type
//! - No undeclared arguments exist
//! - A repeated argument name keeps its first value
//!
//! The validator knows nothing about endpoints; each route declares an
//! [`ArgSchema`] and hands it the arguments it received.

use std::collections::{HashMap, HashSet};

use super::errors::{ValidationError, ValidationResult};
use super::types::{ArgType, ArgValue};

/// Declared arguments of one endpoint, in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgSchema {
    pub required: &'static [(&'static str, ArgType)],
    pub optional: &'static [(&'static str, ArgType)],
}

impl ArgSchema {
    /// Schema of an endpoint that takes no arguments
    pub const EMPTY: ArgSchema = ArgSchema::new(&[], &[]);

    pub const fn new(
        required: &'static [(&'static str, ArgType)],
        optional: &'static [(&'static str, ArgType)],
    ) -> Self {
        Self { required, optional }
    }

    fn optional_type(&self, name: &str) -> Option<ArgType> {
        self.optional
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, tp)| *tp)
    }

    /// Validate and coerce received arguments against this schema.
    ///
    /// Fails on the first argument that is undeclared or of the wrong type;
    /// after all arguments are seen, fails if any required one is missing.
    pub fn validate<I, K, V>(&self, received: I) -> ValidationResult<ValidArgs>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut owed: Vec<(&'static str, ArgType)> = self.required.to_vec();
        let mut seen = HashSet::new();
        let mut values = HashMap::new();

        for (name, raw) in received {
            let name = name.as_ref();
            if !seen.insert(name.to_string()) {
                continue;
            }

            let expected = if let Some(pos) = owed.iter().position(|(n, _)| *n == name) {
                owed.remove(pos).1
            } else if let Some(tp) = self.optional_type(name) {
                tp
            } else {
                return Err(ValidationError::UnexpectedArgument(name.to_string()));
            };

            let value = expected.coerce(raw.as_ref()).ok_or_else(|| {
                ValidationError::InvalidArgumentType {
                    name: name.to_string(),
                    expected,
                }
            })?;
            values.insert(name.to_string(), value);
        }

        if !owed.is_empty() {
            return Err(ValidationError::MissingArguments(
                owed.iter().map(|(n, _)| n.to_string()).collect(),
            ));
        }

        Ok(ValidArgs { values })
    }
}

/// Arguments that passed validation, already coerced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidArgs {
    values: HashMap<String, ArgValue>,
}

impl ValidArgs {
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values.get(name)
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ArgValue::as_str)
    }

    pub fn float(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(ArgValue::as_f64)
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(ArgValue::as_i64)
    }

    pub fn bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(ArgValue::as_bool)
    }

    /// Typed access to a required argument
    pub fn require_str(&self, name: &str) -> ValidationResult<&str> {
        self.str(name).ok_or_else(|| missing(name))
    }

    pub fn require_float(&self, name: &str) -> ValidationResult<f64> {
        self.float(name).ok_or_else(|| missing(name))
    }

    pub fn require_int(&self, name: &str) -> ValidationResult<i64> {
        self.int(name).ok_or_else(|| missing(name))
    }
}

fn missing(name: &str) -> ValidationError {
    ValidationError::MissingArguments(vec![name.to_string()])
}
