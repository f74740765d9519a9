//! Argument type definitions
//!
//! Supported types:
//! - str: any string, taken as is
//! - float: 64-bit floating point
//! - int: 64-bit signed integer
//! - bool: flag words (`1/true/yes/on`, `0/false/no/off`, empty)

use std::fmt;

/// Declared type of a request argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgType {
    Str,
    Float,
    Int,
    Bool,
}

impl ArgType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            ArgType::Str => "str",
            ArgType::Float => "float",
            ArgType::Int => "int",
            ArgType::Bool => "bool",
        }
    }

    /// Convert a raw argument string to this type.
    ///
    /// Returns `None` when the string is not a valid value of the type.
    pub fn coerce(&self, raw: &str) -> Option<ArgValue> {
        match self {
            ArgType::Str => Some(ArgValue::Str(raw.to_string())),
            ArgType::Float => coerce_float(raw).map(ArgValue::Float),
            ArgType::Int => coerce_int(raw).map(ArgValue::Int),
            ArgType::Bool => coerce_bool(raw).map(ArgValue::Bool),
        }
    }
}

impl fmt::Display for ArgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// A coerced argument value
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Str(String),
    Float(f64),
    Int(i64),
    Bool(bool),
}

impl ArgValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ArgValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ArgValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ArgValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The type this value was coerced to
    pub fn arg_type(&self) -> ArgType {
        match self {
            ArgValue::Str(_) => ArgType::Str,
            ArgValue::Float(_) => ArgType::Float,
            ArgValue::Int(_) => ArgType::Int,
            ArgValue::Bool(_) => ArgType::Bool,
        }
    }
}

/// Parse a finite float, ignoring surrounding whitespace.
///
/// `inf` and `nan` are rejected: JSON has no encoding for them.
pub fn coerce_float(raw: &str) -> Option<f64> {
    raw.trim().parse().ok().filter(|f: &f64| f.is_finite())
}

/// Parse a base-10 integer, ignoring surrounding whitespace
pub fn coerce_int(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

/// Parse a flag word, case-insensitive
pub fn coerce_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
