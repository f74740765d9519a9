//! # Selector Grammar
//!
//! Parses the `q` argument of the boulder listing into a [`Selector`].
//!
//! ```text
//! rect[min_lat, min_lon, max_lat, max_lon]
//! circle[lat, lon, diameter]
//! sector[id]
//! ```
//!
//! Every form is tried in turn and a later match replaces an earlier one.
//! The keywords are textually disjoint, so at most one form can match.

use std::str::FromStr;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use super::errors::{SelectorError, SelectorResult};
use super::filter::Selector;

/// Selector forms, in the order they are tried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Form {
    Rect,
    Sector,
    Circle,
}

impl Form {
    const ALL: [Form; 3] = [Form::Rect, Form::Sector, Form::Circle];

    fn pattern(self) -> &'static Regex {
        static RECT: OnceLock<Regex> = OnceLock::new();
        static SECTOR: OnceLock<Regex> = OnceLock::new();
        static CIRCLE: OnceLock<Regex> = OnceLock::new();

        match self {
            Form::Rect => RECT.get_or_init(|| compile(r"^rect\[(.*),(.*),(.*),(.*)\]")),
            Form::Sector => SECTOR.get_or_init(|| compile(r"^sector\[\s*(\d+)\s*\]")),
            Form::Circle => CIRCLE.get_or_init(|| compile(r"^circle\[(.*),(.*),(.*)\]")),
        }
    }

    fn build(self, caps: &Captures<'_>, query: &str) -> SelectorResult<Selector> {
        let field = |i: usize| caps.get(i).map_or("", |m| m.as_str());

        Ok(match self {
            Form::Rect => Selector::Rect {
                min_lat: parse_float(field(1), query)?,
                min_lon: parse_float(field(2), query)?,
                max_lat: parse_float(field(3), query)?,
                max_lon: parse_float(field(4), query)?,
            },
            Form::Sector => Selector::Sector(parse_sector(field(1), query)?),
            Form::Circle => Selector::Circle {
                lat: parse_float(field(1), query)?,
                lon: parse_float(field(2), query)?,
                diameter: parse_float(field(3), query)?,
            },
        })
    }
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("selector pattern must compile")
}

/// Parse an optional `q` argument.
///
/// `None` selects every record. Any supplied string must match one of the
/// selector forms, including the empty string, which matches none.
pub fn parse_selector(query: Option<&str>) -> SelectorResult<Selector> {
    let query = match query {
        Some(query) => query,
        None => return Ok(Selector::All),
    };

    let mut selector = None;
    for form in Form::ALL {
        if let Some(caps) = form.pattern().captures(query) {
            selector = Some(form.build(&caps, query)?);
        }
    }

    selector.ok_or_else(|| SelectorError::UnknownSelector(query.to_string()))
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_selector(Some(s))
    }
}

/// Parse a float field; surrounding whitespace is allowed
fn parse_float(raw: &str, query: &str) -> SelectorResult<f64> {
    raw.trim().parse().map_err(|_| malformed(raw, query))
}

/// Parse a sector id (digits only, already checked by the pattern)
fn parse_sector(raw: &str, query: &str) -> SelectorResult<i64> {
    raw.parse().map_err(|_| malformed(raw, query))
}

fn malformed(raw: &str, query: &str) -> SelectorError {
    SelectorError::MalformedSelectorArgument {
        argument: raw.to_string(),
        query: query.to_string(),
    }
}
