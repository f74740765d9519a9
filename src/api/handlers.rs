//! # Endpoint Handlers
//!
//! Each handler receives arguments that already passed its schema and talks
//! to the catalog through [`CatalogStore`] only.

use serde::Serialize;

use super::envelope::Envelope;
use super::errors::{ApiError, ApiResult};
use crate::catalog::{Boulder, CatalogStore, NewBoulder, NewProblem, Problem};
use crate::observability::Logger;
use crate::selector::parse_selector;
use crate::validation::{ArgSchema, ArgType, ValidArgs};

// ==================
// Schemas
// ==================

/// `GET /boulder`
pub const LIST_BOULDERS: ArgSchema =
    ArgSchema::new(&[], &[("q", ArgType::Str), ("problems", ArgType::Bool)]);

/// `GET /boulder/<id>`
pub const GET_BOULDER: ArgSchema = ArgSchema::EMPTY;

/// `POST /boulder/add`
pub const ADD_BOULDER: ArgSchema = ArgSchema::new(
    &[
        ("lattitude", ArgType::Float),
        ("longitude", ArgType::Float),
        ("elevation", ArgType::Int),
        ("sector", ArgType::Int),
    ],
    &[("name", ArgType::Str)],
);

/// `POST /problem/add`
pub const ADD_PROBLEM: ArgSchema = ArgSchema::new(
    &[
        ("boulder", ArgType::Int),
        ("name", ArgType::Str),
        ("description", ArgType::Str),
        ("grade", ArgType::Str),
    ],
    &[],
);

// ==================
// Views
// ==================

/// Boulder as rendered in responses
#[derive(Debug, Serialize)]
struct BoulderView<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
    lattitude: f64,
    longitude: f64,
    elevation: i64,
    name: Option<&'a str>,
    sector: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    problems: Option<Vec<ProblemView>>,
}

impl<'a> BoulderView<'a> {
    fn new(boulder: &'a Boulder) -> Self {
        Self {
            id: Some(boulder.id),
            lattitude: boulder.latitude,
            longitude: boulder.longitude,
            elevation: boulder.elevation,
            name: boulder.name.as_deref(),
            sector: boulder.sector,
            problems: None,
        }
    }

    fn without_id(mut self) -> Self {
        self.id = None;
        self
    }

    fn with_problems(mut self, problems: Vec<Problem>) -> Self {
        self.problems = Some(problems.into_iter().map(ProblemView::from).collect());
        self
    }
}

#[derive(Debug, Serialize)]
struct ProblemView {
    name: String,
    description: String,
    grade: String,
}

impl From<Problem> for ProblemView {
    fn from(problem: Problem) -> Self {
        Self {
            name: problem.name,
            description: problem.description,
            grade: problem.grade,
        }
    }
}

// ==================
// Handlers
// ==================

/// List boulders matching the optional `q` selector.
///
/// With `problems=true` every boulder carries its problems; otherwise the
/// key is absent.
pub fn list_boulders(store: &dyn CatalogStore, args: &ValidArgs) -> ApiResult<Envelope> {
    let selector = parse_selector(args.str("q"))?;
    let with_problems = args.bool("problems").unwrap_or(false);

    let boulders = store.boulders()?;
    let mut result = Vec::new();
    for boulder in selector.filter(&boulders) {
        let view = BoulderView::new(boulder);
        let view = if with_problems {
            view.with_problems(store.problems_for(boulder.id)?)
        } else {
            view
        };
        result.push(view);
    }

    Envelope::result(result)
}

/// Fetch one boulder with its problems
pub fn get_boulder(store: &dyn CatalogStore, id: i64, _args: &ValidArgs) -> ApiResult<Envelope> {
    let boulder = store.boulder(id)?.ok_or(ApiError::NotFound(id))?;
    let problems = store.problems_for(id)?;

    Envelope::result(BoulderView::new(&boulder).without_id().with_problems(problems))
}

/// Insert a boulder and return its new id
pub fn add_boulder(store: &dyn CatalogStore, args: &ValidArgs) -> ApiResult<Envelope> {
    let mut row = NewBoulder::new(
        args.require_float("lattitude")?,
        args.require_float("longitude")?,
        args.require_int("elevation")?,
        args.require_int("sector")?,
    );
    if let Some(name) = args.str("name") {
        row = row.with_name(name);
    }

    let id = store.insert_boulder(row)?;
    Logger::info("BOULDER_ADDED", &[("boulder_id", &id.to_string())]);
    Envelope::field("boulder_id", id)
}

/// Insert a problem and return its new id.
///
/// The referenced boulder is not required to exist.
pub fn add_problem(store: &dyn CatalogStore, args: &ValidArgs) -> ApiResult<Envelope> {
    let boulder = args.require_int("boulder")?;
    let row = NewProblem::new(
        boulder,
        args.require_str("name")?,
        args.require_str("description")?,
        args.require_str("grade")?,
    );

    let id = store.insert_problem(row)?;
    Logger::info(
        "PROBLEM_ADDED",
        &[("boulder_id", &boulder.to_string()), ("problem_id", &id.to_string())],
    );
    Envelope::field("problem_id", id)
}
