//! Catalog HTTP Routes
//!
//! Binds the handlers to axum. Arguments come from the query string, and for
//! POST routes also from a form-encoded body (query first).

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Form, Router,
};

use super::envelope::{verify, Envelope};
use super::handlers::{self, ADD_BOULDER, ADD_PROBLEM, GET_BOULDER, LIST_BOULDERS};
use crate::catalog::CatalogStore;

type Args = Vec<(String, String)>;

// ==================
// Shared State
// ==================

/// Catalog state shared across handlers
pub struct CatalogState {
    pub store: Arc<dyn CatalogStore>,
}

impl CatalogState {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }
}

// ==================
// Catalog Routes
// ==================

/// Create catalog routes
pub fn catalog_routes(state: Arc<CatalogState>) -> Router {
    Router::new()
        .route("/boulder", get(list_boulders_handler))
        .route("/boulder/:id", get(get_boulder_handler))
        .route("/boulder/add", post(add_boulder_handler))
        .route("/problem/add", post(add_problem_handler))
        .with_state(state)
}

fn merge(query: Args, form: Option<Form<Args>>) -> Args {
    let mut args = query;
    if let Some(Form(body)) = form {
        args.extend(body);
    }
    args
}

async fn list_boulders_handler(
    State(state): State<Arc<CatalogState>>,
    Query(query): Query<Args>,
) -> Envelope {
    verify("/boulder", &LIST_BOULDERS, query, |args| {
        handlers::list_boulders(state.store.as_ref(), args)
    })
}

async fn get_boulder_handler(
    State(state): State<Arc<CatalogState>>,
    Path(id): Path<i64>,
    Query(query): Query<Args>,
) -> Envelope {
    verify("/boulder/:id", &GET_BOULDER, query, |args| {
        handlers::get_boulder(state.store.as_ref(), id, args)
    })
}

async fn add_boulder_handler(
    State(state): State<Arc<CatalogState>>,
    Query(query): Query<Args>,
    form: Option<Form<Args>>,
) -> Envelope {
    verify("/boulder/add", &ADD_BOULDER, merge(query, form), |args| {
        handlers::add_boulder(state.store.as_ref(), args)
    })
}

async fn add_problem_handler(
    State(state): State<Arc<CatalogState>>,
    Query(query): Query<Args>,
    form: Option<Form<Args>>,
) -> Envelope {
    verify("/problem/add", &ADD_PROBLEM, merge(query, form), |args| {
        handlers::add_problem(state.store.as_ref(), args)
    })
}
