//! Catalog API Tests
//!
//! Drives the full router in-process: selectors on the list endpoint,
//! argument validation, and add-then-get round trips.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use ocd::catalog::{
    CatalogStore, MemoryCatalog, NewArea, NewBoulder, NewProblem, NewSector, NO_SECTOR,
};
use ocd::http_server::{HttpServer, HttpServerConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

// =============================================================================
// Test Utilities
// =============================================================================

fn seeded_catalog() -> Arc<MemoryCatalog> {
    let catalog = MemoryCatalog::new();

    let area = catalog
        .insert_area(NewArea::new("area name", 15.0, 15.0))
        .unwrap();
    catalog
        .insert_sector(NewSector::new("test sector", 15.0, 15.0, area))
        .unwrap();

    let seeds = [(0, 15.1, 15.0), (1, 15.2, 15.1), (2, 15.2, 15.2)];
    for (id, lat, lon) in seeds {
        catalog
            .insert_boulder(
                NewBoulder::new(lat, lon, 100, NO_SECTOR)
                    .with_id(id)
                    .with_name(format!("boulder{}", id + 1)),
            )
            .unwrap();
    }

    catalog
        .insert_problem(NewProblem::new(0, "problem1", "foo bar", "7a").with_id(0))
        .unwrap();

    Arc::new(catalog)
}

fn app(catalog: Arc<MemoryCatalog>) -> Router {
    HttpServer::new(HttpServerConfig::default(), catalog).router()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    assert_eq!(content_type, "application/json");

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    let body = serde_json::from_str(&text).unwrap();
    (status, text, body)
}

async fn get(app: &Router, uri: &str) -> Value {
    let request = Request::get(uri).body(Body::empty()).unwrap();
    let (status, text, body) = send(app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(text.ends_with('\n'));
    body
}

async fn post_form(app: &Router, uri: &str, form: &str) -> Value {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    let (status, _, body) = send(app, request).await;
    assert_eq!(status, StatusCode::OK);
    body
}

fn result_len(body: &Value) -> usize {
    assert_eq!(body["ok"], true, "unexpected failure: {}", body);
    body["result"].as_array().unwrap().len()
}

// =============================================================================
// Selectors
// =============================================================================

#[tokio::test]
async fn test_rect_selects_one() {
    let app = app(seeded_catalog());
    let body = get(&app, "/boulder?q=rect%5B14.99,14.99,15.11,15.11%5D").await;

    assert_eq!(result_len(&body), 1);
    assert_eq!(body["result"][0]["name"], "boulder1");
}

#[tokio::test]
async fn test_circle_selects_two() {
    let app = app(seeded_catalog());
    let body = get(&app, "/boulder?q=circle%5B15.0,15.0,0.25%5D").await;

    assert_eq!(result_len(&body), 2);
}

#[tokio::test]
async fn test_sector_selects_all() {
    let app = app(seeded_catalog());
    let body = get(&app, "/boulder?q=sector%5B0%5D").await;

    assert_eq!(result_len(&body), 3);
}

#[tokio::test]
async fn test_no_selector_selects_all() {
    let app = app(seeded_catalog());
    let body = get(&app, "/boulder").await;

    assert_eq!(result_len(&body), 3);
    assert_eq!(
        body["result"][1],
        json!({
            "id": 1,
            "lattitude": 15.2,
            "longitude": 15.1,
            "elevation": 100,
            "name": "boulder2",
            "sector": 0
        })
    );
}

#[tokio::test]
async fn test_problems_included_on_request() {
    let app = app(seeded_catalog());

    let body = get(&app, "/boulder?q=circle%5B15.0,15.0,0.25%5D&problems=1").await;
    assert_eq!(result_len(&body), 2);
    assert_eq!(body["result"][0]["problems"].as_array().unwrap().len(), 1);
    assert_eq!(body["result"][0]["problems"][0]["name"], "problem1");
    assert_eq!(body["result"][1]["problems"], json!([]));

    let body = get(&app, "/boulder?q=circle%5B15.0,15.0,0.25%5D").await;
    assert_eq!(result_len(&body), 2);
    assert!(body["result"][0].get("problems").is_none());
    assert!(body["result"][1].get("problems").is_none());
}

#[tokio::test]
async fn test_unknown_selector() {
    let app = app(seeded_catalog());
    let body = get(&app, "/boulder?q=triangle%5B1,2,3%5D").await;

    assert_eq!(body["ok"], false);
    assert_eq!(body["error"], "unknown select query triangle[1,2,3]");
}

#[tokio::test]
async fn test_malformed_selector_argument() {
    let app = app(seeded_catalog());
    let body = get(&app, "/boulder?q=circle%5Bx,15.0,0.25%5D").await;

    assert_eq!(body["ok"], false);
    assert!(body["error"].as_str().unwrap().contains("circle[x,15.0,0.25]"));
}

// =============================================================================
// Validation
// =============================================================================

#[tokio::test]
async fn test_unexpected_argument() {
    let app = app(seeded_catalog());
    let body = get(&app, "/boulder?limit=10").await;

    assert_eq!(body, json!({"ok": false, "error": "argument limit not allowed"}));
}

#[tokio::test]
async fn test_invalid_bool() {
    let app = app(seeded_catalog());
    let body = get(&app, "/boulder?problems=maybe").await;

    assert_eq!(body["error"], "invalid type of argument problems, bool required");
}

#[tokio::test]
async fn test_add_boulder_missing_arguments() {
    let app = app(seeded_catalog());
    let body = post_form(&app, "/boulder/add", "lattitude=16.0&elevation=100").await;

    assert_eq!(body["ok"], false);
    assert_eq!(
        body["error"],
        "arguments longitude, sector required but not passed"
    );
}

#[tokio::test]
async fn test_add_boulder_wrong_type() {
    let app = app(seeded_catalog());
    let body = post_form(
        &app,
        "/boulder/add",
        "lattitude=16.0&longitude=16.0&elevation=high&sector=0",
    )
    .await;

    assert_eq!(body["error"], "invalid type of argument elevation, int required");
}

#[tokio::test]
async fn test_get_rejects_arguments() {
    let app = app(seeded_catalog());
    let body = get(&app, "/boulder/0?verbose=1").await;

    assert_eq!(body["error"], "argument verbose not allowed");
}

// =============================================================================
// Round trips
// =============================================================================

#[tokio::test]
async fn test_add_then_get_boulder() {
    let catalog = seeded_catalog();
    let app = app(catalog.clone());

    let body = post_form(
        &app,
        "/boulder/add",
        "lattitude=16.5&longitude=17.25&elevation=320&sector=1&name=the+egg",
    )
    .await;
    assert_eq!(body["ok"], true);
    let id = body["boulder_id"].as_i64().unwrap();
    assert_eq!(id, 3);

    let body = get(&app, &format!("/boulder/{}", id)).await;
    assert_eq!(
        body,
        json!({
            "ok": true,
            "result": {
                "lattitude": 16.5,
                "longitude": 17.25,
                "elevation": 320,
                "name": "the egg",
                "sector": 1,
                "problems": []
            }
        })
    );
    assert!(catalog.boulder(id).unwrap().unwrap().timestamp > 0);
}

#[tokio::test]
async fn test_add_boulder_from_query_string() {
    let app = app(seeded_catalog());
    let request = Request::builder()
        .method(Method::POST)
        .uri("/boulder/add?lattitude=1.5&longitude=2.5&elevation=10&sector=0")
        .body(Body::empty())
        .unwrap();

    let (_, _, body) = send(&app, request).await;
    assert_eq!(body, json!({"ok": true, "boulder_id": 3}));

    let body = get(&app, "/boulder/3").await;
    assert_eq!(body["result"]["name"], Value::Null);
}

#[tokio::test]
async fn test_add_problem_then_get() {
    let app = app(seeded_catalog());

    let body = post_form(
        &app,
        "/problem/add",
        "boulder=0&name=problem2&description=sit+start&grade=6c%2B",
    )
    .await;
    assert_eq!(body, json!({"ok": true, "problem_id": 1}));

    let body = get(&app, "/boulder/0").await;
    let problems = body["result"]["problems"].as_array().unwrap();
    assert_eq!(problems.len(), 2);
    assert_eq!(
        problems[1],
        json!({"name": "problem2", "description": "sit start", "grade": "6c+"})
    );
}

#[tokio::test]
async fn test_get_missing_boulder() {
    let app = app(seeded_catalog());
    let body = get(&app, "/boulder/42").await;

    assert_eq!(body, json!({"ok": false, "error": "no record found for id 42"}));
}

#[tokio::test]
async fn test_health() {
    let app = app(seeded_catalog());
    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
