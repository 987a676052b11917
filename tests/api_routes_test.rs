//! Integration tests for the HTTP surface
//!
//! These tests drive the full router (store gate, handlers, error mapping
//! and front-end fallback) with in-process requests.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use shift_planner_backend::api;
use shift_planner_backend::context::AppContext;
use shift_planner_backend::holidays::HolidayCache;
use shift_planner_backend::store::{self, MemoryStore, StateStore};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

/// Test fixture: a router over a memory store, a holiday dir and a front-end dir
struct TestApp {
    router: Router,
    _dir: TempDir,
}

impl TestApp {
    fn new(connected: bool) -> Self {
        let dir = TempDir::new().unwrap();
        let holidays_dir = dir.path().join("holidays");
        std::fs::create_dir_all(&holidays_dir).unwrap();
        std::fs::write(
            holidays_dir.join("2025.json"),
            r#"[{"date":"2025-12-25","name":"Christmas Day"}]"#,
        )
        .unwrap();
        std::fs::write(
            holidays_dir.join("2026.json"),
            r#"[{"date":"2026-01-01","name":"New Year's Day"}]"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("index.html"), "<!doctype html><title>app</title>").unwrap();

        let store = connected.then(|| StateStore::new(Arc::new(MemoryStore::new())));
        let ctx = AppContext::new(store, Arc::new(HolidayCache::from_dir(&holidays_dir)));
        let router = api::router(ctx, dir.path().join("index.html"));

        Self { router, _dir: dir }
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    async fn send_raw(
        &self,
        uri: &str,
        content_type: Option<&str>,
        body: &'static str,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(Method::POST).uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }
        let request = builder.body(Body::from(body)).unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }

    async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, None).await
    }
}

/// The night-shift walkthrough: create, schedule, delete, fall back
#[tokio::test]
async fn test_night_shift_scenario() {
    let app = TestApp::new(true);

    let (status, body) = app.get("/api/data").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["activeProfile"], "default");

    let (status, body) = app.post("/api/profiles", json!({"name": "night-shift"})).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["activeProfile"], "night-shift");

    let (status, _) = app
        .post("/api/schedules", json!({"name": "week1", "data": {"mon": "A"}}))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app.get("/api/schedules/week1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"mon": "A"}));

    let (status, body) = app
        .post("/api/profiles/delete", json!({"name": "night-shift"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["activeProfile"], "default");

    let (status, body) = app.get("/api/schedules/week1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].as_str().unwrap().contains("week1"));
}

#[tokio::test]
async fn test_profile_error_codes() {
    let app = TestApp::new(true);

    let (status, body) = app.post("/api/profiles", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());

    app.post("/api/profiles", json!({"name": "early"})).await;
    let (status, _) = app.post("/api/profiles", json!({"name": "early"})).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .post("/api/profiles/rename", json!({"oldName": "early"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post(
            "/api/profiles/rename",
            json!({"oldName": "late", "newName": "later"}),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .post(
            "/api/profiles/rename",
            json!({"oldName": "early", "newName": "default"}),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = app
        .post("/api/profiles/delete", json!({"name": "default"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "The default profile cannot be deleted");

    let (status, _) = app
        .post("/api/profiles/delete", json!({"name": "ghost"}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.post("/api/active_profile", json!({"name": ""})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post("/api/active_profile", json!({"name": "ghost"}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unreadable_bodies_are_json_bad_requests() {
    let app = TestApp::new(true);

    let cases = [
        ("/api/profiles", None, ""),
        ("/api/profiles", Some("application/json"), ""),
        ("/api/schedules", None, ""),
        ("/api/schedules", Some("application/json"), ""),
        ("/api/profiles", Some("application/json"), r#"{"name":5}"#),
        ("/api/profiles/rename", Some("application/json"), "{not json"),
        ("/api/settings", Some("text/plain"), r#"{"a":1}"#),
    ];

    for (uri, content_type, body) in cases {
        let (status, response) = app.send_raw(uri, content_type, body).await;
        assert_eq!(
            status,
            StatusCode::BAD_REQUEST,
            "{} with {:?} body {:?}",
            uri,
            content_type,
            body
        );
        let message = response["message"].as_str().unwrap_or_default();
        assert!(
            message.starts_with("Invalid request body"),
            "{} returned {}",
            uri,
            response
        );
        assert_eq!(response["status"], 400);
    }

    // Nothing was written by the rejected requests
    let (_, state) = app.get("/api/data").await;
    assert_eq!(state["activeProfile"], "default");
}

#[tokio::test]
async fn test_rename_active_profile_over_http() {
    let app = TestApp::new(true);
    app.post("/api/profiles", json!({"name": "a"})).await;

    let (status, body) = app
        .post("/api/profiles/rename", json!({"oldName": "a", "newName": "b"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["activeProfile"], "b");
    assert!(body["profiles"].get("a").is_none());

    let (status, _) = app.post("/api/active_profile", json!({"name": "a"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_import_and_settings() {
    let app = TestApp::new(true);

    let (status, _) = app
        .post("/api/profiles/import", json!({"name": "imported"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .post(
            "/api/profiles/import",
            json!({"name": "imported", "settings": {}}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["activeProfile"], "imported");

    let (status, _) = app
        .post(
            "/api/profiles/import",
            json!({"name": "imported", "settings": {"a": 1}}),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .post("/api/settings", json!({"shiftLength": 8, "colors": ["red"]}))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.get("/api/data").await;
    assert_eq!(
        body["profiles"]["imported"]["settings"],
        json!({"shiftLength": 8, "colors": ["red"]})
    );
    assert_eq!(body["profiles"]["default"]["settings"], json!({}));
}

#[tokio::test]
async fn test_schedule_routes() {
    let app = TestApp::new(true);

    let (status, _) = app.post("/api/schedules", json!({"name": "week1"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.delete("/api/schedules/week1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    app.post("/api/schedules", json!({"name": "week1", "data": [1, 2]}))
        .await;
    app.post("/api/schedules", json!({"name": "week1", "data": [3]}))
        .await;
    let (_, body) = app.get("/api/schedules/week1").await;
    assert_eq!(body, json!([3]));

    let (status, _) = app.delete("/api/schedules/week1").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.get("/api/schedules/week1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_holidays_route() {
    let app = TestApp::new(true);
    let (status, body) = app.get("/api/holidays").await;
    assert_eq!(status, StatusCode::OK);
    let dates: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|h| h["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2025-12-25", "2026-01-01"]);
}

#[tokio::test]
async fn test_every_api_route_is_gated_without_store() {
    let app = TestApp::new(false);

    let requests = [
        (Method::GET, "/api/holidays", None),
        (Method::GET, "/api/data", None),
        (Method::POST, "/api/profiles", Some(json!({"name": "x"}))),
        (
            Method::POST,
            "/api/profiles/rename",
            Some(json!({"oldName": "x", "newName": "y"})),
        ),
        (Method::POST, "/api/profiles/delete", Some(json!({"name": "x"}))),
        (
            Method::POST,
            "/api/profiles/import",
            Some(json!({"name": "x", "settings": {}})),
        ),
        (Method::POST, "/api/active_profile", Some(json!({"name": "x"}))),
        (Method::POST, "/api/settings", Some(json!({}))),
        (Method::GET, "/api/schedules/week1", None),
        (
            Method::POST,
            "/api/schedules",
            Some(json!({"name": "w", "data": {}})),
        ),
        (Method::DELETE, "/api/schedules/week1", None),
    ];

    for (method, uri, body) in requests {
        let (status, body) = app.send(method.clone(), uri, body).await;
        assert_eq!(
            status,
            StatusCode::SERVICE_UNAVAILABLE,
            "{} {} should be gated",
            method,
            uri
        );
        assert_eq!(body["message"], "Database not connected");
    }

    let (status, body) = app.get("/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["store_connected"], false);
}

#[tokio::test]
async fn test_unmatched_routes_serve_front_end() {
    for connected in [true, false] {
        let app = TestApp::new(connected);
        let request = Request::builder()
            .uri("/planner/week/12")
            .body(Body::empty())
            .unwrap();
        let response = app.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("<title>app</title>"));
    }
}

#[tokio::test]
async fn test_sqlite_store_behind_router() {
    let dir = TempDir::new().unwrap();
    let url = format!("sqlite:{}", dir.path().join("state.db").display());
    let state_store = store::connect(&url).await.unwrap();

    let ctx = AppContext::new(
        Some(state_store),
        Arc::new(HolidayCache::from_dir(dir.path())),
    );
    let router = api::router(ctx, dir.path().join("index.html"));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/profiles")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"name":"weekend"}"#))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // A second connection sees the persisted document
    let reopened = store::connect(&url).await.unwrap();
    let state = reopened.get_state().await.unwrap();
    assert_eq!(state.active_profile, "weekend");
}
