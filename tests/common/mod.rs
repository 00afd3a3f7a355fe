// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use exercise_tracker::config::Config;
use exercise_tracker::routes::create_router;
use exercise_tracker::AppState;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Create a test app with fresh, empty stores.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(Config::default()));
    (create_router(state.clone()), state)
}

#[allow(dead_code)]
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

/// POST a URL-encoded form body.
#[allow(dead_code)]
pub async fn post_form(app: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// POST a JSON body.
#[allow(dead_code)]
pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

#[allow(dead_code)]
pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Create a user through the API and return its id.
#[allow(dead_code)]
pub async fn create_user(app: &Router, username: &str) -> String {
    let (status, json) = post_form(app, "/api/users", &format!("username={username}")).await;
    assert_eq!(status, StatusCode::OK);
    json["_id"].as_str().unwrap().to_string()
}

/// Record an exercise through the API.
#[allow(dead_code)]
pub async fn add_exercise(app: &Router, user_id: &str, form: &str) -> Value {
    let (status, json) = post_form(app, &format!("/api/users/{user_id}/exercises"), form).await;
    assert_eq!(status, StatusCode::OK);
    json
}
