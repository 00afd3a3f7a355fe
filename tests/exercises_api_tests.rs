// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exercise recording tests.

use axum::http::StatusCode;
use serde_json::json;

mod common;

#[tokio::test]
async fn test_add_exercise_unknown_user() {
    let (app, state) = common::create_test_app();

    let (status, json) = common::post_form(
        &app,
        "/api/users/does-not-exist/exercises",
        "description=run&duration=30",
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, json!({ "error": "User not found" }));
    assert!(state.exercises.is_empty());
}

#[tokio::test]
async fn test_add_exercise_with_date() {
    let (app, _) = common::create_test_app();
    let id = common::create_user(&app, "runner").await;

    let json = common::add_exercise(&app, &id, "description=run&duration=30&date=2023-01-15").await;

    assert_eq!(
        json,
        json!({
            "_id": id,
            "username": "runner",
            "description": "run",
            "duration": 30,
            "date": "Sun Jan 15 2023",
        })
    );
}

#[tokio::test]
async fn test_add_exercise_defaults_to_today() {
    let (app, _) = common::create_test_app();
    let id = common::create_user(&app, "runner").await;

    let json = common::add_exercise(&app, &id, "description=walk&duration=15").await;

    let today = chrono::Utc::now().format("%a %b %d %Y").to_string();
    assert_eq!(json["date"], today);
}

#[tokio::test]
async fn test_add_exercise_empty_date_defaults_to_today() {
    let (app, _) = common::create_test_app();
    let id = common::create_user(&app, "runner").await;

    let json = common::add_exercise(&app, &id, "description=walk&duration=15&date=").await;

    let today = chrono::Utc::now().format("%a %b %d %Y").to_string();
    assert_eq!(json["date"], today);
}

#[tokio::test]
async fn test_non_numeric_duration_passes_through_as_null() {
    let (app, state) = common::create_test_app();
    let id = common::create_user(&app, "runner").await;

    let json = common::add_exercise(&app, &id, "description=nap&duration=forever&date=2023-01-15").await;

    assert_eq!(json["duration"], serde_json::Value::Null);
    assert_eq!(state.exercises.len(), 1);
}

#[tokio::test]
async fn test_duration_keeps_leading_integer() {
    let (app, _) = common::create_test_app();
    let id = common::create_user(&app, "runner").await;

    let json = common::add_exercise(&app, &id, "description=swim&duration=45.9").await;

    assert_eq!(json["duration"], 45);
}

#[tokio::test]
async fn test_invalid_date_is_accepted() {
    let (app, _) = common::create_test_app();
    let id = common::create_user(&app, "runner").await;

    let json = common::add_exercise(&app, &id, "description=run&duration=5&date=whenever").await;

    assert_eq!(json["date"], "Invalid Date");
}

#[tokio::test]
async fn test_add_exercise_json_body_with_numeric_duration() {
    let (app, _) = common::create_test_app();
    let id = common::create_user(&app, "runner").await;

    let (status, json) = common::post_json(
        &app,
        &format!("/api/users/{id}/exercises"),
        json!({ "description": "row", "duration": 20, "date": "2024-01-01" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["duration"], 20);
    assert_eq!(json["date"], "Mon Jan 01 2024");
}

#[tokio::test]
async fn test_add_exercise_without_description() {
    let (app, _) = common::create_test_app();
    let id = common::create_user(&app, "runner").await;

    let json = common::add_exercise(&app, &id, "duration=10&date=2023-01-15").await;

    assert!(json.get("description").is_none());
    assert_eq!(json["duration"], 10);
}

#[tokio::test]
async fn test_null_description_is_echoed() {
    let (app, _) = common::create_test_app();
    let id = common::create_user(&app, "runner").await;

    let (status, json) = common::post_json(
        &app,
        &format!("/api/users/{id}/exercises"),
        json!({ "description": null, "duration": 5, "date": "2023-01-15" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(json.get("description").is_some());
    assert_eq!(json["description"], serde_json::Value::Null);

    let (_, log) = common::get(&app, &format!("/api/users/{id}/logs")).await;
    assert_eq!(
        log["log"][0],
        json!({ "description": null, "duration": 5, "date": "Sun Jan 15 2023" })
    );
}
