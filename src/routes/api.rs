// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JSON API routes for users, exercises and logs.

use crate::db::LogFilter;
use crate::error::{AppError, Result};
use crate::input::{lenient_string, nullable_text, FormOrJson};
use crate::models::{Exercise, Text, User};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// API routes. Each path also matches with a trailing slash, and methods a
/// path does not handle get a plain 404.
pub fn routes() -> Router<Arc<AppState>> {
    [
        ("/api/users", get(list_users).post(create_user)),
        ("/api/users/{id}/exercises", post(add_exercise)),
        ("/api/users/{id}/logs", get(get_log)),
    ]
    .into_iter()
    .fold(Router::new(), |router, (path, method_router)| {
        let method_router = method_router.fallback(unsupported_method);
        router
            .route(&format!("{path}/"), method_router.clone())
            .route(path, method_router)
    })
}

async fn unsupported_method() -> StatusCode {
    StatusCode::NOT_FOUND
}

fn find_user(state: &AppState, id: &str) -> Result<User> {
    state.users.find_by_id(id).ok_or_else(|| {
        tracing::debug!(user_id = %id, "Unknown user id");
        AppError::UserNotFound
    })
}

// ─── Users ───────────────────────────────────────────────────

#[derive(Deserialize, Default)]
struct CreateUserBody {
    #[serde(default, deserialize_with = "nullable_text")]
    username: Text,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(feature = "binding-generation", ts(export, export_to = "bindings/"))]
pub struct UserResponse {
    #[serde(skip_serializing_if = "Text::is_absent")]
    #[cfg_attr(feature = "binding-generation", ts(type = "string | null"))]
    pub username: Text,
    #[serde(rename = "_id")]
    pub id: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            id: user.id,
        }
    }
}

async fn create_user(
    State(state): State<Arc<AppState>>,
    FormOrJson(body): FormOrJson<CreateUserBody>,
) -> Json<UserResponse> {
    let user = state.users.create(body.username);
    tracing::info!(user_id = %user.id, "Registered user");
    Json(user.into())
}

async fn list_users(State(state): State<Arc<AppState>>) -> Json<Vec<UserResponse>> {
    let users = state.users.list_all();
    tracing::debug!(count = users.len(), "Listing users");
    Json(users.into_iter().map(UserResponse::from).collect())
}

// ─── Exercises ───────────────────────────────────────────────

#[derive(Deserialize, Default)]
struct AddExerciseBody {
    #[serde(default, deserialize_with = "nullable_text")]
    description: Text,
    #[serde(default, deserialize_with = "lenient_string")]
    duration: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    date: Option<String>,
}

/// A newly recorded exercise, with its owner.
#[derive(Serialize, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(feature = "binding-generation", ts(export, export_to = "bindings/"))]
pub struct ExerciseResponse {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(skip_serializing_if = "Text::is_absent")]
    #[cfg_attr(feature = "binding-generation", ts(type = "string | null"))]
    pub username: Text,
    #[serde(skip_serializing_if = "Text::is_absent")]
    #[cfg_attr(feature = "binding-generation", ts(type = "string | null"))]
    pub description: Text,
    /// `null` when the submitted duration was not a number
    #[cfg_attr(feature = "binding-generation", ts(type = "number | null"))]
    pub duration: Option<i64>,
    /// e.g. `Sun Jan 15 2023`
    pub date: String,
}

async fn add_exercise(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    FormOrJson(body): FormOrJson<AddExerciseBody>,
) -> Result<Json<ExerciseResponse>> {
    let user = find_user(&state, &id)?;

    let exercise = state.exercises.add(
        &user,
        body.description,
        body.duration.as_deref(),
        body.date,
    );
    tracing::info!(
        user_id = %user.id,
        duration = ?exercise.duration,
        date = %exercise.date,
        "Recorded exercise"
    );

    let date = exercise.display_date();
    Ok(Json(ExerciseResponse {
        id: exercise.owner_id,
        username: exercise.username,
        description: exercise.description,
        duration: exercise.duration,
        date,
    }))
}

// ─── Logs ────────────────────────────────────────────────────

#[derive(Deserialize)]
struct LogQuery {
    /// Earliest date to include
    from: Option<String>,
    /// Latest date to include
    to: Option<String>,
    /// Maximum number of entries
    limit: Option<String>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(feature = "binding-generation", ts(export, export_to = "bindings/"))]
pub struct LogEntry {
    #[serde(skip_serializing_if = "Text::is_absent")]
    #[cfg_attr(feature = "binding-generation", ts(type = "string | null"))]
    pub description: Text,
    #[cfg_attr(feature = "binding-generation", ts(type = "number | null"))]
    pub duration: Option<i64>,
    pub date: String,
}

impl From<Exercise> for LogEntry {
    fn from(exercise: Exercise) -> Self {
        let date = exercise.display_date();
        Self {
            description: exercise.description,
            duration: exercise.duration,
            date,
        }
    }
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(feature = "binding-generation", ts(export, export_to = "bindings/"))]
pub struct LogResponse {
    #[serde(skip_serializing_if = "Text::is_absent")]
    #[cfg_attr(feature = "binding-generation", ts(type = "string | null"))]
    pub username: Text,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub count: usize,
    #[serde(rename = "_id")]
    pub id: String,
    pub log: Vec<LogEntry>,
}

async fn get_log(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<LogQuery>,
) -> Result<Json<LogResponse>> {
    let user = find_user(&state, &id)?;

    let filter = LogFilter::from_params(
        params.from.as_deref(),
        params.to.as_deref(),
        params.limit.as_deref(),
    );
    let log: Vec<LogEntry> = state
        .exercises
        .log_for(&user.id, &filter)
        .into_iter()
        .map(LogEntry::from)
        .collect();

    tracing::debug!(
        user_id = %user.id,
        from = ?params.from,
        to = ?params.to,
        limit = ?params.limit,
        count = log.len(),
        "Fetched exercise log"
    );

    Ok(Json(LogResponse {
        username: user.username,
        count: log.len(),
        id: user.id,
        log,
    }))
}
