// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Exercise Tracker: a small HTTP API for users and their logged exercises.
//!
//! All data lives in process-local memory and is discarded on restart.

pub mod config;
pub mod db;
pub mod error;
pub mod input;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod time_utils;

use config::Config;
use db::{ExerciseStore, UserStore};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub users: UserStore,
    pub exercises: ExerciseStore,
}

impl AppState {
    /// Build state with empty stores.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            users: UserStore::new(),
            exercises: ExerciseStore::new(),
        }
    }
}
