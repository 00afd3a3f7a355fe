// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory stores for users and exercises.
//!
//! Both stores are append-only and keep insertion order, which is also the
//! order used for listing and filtering. Each guards its records with an
//! `RwLock`: appends take the write lock, scans the read lock.

use crate::input::parse_int;
use crate::models::{Exercise, Text, User};
use crate::time_utils;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Read a lock, recovering from poisoning (every mutation is a single push).
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

// ─── Users ───────────────────────────────────────────────────

/// Insertion-ordered store of users.
pub struct UserStore {
    users: RwLock<Vec<User>>,
    rng: ring::rand::SystemRandom,
    fallback_seq: AtomicU64,
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(Vec::new()),
            rng: ring::rand::SystemRandom::new(),
            fallback_seq: AtomicU64::new(0),
        }
    }

    /// Create and store a new user. No validation is applied to `username`.
    pub fn create(&self, username: Text) -> User {
        let user = User {
            username,
            id: self.generate_id(),
        };
        write(&self.users).push(user.clone());
        tracing::debug!(user_id = %user.id, "User created");
        user
    }

    /// All users in creation order.
    pub fn list_all(&self) -> Vec<User> {
        read(&self.users).clone()
    }

    pub fn find_by_id(&self, id: &str) -> Option<User> {
        read(&self.users).iter().find(|u| u.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        read(&self.users).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Base-36 millisecond timestamp followed by a base-36 random suffix.
    fn generate_id(&self) -> String {
        let millis = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
        let suffix = match ring::rand::generate::<[u8; 8]>(&self.rng) {
            Ok(bytes) => u64::from_le_bytes(bytes.expose()),
            Err(_) => {
                // Still unique within this process.
                tracing::warn!("System RNG unavailable, using sequence id suffix");
                self.fallback_seq.fetch_add(1, Ordering::Relaxed)
            }
        };
        format!("{}{}", to_base36(millis), to_base36(suffix))
    }
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

// ─── Exercises ───────────────────────────────────────────────

/// One end of a log date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateBound {
    /// No bound given
    #[default]
    Unbounded,
    At(DateTime<Utc>),
    /// A bound was given but is not a date; nothing compares against it.
    Unparseable,
}

impl DateBound {
    /// Interpret a query parameter. Absent or empty means unbounded.
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") => DateBound::Unbounded,
            Some(raw) => time_utils::parse_date(raw).map_or(DateBound::Unparseable, DateBound::At),
        }
    }

    fn admits(
        &self,
        date: Option<DateTime<Utc>>,
        keep: impl Fn(DateTime<Utc>, DateTime<Utc>) -> bool,
    ) -> bool {
        match self {
            DateBound::Unbounded => true,
            DateBound::Unparseable => false,
            DateBound::At(bound) => date.is_some_and(|d| keep(d, *bound)),
        }
    }
}

/// Date range and count limit applied to a user's log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LogFilter {
    pub from: DateBound,
    pub to: DateBound,
    /// Slice end: negative drops that many entries from the end.
    pub limit: Option<i64>,
}

impl LogFilter {
    /// Build a filter from raw `from`, `to` and `limit` query values.
    ///
    /// A `limit` that is not a number selects nothing.
    pub fn from_params(from: Option<&str>, to: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            from: DateBound::from_param(from),
            to: DateBound::from_param(to),
            limit: limit
                .filter(|raw| !raw.is_empty())
                .map(|raw| parse_int(raw).unwrap_or(0)),
        }
    }
}

/// Insertion-ordered store of exercises.
#[derive(Default)]
pub struct ExerciseStore {
    exercises: RwLock<Vec<Exercise>>,
}

impl ExerciseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an exercise for `owner`.
    ///
    /// `duration` is parsed leniently (`None` if not a number) and a missing
    /// or empty `date` defaults to today's UTC date. The stored date is kept
    /// exactly as supplied.
    pub fn add(
        &self,
        owner: &User,
        description: Text,
        duration: Option<&str>,
        date: Option<String>,
    ) -> Exercise {
        let exercise = Exercise {
            owner_id: owner.id.clone(),
            username: owner.username.clone(),
            description,
            duration: duration.and_then(parse_int),
            date: date
                .filter(|d| !d.is_empty())
                .unwrap_or_else(time_utils::today_iso),
        };
        write(&self.exercises).push(exercise.clone());
        exercise
    }

    /// Exercises owned by `owner_id`, in insertion order, after applying `filter`.
    pub fn log_for(&self, owner_id: &str, filter: &LogFilter) -> Vec<Exercise> {
        let bounded = filter.from != DateBound::Unbounded || filter.to != DateBound::Unbounded;

        let mut log: Vec<Exercise> = read(&self.exercises)
            .iter()
            .filter(|e| e.owner_id == owner_id)
            .filter(|e| {
                if !bounded {
                    return true;
                }
                let date = time_utils::parse_date(&e.date);
                filter.from.admits(date, |d, from| d >= from)
                    && filter.to.admits(date, |d, to| d <= to)
            })
            .cloned()
            .collect();

        if let Some(limit) = filter.limit {
            let len = i64::try_from(log.len()).unwrap_or(i64::MAX);
            let end = if limit < 0 {
                len.saturating_add(limit).max(0)
            } else {
                limit.min(len)
            };
            log.truncate(usize::try_from(end).unwrap_or_default());
        }

        log
    }

    pub fn len(&self) -> usize {
        read(&self.exercises).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
