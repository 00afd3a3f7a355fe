// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Exercise model for storage.

use super::Text;
use crate::time_utils;
use serde::Serialize;

/// Stored exercise record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exercise {
    /// Id of the owning user
    pub owner_id: String,
    /// Owner's username, copied at creation time
    pub username: Text,
    pub description: Text,
    /// Minutes; `None` when the input was not a number
    pub duration: Option<i64>,
    /// Date exactly as supplied (or today's `YYYY-MM-DD`)
    pub date: String,
}

impl Exercise {
    /// The date rendered as `Www Mmm DD YYYY`, or `Invalid Date`.
    pub fn display_date(&self) -> String {
        time_utils::to_date_string(&self.date)
    }
}
