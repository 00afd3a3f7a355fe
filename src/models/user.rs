//! User model for storage and API.

use super::Text;
use serde::Serialize;

/// A registered user. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    /// Caller-supplied name, unvalidated
    #[serde(skip_serializing_if = "Text::is_absent")]
    pub username: Text,
    /// Opaque generated identifier
    #[serde(rename = "_id")]
    pub id: String,
}
