//! Caller-supplied text that may be missing or explicitly `null`.

use serde::{Serialize, Serializer};

/// A free-form text field as the client sent it.
///
/// `Absent` fields are left out of responses; `Null` ones are echoed as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Text {
    #[default]
    Absent,
    Null,
    Value(String),
}

impl Text {
    pub fn is_absent(&self) -> bool {
        matches!(self, Text::Absent)
    }

    pub fn as_deref(&self) -> Option<&str> {
        match self {
            Text::Value(value) => Some(value),
            Text::Absent | Text::Null => None,
        }
    }
}

impl From<&str> for Text {
    fn from(value: &str) -> Self {
        Text::Value(value.to_string())
    }
}

impl From<String> for Text {
    fn from(value: String) -> Self {
        Text::Value(value)
    }
}

impl Serialize for Text {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Text::Value(value) => serializer.serialize_str(value),
            Text::Absent | Text::Null => serializer.serialize_none(),
        }
    }
}
