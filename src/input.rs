// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Request input handling.
//!
//! POST bodies arrive either URL-encoded (HTML forms) or as JSON, and
//! numeric fields are coerced the way loosely-typed web clients expect:
//! malformed numbers become "not a number" instead of a rejection.

use axum::{
    extract::{FromRequest, Request},
    http::header,
    response::{IntoResponse, Response},
    Form, Json,
};
use crate::models::Text;
use serde::{de::DeserializeOwned, Deserialize, Deserializer};

/// Body extractor accepting `application/x-www-form-urlencoded` or
/// `application/json`. Any other content type yields `T::default()`,
/// i.e. every field absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormOrJson<T>(pub T);

impl<T, S> FromRequest<S> for FormOrJson<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mime = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
            .map(|value| value.trim().to_ascii_lowercase())
            .unwrap_or_default();

        match mime.as_str() {
            "application/json" => Json::<T>::from_request(req, state)
                .await
                .map(|Json(value)| Self(value))
                .map_err(IntoResponse::into_response),
            "application/x-www-form-urlencoded" => Form::<T>::from_request(req, state)
                .await
                .map(|Form(value)| Self(value))
                .map_err(IntoResponse::into_response),
            _ => {
                tracing::debug!(content_type = %mime, "Ignoring body with unsupported content type");
                Ok(Self(T::default()))
            }
        }
    }
}

/// Any JSON scalar a client might send for a text field.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl From<Scalar> for String {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Text(s) => s,
            Scalar::Int(n) => n.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

/// Deserialize an optional field, coercing numbers and booleans to text.
///
/// Use with `#[serde(default, deserialize_with = "lenient_string")]`.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(String::from))
}

/// Like [`lenient_string`], but keeps an explicit `null` apart from a
/// missing field.
///
/// Use with `#[serde(default, deserialize_with = "nullable_text")]`.
pub fn nullable_text<'de, D>(deserializer: D) -> Result<Text, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        Some(scalar) => Text::Value(scalar.into()),
        None => Text::Null,
    })
}

/// Parse the leading integer of `input`, or `None` if it has none.
///
/// Leading whitespace and a sign are skipped, a `0x` prefix selects hex,
/// and parsing stops at the first non-digit. Out-of-range values saturate.
pub fn parse_int(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, digits) = match s.get(..2) {
        Some("0x") | Some("0X") => (16, &s[2..]),
        _ => (10, s),
    };

    let mut value: Option<i64> = None;
    for digit in digits.chars().map_while(|c| c.to_digit(radix)) {
        let acc = value.unwrap_or(0);
        let digit = i64::from(digit);
        value = Some(if negative {
            acc.saturating_mul(i64::from(radix)).saturating_sub(digit)
        } else {
            acc.saturating_mul(i64::from(radix)).saturating_add(digit)
        });
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int_plain_and_signed() {
        assert_eq!(parse_int("30"), Some(30));
        assert_eq!(parse_int("  -12"), Some(-12));
        assert_eq!(parse_int("+7"), Some(7));
        assert_eq!(parse_int("0"), Some(0));
    }

    #[test]
    fn test_parse_int_takes_leading_digits() {
        assert_eq!(parse_int("45min"), Some(45));
        assert_eq!(parse_int("12.9"), Some(12));
        assert_eq!(parse_int("0x1A"), Some(26));
    }

    #[test]
    fn test_parse_int_not_a_number() {
        assert_eq!(parse_int("abc"), None);
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("-"), None);
        assert_eq!(parse_int("0x"), None);
    }

    #[test]
    fn test_parse_int_saturates() {
        assert_eq!(parse_int("99999999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_int("-99999999999999999999999"), Some(i64::MIN));
    }

    #[derive(Deserialize, Default)]
    struct Body {
        #[serde(default, deserialize_with = "lenient_string")]
        duration: Option<String>,
    }

    #[test]
    fn test_lenient_string_accepts_json_scalars() {
        let body: Body = serde_json::from_str(r#"{"duration": 30}"#).unwrap();
        assert_eq!(body.duration.as_deref(), Some("30"));

        let body: Body = serde_json::from_str(r#"{"duration": "45"}"#).unwrap();
        assert_eq!(body.duration.as_deref(), Some("45"));

        let body: Body = serde_json::from_str(r#"{"duration": 12.5}"#).unwrap();
        assert_eq!(body.duration.as_deref(), Some("12.5"));

        let body: Body = serde_json::from_str("{}").unwrap();
        assert!(body.duration.is_none());
    }

    #[derive(Deserialize, Default)]
    struct NamedBody {
        #[serde(default, deserialize_with = "nullable_text")]
        username: Text,
    }

    #[test]
    fn test_nullable_text_keeps_null_apart_from_missing() {
        let body: NamedBody = serde_json::from_str(r#"{"username": null}"#).unwrap();
        assert_eq!(body.username, Text::Null);

        let body: NamedBody = serde_json::from_str("{}").unwrap();
        assert_eq!(body.username, Text::Absent);

        let body: NamedBody = serde_json::from_str(r#"{"username": 7}"#).unwrap();
        assert_eq!(body.username, Text::from("7"));
    }
}
