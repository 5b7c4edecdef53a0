//! Request validation that runs before a handler body.
//!
//! Payload types implement [`ValidatePayload`]; the [`ValidJson`] and
//! [`ValidQuery`] extractors feed them the request's fields and turn any
//! field errors into [`ApiError::Validation`].

use std::collections::BTreeMap;
use std::str::FromStr;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::app::errors::ApiError;

const MISSING: &str = "Missing data for required field.";
const NULL: &str = "Field may not be null.";
const NOT_A_STRING: &str = "Not a valid string.";
const NOT_A_UUID: &str = "Not a valid UUID.";
const UNKNOWN: &str = "Unknown field.";

/// Key used for errors that concern the payload as a whole.
pub const SCHEMA_KEY: &str = "_schema";

/// Where a field was read from.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Location {
    Json,
    Querystring,
}

impl Location {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Querystring => "querystring",
        }
    }
}

/// Field errors grouped by location, then by field name.
///
/// Serializes as `{"json": {"email": ["Missing data for required field."]}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, BTreeMap<String, Vec<String>>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single error about the payload as a whole.
    pub fn schema(location: Location, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(location, SCHEMA_KEY, message);
        errors
    }

    pub fn add(&mut self, location: Location, field: impl Into<String>, message: impl Into<String>) {
        self.0
            .entry(location.as_str())
            .or_default()
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn messages(&self, location: Location, field: &str) -> &[String] {
        self.0
            .get(location.as_str())
            .and_then(|fields| fields.get(field))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// A request payload that can be validated from a flat field map.
pub trait ValidatePayload: Sized {
    fn validate(fields: &Map<String, Value>, location: Location) -> Result<Self, FieldErrors>;
}

/// Reads typed fields out of a map, collecting every error instead of
/// stopping at the first.
#[derive(Debug)]
pub struct FieldReader<'a> {
    fields: &'a Map<String, Value>,
    location: Location,
    errors: FieldErrors,
}

impl<'a> FieldReader<'a> {
    pub fn new(fields: &'a Map<String, Value>, location: Location) -> Self {
        Self {
            fields,
            location,
            errors: FieldErrors::new(),
        }
    }

    pub fn required_str(&mut self, name: &str) -> Option<String> {
        match self.required(name)? {
            Value::String(s) => Some(s.clone()),
            _ => self.fail(name, NOT_A_STRING),
        }
    }

    /// A UUID-backed identifier, parsed through its `FromStr` impl.
    pub fn required_id<T: FromStr>(&mut self, name: &str) -> Option<T> {
        match self.required(name)? {
            Value::String(s) => match s.parse::<T>() {
                Ok(id) => Some(id),
                Err(_) => self.fail(name, NOT_A_UUID),
            },
            _ => self.fail(name, NOT_A_UUID),
        }
    }

    /// Flag every field not listed in `allowed`.
    pub fn reject_unknown(&mut self, allowed: &[&str]) {
        for key in self.fields.keys() {
            if !allowed.contains(&key.as_str()) {
                self.errors.add(self.location, key.clone(), UNKNOWN);
            }
        }
    }

    /// Build the payload if no field failed.
    pub fn finish<T>(self, build: impl FnOnce() -> Option<T>) -> Result<T, FieldErrors> {
        if !self.errors.is_empty() {
            return Err(self.errors);
        }
        build().ok_or_else(|| FieldErrors::schema(self.location, "Invalid input."))
    }

    fn required(&mut self, name: &str) -> Option<&'a Value> {
        match self.fields.get(name) {
            None => self.fail(name, MISSING),
            Some(Value::Null) => self.fail(name, NULL),
            Some(value) => Some(value),
        }
    }

    fn fail<T>(&mut self, name: &str, message: &str) -> Option<T> {
        self.errors.add(self.location, name, message);
        None
    }
}

/// JSON body extractor that validates into `T`.
///
/// An empty body is treated as `{}` so that required fields report as missing.
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: ValidatePayload,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::Http {
                status: rejection.status(),
            })?;

        let fields = if bytes.iter().all(u8::is_ascii_whitespace) {
            Map::new()
        } else {
            match serde_json::from_slice::<Value>(&bytes) {
                Ok(Value::Object(map)) => map,
                Ok(_) => return Err(FieldErrors::schema(Location::Json, "Invalid input type.").into()),
                Err(_) => return Err(FieldErrors::schema(Location::Json, "Invalid JSON body.").into()),
            }
        };

        T::validate(&fields, Location::Json)
            .map(ValidJson)
            .map_err(ApiError::from)
    }
}

/// Query string extractor that validates into `T`.
///
/// Every parameter is presented to `T` as a JSON string; on repeated keys the
/// last value wins.
#[derive(Debug, Clone)]
pub struct ValidQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidQuery<T>
where
    S: Send + Sync,
    T: ValidatePayload,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|_| FieldErrors::schema(Location::Querystring, "Invalid query string."))?;

        let fields: Map<String, Value> = pairs
            .into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect();

        T::validate(&fields, Location::Querystring)
            .map(ValidQuery)
            .map_err(ApiError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reader_collects_all_errors() {
        let fields = Map::new();
        let mut reader = FieldReader::new(&fields, Location::Json);
        assert_eq!(reader.required_str("a"), None);
        assert_eq!(reader.required_id::<crm_core::UserId>("b"), None);
        let errors = reader.finish(|| Some(())).unwrap_err();
        assert_eq!(errors.messages(Location::Json, "a"), [MISSING]);
        assert_eq!(errors.messages(Location::Json, "b"), [MISSING]);
    }

    #[test]
    fn schema_errors_use_reserved_key() {
        assert_eq!(
            FieldErrors::schema(Location::Json, "Invalid JSON body.").to_value(),
            json!({"json": {"_schema": ["Invalid JSON body."]}})
        );
    }

    #[test]
    fn messages_for_unknown_field_is_empty() {
        assert!(FieldErrors::new().messages(Location::Json, "email").is_empty());
    }
}
