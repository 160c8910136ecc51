//! Shared validation helpers for inbound HTTP adapters.

use std::str::FromStr;

use serde_json::json;
use uuid::Uuid;

use crate::domain::{Error, InteractionStatus};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUuid,
    InvalidStatus,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidStatus => "invalid_status",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

fn validation_error(
    field: FieldName,
    message: String,
    code: ErrorCode,
    value: Option<&str>,
) -> Error {
    let mut details = json!({
        "field": field.as_str(),
        "code": code.as_str(),
    });
    if let (Some(map), Some(value)) = (details.as_object_mut(), value) {
        map.insert("value".to_owned(), json!(value));
    }
    Error::invalid_request(message).with_details(details)
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    validation_error(
        field,
        format!("missing required field: {name}"),
        ErrorCode::MissingField,
        None,
    )
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let name = field.as_str();
    validation_error(
        field,
        format!("{name} must be a valid UUID"),
        ErrorCode::InvalidUuid,
        Some(value),
    )
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| invalid_uuid_error(field, value))
}

/// Parse an interaction status, rejecting unknown members of the closed set
/// before any port is invoked.
pub(crate) fn parse_interaction_status(
    value: &str,
    field: FieldName,
) -> Result<InteractionStatus, Error> {
    InteractionStatus::from_str(value).map_err(|_| {
        let name = field.as_str();
        validation_error(
            field,
            format!("{name} must be one of interested, not_interested, saved, building"),
            ErrorCode::InvalidStatus,
            Some(value),
        )
    })
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;
    use serde_json::Value;

    use crate::domain::ErrorCode as DomainErrorCode;

    use super::*;

    #[rstest]
    fn parse_uuid_accepts_canonical_form() {
        let parsed = parse_uuid(
            "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            FieldName::new("ideaId"),
        )
        .expect("valid uuid");
        assert_eq!(parsed.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    }

    #[rstest]
    fn parse_uuid_rejects_garbage_with_field_details() {
        let error = parse_uuid("nope", FieldName::new("ideaId")).expect_err("invalid uuid");
        assert_eq!(error.code(), DomainErrorCode::InvalidRequest);
        let details = error.details().expect("details present");
        assert_eq!(
            details.get("field").and_then(Value::as_str),
            Some("ideaId")
        );
        assert_eq!(
            details.get("code").and_then(Value::as_str),
            Some("invalid_uuid")
        );
    }

    #[rstest]
    fn parse_interaction_status_rejects_unknown_values() {
        let error = parse_interaction_status("liked", FieldName::new("status"))
            .expect_err("unknown status");
        let details = error.details().expect("details present");
        assert_eq!(
            details.get("value").and_then(Value::as_str),
            Some("liked")
        );
        assert_eq!(
            details.get("code").and_then(Value::as_str),
            Some("invalid_status")
        );
    }

    #[rstest]
    fn missing_field_error_names_the_field() {
        let error = missing_field_error(FieldName::new("displayName"));
        assert!(error.message().contains("displayName"));
    }
}
