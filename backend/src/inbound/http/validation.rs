//! Request validation helpers for the HTTP adapter.
//!
//! Extractor failures (malformed JSON, missing or mistyped fields, non-integer
//! path identifiers) and domain validation failures all surface as
//! `invalid_request` errors whose `details` name the offending field.

use actix_web::error::{JsonPayloadError, PathError};
use actix_web::{HttpRequest, web};
use serde_json::json;

use crate::domain::{Error, PersonValidationError};

/// Validation error codes reported in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidBody,
    InvalidId,
    EmptyName,
    InvalidDate,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidBody => "invalid_body",
            ErrorCode::InvalidId => "invalid_id",
            ErrorCode::EmptyName => "empty_name",
            ErrorCode::InvalidDate => "invalid_date",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, code: ErrorCode, message: String) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

fn field_value_error(field: FieldName, code: ErrorCode, message: String, value: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

/// Map a person validation failure to an `invalid_request` error.
pub(crate) fn person_validation_error(error: PersonValidationError) -> Error {
    let message = error.to_string();
    match error {
        PersonValidationError::EmptyName { field } => field_error(
            FieldName::new(field.as_str()),
            ErrorCode::EmptyName,
            message,
        ),
        PersonValidationError::InvalidBirthDate { value } => field_value_error(
            FieldName::new("birth_date"),
            ErrorCode::InvalidDate,
            message,
            &value,
        ),
    }
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let error = Error::invalid_request(format!("invalid request body: {err}"))
        .with_details(json!({ "code": ErrorCode::InvalidBody.as_str() }));
    error.into()
}

fn path_error_handler(err: PathError, req: &HttpRequest) -> actix_web::Error {
    let field = FieldName::new("id");
    let message = format!("{} must be an integer: {err}", field.as_str());
    let error = match req.match_info().get(field.as_str()) {
        Some(value) => field_value_error(field, ErrorCode::InvalidId, message, value),
        None => field_error(field, ErrorCode::InvalidId, message),
    };
    error.into()
}

/// JSON extractor configuration returning domain error payloads.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

/// Path extractor configuration returning domain error payloads.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(path_error_handler)
}

#[cfg(test)]
mod tests {
    //! Unit coverage for validation error payloads.

    use rstest::rstest;

    use super::*;
    use crate::domain::{ErrorCode as DomainErrorCode, NameField};

    #[rstest]
    #[case(NameField::First, "first_name")]
    #[case(NameField::Last, "last_name")]
    fn empty_names_name_their_field(#[case] field: NameField, #[case] expected: &str) {
        let error = person_validation_error(PersonValidationError::EmptyName { field });

        assert_eq!(error.code(), DomainErrorCode::InvalidRequest);
        assert_eq!(error.message(), format!("{expected} must not be empty"));
        assert_eq!(
            error.details(),
            Some(&json!({ "field": expected, "code": "empty_name" }))
        );
    }

    #[rstest]
    fn invalid_dates_echo_the_value() {
        let error = person_validation_error(PersonValidationError::InvalidBirthDate {
            value: "10/12/1815".to_owned(),
        });

        assert_eq!(
            error.details(),
            Some(&json!({
                "field": "birth_date",
                "value": "10/12/1815",
                "code": "invalid_date",
            }))
        );
    }
}
