//! Validation of the error path.
//!
//! The transport synthesizes error records of the same shape for responses
//! it could not read, so those are validated exactly like service errors.

use {
    crate::{consistency::ConsistencyError, schema::{self, SchemaError}},
    model::ErrorResponse,
    serde_json::Value,
};

/// Whether a decoded response is an error response. Only the presence of
/// the `errorCode` key matters, not the HTTP status it arrived with.
pub fn is_error_response(response: &Value) -> bool {
    response
        .as_object()
        .is_some_and(|object| object.contains_key(ErrorResponse::ERROR_CODE_KEY))
}

pub fn validate_error_response(response: &Value) -> Result<ErrorResponse, SchemaError> {
    schema::parse_error_response(response)
}

/// Exact, case sensitive comparison of the returned error code.
pub fn expect_error_code(response: &ErrorResponse, expected: &str) -> Result<(), ConsistencyError> {
    if response.error_code == expected {
        return Ok(());
    }
    Err(ConsistencyError::ErrorCodeMismatch {
        expected: expected.to_string(),
        actual: response.error_code.clone(),
    })
}
