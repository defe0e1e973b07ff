//! Tests for the client error taxonomy.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn server_error() -> Error {
    Error::server("Failed to fetch sessions").with_details(json!({ "status": 500 }))
}

#[rstest]
#[case(Error::validation("x"), ErrorCode::Validation)]
#[case(Error::unauthorized("x"), ErrorCode::Unauthorized)]
#[case(Error::network("x"), ErrorCode::Network)]
#[case(Error::server("x"), ErrorCode::Server)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_blank_messages() {
    let result = Error::try_new(ErrorCode::Server, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
#[case(ErrorCode::Validation)]
#[case(ErrorCode::Network)]
fn new_substitutes_default_message_for_blank_input(#[case] code: ErrorCode) {
    let error = Error::new(code, "");
    assert_eq!(error.message(), code.default_message());
}

#[rstest]
fn display_is_the_message_verbatim() {
    let error = Error::server("Mentor not found");
    assert_eq!(error.to_string(), "Mentor not found");
}

#[rstest]
fn only_unauthorized_forces_logout() {
    assert!(Error::unauthorized("expired").is_unauthorized());
    assert!(!Error::server("boom").is_unauthorized());
}

#[rstest]
fn serialises_with_snake_case_code(server_error: Error) {
    let value = serde_json::to_value(&server_error).expect("serialise error");
    assert_eq!(
        value,
        json!({
            "code": "server",
            "message": "Failed to fetch sessions",
            "details": { "status": 500 },
        })
    );
}

#[rstest]
fn deserialising_blank_message_fails() {
    let payload = json!({ "code": "network", "message": " " });
    let result: Result<Error, _> = serde_json::from_value(payload);
    assert!(result.is_err());
}
