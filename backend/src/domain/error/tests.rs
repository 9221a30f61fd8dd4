//! Tests for domain error construction and serialisation.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::validation_failed("bad"), ErrorCode::ValidationFailed)]
#[case(Error::not_found("missing"), ErrorCode::NotFound)]
#[case(Error::conflict("taken"), ErrorCode::Conflict)]
#[case(Error::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::NotFound, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn try_with_trace_id_rejects_blank_values() {
    let result = Error::not_found("missing").try_with_trace_id(" ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyTraceId)));
}

#[rstest]
fn new_has_no_trace_id_out_of_scope() {
    assert!(Error::internal("boom").trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id.parse().expect("valid uuid");
    let error = TraceId::scope(trace_id, async move { Error::conflict("taken") }).await;

    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
fn serialises_camel_case_and_skips_empty_fields(expected_trace_id: String) {
    let error = Error::not_found("User was not found").with_trace_id(expected_trace_id);
    let value = serde_json::to_value(&error).expect("serialise error");

    assert_eq!(
        value,
        json!({
            "code": "not_found",
            "message": "User was not found",
            "traceId": TRACE_ID,
        })
    );
}

#[rstest]
#[tokio::test]
async fn deserialising_ignores_ambient_trace(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id.parse().expect("valid uuid");
    let payload = json!({"code": "conflict", "message": "taken"});

    let error: Error = TraceId::scope(trace_id, async move {
        serde_json::from_value(payload).expect("valid payload")
    })
    .await;

    assert!(error.trace_id().is_none());
    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
fn deserialising_rejects_blank_message() {
    let payload = json!({"code": "not_found", "message": ""});
    assert!(serde_json::from_value::<Error>(payload).is_err());
}

#[rstest]
fn details_round_trip_through_json() {
    let error = Error::validation_failed("bad").with_details(json!({"field": "age"}));
    let text = serde_json::to_string(&error).expect("serialise");
    let decoded: Error = serde_json::from_str(&text).expect("deserialise");

    assert_eq!(decoded.details(), Some(&json!({"field": "age"})));
}
