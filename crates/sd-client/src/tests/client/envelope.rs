use crate::ClientError;
use crate::LoginReply;
use crate::client::envelope::{decode_login, decode_payload};

use googletest::prelude::*;
use sd_core::Customer;
use serde_json::json;

// =========================================================================
// Data envelopes
// =========================================================================

#[test]
fn given_success_envelope_when_decoded_then_returns_payload() {
    let body = json!([true, [{"customer_id": 3}, {"customer_id": 1}]]);

    let customers: Vec<Customer> = decode_payload(body).unwrap();

    assert_that!(customers.len(), eq(2));
    assert_that!(customers[0].customer_id, eq(3));
}

#[test]
fn given_extra_trailing_elements_when_decoded_then_ignored() {
    let body = json!([true, [], "trailing", 42]);

    let customers: Vec<Customer> = decode_payload(body).unwrap();

    assert!(customers.is_empty());
}

#[test]
fn given_failure_envelope_when_decoded_then_rejected_with_message() {
    let body = json!([false, "no such customer"]);

    let result: std::result::Result<Vec<Customer>, _> = decode_payload(body);

    match result {
        Err(ClientError::Rejected { message, .. }) => assert_eq!(message, "no such customer"),
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[test]
fn given_failure_envelope_without_message_when_decoded_then_generic_rejection() {
    let result: std::result::Result<Vec<Customer>, _> = decode_payload(json!([false]));

    assert!(result.unwrap_err().is_rejection());
}

#[test]
fn given_non_array_body_when_decoded_then_format_error() {
    let result: std::result::Result<Vec<Customer>, _> =
        decode_payload(json!({"customers": []}));

    assert!(matches!(result, Err(ClientError::Format { .. })));
}

#[test]
fn given_non_boolean_flag_when_decoded_then_format_error() {
    let result: std::result::Result<Vec<Customer>, _> = decode_payload(json!(["true", []]));

    assert!(matches!(result, Err(ClientError::Format { .. })));
}

#[test]
fn given_success_without_payload_when_decoded_then_format_error() {
    let result: std::result::Result<Vec<Customer>, _> = decode_payload(json!([true]));

    assert!(matches!(result, Err(ClientError::Format { .. })));
}

#[test]
fn given_payload_of_wrong_shape_when_decoded_then_json_error() {
    let result: std::result::Result<Vec<Customer>, _> =
        decode_payload(json!([true, [{"customer_id": "abc"}]]));

    assert!(matches!(result, Err(ClientError::Json { .. })));
}

// =========================================================================
// Login envelopes
// =========================================================================

#[test]
fn given_accepted_login_when_decoded_then_carries_user_and_message() {
    let reply = decode_login(json!([true, "ok", {"user_id": "u1"}])).unwrap();

    assert_eq!(
        reply,
        LoginReply::Accepted {
            message: Some("ok".to_string()),
            user_id: "u1".to_string(),
        }
    );
}

#[test]
fn given_rejected_login_when_decoded_then_carries_message() {
    let reply = decode_login(json!([false, "bad credentials", null])).unwrap();

    assert_eq!(
        reply,
        LoginReply::Rejected {
            message: Some("bad credentials".to_string())
        }
    );
}

#[test]
fn given_empty_message_when_decoded_then_message_is_none() {
    let reply = decode_login(json!([true, "", {"user_id": "u1"}])).unwrap();

    assert!(matches!(reply, LoginReply::Accepted { message: None, .. }));
}

#[test]
fn given_two_element_login_when_decoded_then_format_error() {
    let result = decode_login(json!([true, "ok"]));

    assert!(matches!(result, Err(ClientError::Format { .. })));
}

#[test]
fn given_accepted_login_without_user_id_when_decoded_then_format_error() {
    let result = decode_login(json!([true, "ok", {"name": "u1"}]));

    assert!(matches!(result, Err(ClientError::Format { .. })));
}
