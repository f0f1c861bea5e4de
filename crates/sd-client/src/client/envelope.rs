use crate::{ClientError, ClientResult};

use serde::de::DeserializeOwned;
use serde_json::Value;

const DEFAULT_REJECTION_MESSAGE: &str = "Request rejected";

/// Outcome of a well-formed login envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginReply {
    Accepted {
        message: Option<String>,
        user_id: String,
    },
    Rejected {
        message: Option<String>,
    },
}

/// Decode `[true, payload, ...]` into `T`.
///
/// `[false, message?, ...]` becomes [`ClientError::Rejected`]; anything that
/// is not an array led by a boolean is a [`ClientError::Format`].
pub(crate) fn decode_payload<T: DeserializeOwned>(body: Value) -> ClientResult<T> {
    let (success, mut items) = split_envelope(body)?;

    if !success {
        let message = message_at(&items, 1).unwrap_or_else(|| DEFAULT_REJECTION_MESSAGE.into());
        return Err(ClientError::rejected(message));
    }

    if items.len() < 2 {
        return Err(ClientError::format("envelope is missing its payload"));
    }

    let payload = items.swap_remove(1);
    serde_json::from_value(payload).map_err(ClientError::from_json)
}

/// Decode the login form `[success, message, user]`.
pub(crate) fn decode_login(body: Value) -> ClientResult<LoginReply> {
    let (success, items) = split_envelope(body)?;

    if items.len() < 3 {
        return Err(ClientError::format(format!(
            "login envelope needs 3 elements, got {}",
            items.len()
        )));
    }

    let message = message_at(&items, 1);

    if !success {
        return Ok(LoginReply::Rejected { message });
    }

    let user_id = items[2]
        .get("user_id")
        .and_then(Value::as_str)
        .ok_or_else(|| ClientError::format("login envelope has no user_id"))?
        .to_string();

    Ok(LoginReply::Accepted { message, user_id })
}

fn split_envelope(body: Value) -> ClientResult<(bool, Vec<Value>)> {
    let Value::Array(items) = body else {
        return Err(ClientError::format("expected an array envelope"));
    };

    match items.first() {
        Some(Value::Bool(success)) => Ok((*success, items)),
        _ => Err(ClientError::format(
            "envelope must start with a boolean success flag",
        )),
    }
}

fn message_at(items: &[Value], index: usize) -> Option<String> {
    items
        .get(index)
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .map(String::from)
}
