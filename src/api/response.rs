//! Reading the JSON envelope every dashboard endpoint answers with.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{ApiError, ApiResult};

pub const BOT_NOT_IN_GUILD: &str = "Bot not in guild";

/// The failure message carried by a response body, if any. Handles both the single
/// `error` string and the `errors` list.
pub fn error_message(body: &Value) -> Option<String> {
    match body.get("error") {
        Some(Value::String(message)) => return Some(message.clone()),
        Some(Value::Null) | None => {}
        Some(other) => return Some(other.to_string()),
    }

    let messages: Vec<String> = body
        .get("errors")?
        .as_array()?
        .iter()
        .map(|error| match error {
            Value::String(message) => message.clone(),
            other => other.to_string(),
        })
        .collect();

    (!messages.is_empty()).then(|| messages.join("\n"))
}

fn check(status: StatusCode, body: &Value) -> ApiResult<()> {
    if let Some(message) = error_message(body) {
        if message == BOT_NOT_IN_GUILD {
            return Err(ApiError::BotNotInGuild);
        }
        return Err(ApiError::Remote(message));
    }

    if !status.is_success() {
        return Err(ApiError::Remote(status.to_string()));
    }

    Ok(())
}

fn is_ack(body: &Value) -> bool {
    match body {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

pub fn decode<T: DeserializeOwned>(status: StatusCode, body: Value) -> ApiResult<T> {
    check(status, &body)?;

    Ok(serde_json::from_value(body)?)
}

/// Like [`decode`], but an empty object or empty body is a bare acknowledgement.
pub fn decode_ack<T: DeserializeOwned>(status: StatusCode, body: Value) -> ApiResult<Option<T>> {
    check(status, &body)?;

    if is_ack(&body) {
        return Ok(None);
    }

    Ok(Some(serde_json::from_value(body)?))
}
