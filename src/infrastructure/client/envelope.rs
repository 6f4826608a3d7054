//! Normalizes the two response shapes the catalog service produces.
//!
//! Handlers either answer with the payload directly, or wrap it as
//! `{"statusCode": 200, "body": "<json string>"}`. In the wrapped form the
//! inner status is authoritative and the body needs a second decode pass.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::domain::errors::ApiError;

/// Status and JSON body after unwrapping any envelope. `body` is `None` when
/// the response was empty or not JSON.
#[derive(Debug, PartialEq)]
pub(crate) struct Unwrapped {
    pub status: u16,
    pub body: Option<Value>,
}

pub(crate) fn unwrap_envelope(http_status: u16, bytes: &[u8]) -> Unwrapped {
    let Ok(value) = serde_json::from_slice::<Value>(bytes) else {
        return Unwrapped {
            status: http_status,
            body: None,
        };
    };

    let Value::Object(ref map) = value else {
        return Unwrapped {
            status: http_status,
            body: Some(value),
        };
    };

    let (Some(status_code), Some(inner)) = (map.get("statusCode"), map.get("body")) else {
        return Unwrapped {
            status: http_status,
            body: Some(value),
        };
    };

    let status = status_code
        .as_u64()
        .and_then(|s| u16::try_from(s).ok())
        .unwrap_or(http_status);

    let body = match inner {
        Value::String(encoded) => serde_json::from_str::<Value>(encoded).ok(),
        Value::Null => None,
        other => Some(other.clone()),
    };

    Unwrapped { status, body }
}

/// Structured `{"error": "..."}` text from a failure body, if present.
pub(crate) fn error_message(body: Option<&Value>) -> Option<String> {
    let map = body?.as_object()?;
    ["error", "message"]
        .iter()
        .filter_map(|key| map.get(*key))
        .find_map(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn check_status(unwrapped: &Unwrapped, fallback: &str) -> Result<(), ApiError> {
    if (200..300).contains(&unwrapped.status) {
        return Ok(());
    }
    let message =
        error_message(unwrapped.body.as_ref()).unwrap_or_else(|| fallback.to_string());
    Err(ApiError::from_status(unwrapped.status, message))
}

/// Decode a response that is expected to carry a payload.
pub(crate) fn decode<T>(http_status: u16, bytes: &[u8], fallback: &str) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    let unwrapped = unwrap_envelope(http_status, bytes);
    check_status(&unwrapped, fallback)?;

    let Some(body) = unwrapped.body else {
        debug!(status = unwrapped.status, "success response without a JSON body");
        return Err(ApiError::Decode(fallback.to_string()));
    };

    serde_json::from_value(body).map_err(|err| {
        debug!(error = %err, "response body did not match the expected shape");
        ApiError::Decode(fallback.to_string())
    })
}

/// Decode a response whose success body is irrelevant.
pub(crate) fn decode_empty(http_status: u16, bytes: &[u8], fallback: &str) -> Result<(), ApiError> {
    check_status(&unwrap_envelope(http_status, bytes), fallback)
}
