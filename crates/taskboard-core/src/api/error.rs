//! API error taxonomy

use serde_json::Value;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Backend unreachable or the request could not be sent
    #[error("network error: {0}")]
    Transport(String),

    /// Backend answered with a 4xx/5xx status
    #[error("HTTP {status}{}", message_suffix(.message))]
    Status { status: u16, message: Option<String> },

    /// Success status but the body did not match the contract
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Build a status error, pulling a human message out of the body if present
    pub fn from_status(status: u16, body: &str) -> Self {
        ApiError::Status { status, message: extract_message(body) }
    }

    /// Message to show the user: the server's own text, else `fallback`
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Status { message: Some(m), .. } => m.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn message_suffix(message: &Option<String>) -> String {
    message.as_deref().map(|m| format!(": {m}")).unwrap_or_default()
}

/// `{"error": ..}`, then `{"detail": ..}`, then the first message of a
/// field-keyed validation map such as `{"title": ["too short"]}`.
fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let obj = value.as_object()?;

    for key in ["error", "detail"] {
        if let Some(Value::String(s)) = obj.get(key) {
            return Some(s.clone());
        }
    }

    obj.values().find_map(|v| match v {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => items.iter().find_map(|i| i.as_str().map(str::to_string)),
        _ => None,
    })
}
