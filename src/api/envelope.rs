//! The uniform `{success, message, data, statusCode}` result shape.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::ApiError;

/// Status code the backend uses for a successful operation.
pub const STATUS_OK: u16 = 200;

/// Raw body shape returned by every backend endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireEnvelope {
    #[serde(default)]
    pub status_code: Option<u16>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// Normalized outcome of one backend call.
///
/// Transport failures and application-level rejections produce the same
/// shape, so callers branch on `success` only.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub status_code: u16,
}

impl<T> Envelope<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            status_code: STATUS_OK,
        }
    }

    /// A failed envelope. An empty message is replaced by a generic one so
    /// the failure text is never blank.
    pub fn failure(status_code: u16, message: impl Into<String>) -> Self {
        let mut message = message.into();
        if message.trim().is_empty() {
            message = "Request failed".to_string();
        }
        Self {
            success: false,
            message,
            data: None,
            status_code,
        }
    }

    /// Payload of a successful envelope, or its failure message.
    pub fn into_result(self) -> Result<T, String> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            _ => Err(self.message),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Envelope<U> {
        Envelope {
            success: self.success,
            message: self.message,
            data: self.data.map(f),
            status_code: self.status_code,
        }
    }
}

impl<T: DeserializeOwned> Envelope<T> {
    /// Interprets a decoded wire body.
    ///
    /// Success requires `statusCode == 200` and truthy `data` that decodes
    /// into `T`; `null`, `false`, `0` and `""` count as missing. When the
    /// body omits `statusCode`, the HTTP status is used.
    pub fn from_wire(http_status: u16, wire: WireEnvelope, fallback: &str) -> Self {
        let status_code = wire.status_code.unwrap_or(http_status);
        let message = wire.message.unwrap_or_default();

        match wire.data.filter(is_truthy) {
            Some(data) if status_code == STATUS_OK => match serde_json::from_value::<T>(data) {
                Ok(data) => Self {
                    success: true,
                    message,
                    data: Some(data),
                    status_code,
                },
                Err(e) => Self::failure(status_code, format!("{}: unexpected data ({})", fallback, e)),
            },
            _ if message.trim().is_empty() => Self::failure(status_code, fallback),
            _ => Self::failure(status_code, message),
        }
    }
}

fn is_truthy(data: &Value) -> bool {
    match data {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl<T> From<ApiError> for Envelope<T> {
    fn from(err: ApiError) -> Self {
        Self::failure(err.status_code(), err.to_string())
    }
}
