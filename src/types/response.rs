use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use crate::config::{CODE_OK, MESSAGE_OK};

/// Result envelope returned by every endpoint: `{code, message, data}`.
///
/// `code == 0` means success; any other value pairs with a human-readable
/// message and a `null` data field.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResult<T> {
    pub code: i32,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            code: CODE_OK,
            message: MESSAGE_OK.to_string(),
            data: Some(data),
        }
    }

    pub fn error(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }
}

impl ApiResult<()> {
    /// Success without payload
    pub fn empty() -> Self {
        Self {
            code: CODE_OK,
            message: MESSAGE_OK.to_string(),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResult<T> {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}
