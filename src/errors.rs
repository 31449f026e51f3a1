//! Centralized error handling.
//!
//! Every failure is rendered as the `{code, message, data}` result envelope.
//! Business outcomes (duplicate account, wrong password, missing article)
//! keep HTTP 200 and carry a nonzero code; only malformed requests (400)
//! and store failures (500) change the status line.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use redis::RedisError;
use thiserror::Error;

use crate::config::{CODE_BAD_REQUEST, CODE_FAILURE, CODE_NOT_FOUND, CODE_UNSUPPORTED_MEDIA};
use crate::types::ApiResult;

/// Records that can be looked up by key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Account,
    Article,
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resource::Account => write!(f, "account"),
            Resource::Article => write!(f, "article"),
        }
    }
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("account already exists")]
    Conflict,

    #[error("{0} does not exist")]
    NotFound(Resource),

    #[error("incorrect password")]
    Unauthorized,

    #[error("file format not allowed")]
    UnsupportedMediaType,

    #[error("upload failed: {0}")]
    Upload(String),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    #[error("Store error")]
    Store(#[from] RedisError),

    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    /// Envelope code for client
    pub fn code(&self) -> i32 {
        match self {
            AppError::Conflict | AppError::NotFound(_) | AppError::Upload(_) => CODE_NOT_FOUND,
            AppError::Unauthorized | AppError::Store(_) | AppError::Internal(_) => CODE_FAILURE,
            AppError::UnsupportedMediaType => CODE_UNSUPPORTED_MEDIA,
            AppError::BadRequest(_) => CODE_BAD_REQUEST,
        }
    }

    /// HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Store(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::OK,
        }
    }

    /// User-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Conflict => "账号已存在".to_string(),
            AppError::NotFound(Resource::Account) => "账号不存在".to_string(),
            AppError::NotFound(Resource::Article) => "文章不存在".to_string(),
            AppError::Unauthorized => "密码不正确".to_string(),
            AppError::UnsupportedMediaType => "不允许上传该格式的文件".to_string(),
            AppError::Upload(reason) => {
                tracing::warn!("Upload rejected: {}", reason);
                "上传文件异常".to_string()
            }
            AppError::BadRequest(msg) => format!("参数错误: {}", msg),

            AppError::Store(e) => {
                tracing::error!("Store error: {:?}", e);
                "数据库连接异常".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "数据库连接异常".to_string()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body: ApiResult<()> = ApiResult::error(self.code(), self.user_message());

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self, resource: Resource) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, resource: Resource) -> AppResult<T> {
        self.ok_or(AppError::NotFound(resource))
    }
}

/// Convenience constructors
impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn upload(msg: impl Into<String>) -> Self {
        AppError::Upload(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
