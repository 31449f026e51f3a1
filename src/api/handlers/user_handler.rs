//! User handlers: registration, login, profile and icon upload.

use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, Path, State},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::config::{MAX_UPLOAD_BYTES, UPLOAD_FIELD_NAME};
use crate::domain::UserResponse;
use crate::errors::{AppError, AppResult};
use crate::types::ApiResult;

/// Registration / login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CredentialsRequest {
    /// Account identifier
    #[validate(length(min = 1, message = "account is required"))]
    #[schema(example = "traveler01")]
    pub account: String,
    /// Password
    #[schema(example = "hunter2")]
    pub password: String,
}

/// Icon path update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IconUpdateRequest {
    /// Path returned by the upload endpoint
    #[validate(length(min = 1, message = "iconPath is required"))]
    #[schema(example = "upload/1700000000_aB3xYz.png")]
    pub icon_path: String,
}

/// Password change request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PasswordRequest {
    /// New password
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/reg", post(register))
        .route("/login", post(login))
        .route("/info/:account", get(info))
        .route(
            "/icon/upload",
            post(upload_icon).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/icon/update/:account", post(update_icon))
        .route("/password/:account", post(change_password))
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/user/reg",
    tag = "Users",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Envelope; code 1 when the account already exists"),
        (status = 400, description = "Missing fields")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CredentialsRequest>,
) -> AppResult<ApiResult<()>> {
    state
        .user_service
        .register(payload.account, payload.password)
        .await?;

    Ok(ApiResult::empty())
}

/// Check account credentials
#[utoipa::path(
    post,
    path = "/api/user/login",
    tag = "Users",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Envelope; code 1 unknown account, code 2 wrong password"),
        (status = 400, description = "Missing fields")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CredentialsRequest>,
) -> AppResult<ApiResult<()>> {
    state
        .user_service
        .login(&payload.account, &payload.password)
        .await?;

    Ok(ApiResult::empty())
}

/// Get a user's public profile
#[utoipa::path(
    get,
    path = "/api/user/info/{account}",
    tag = "Users",
    params(("account" = String, Path, description = "Account identifier")),
    responses(
        (status = 200, description = "Envelope with the user", body = UserResponse),
        (status = 500, description = "Store failure")
    )
)]
pub async fn info(
    State(state): State<AppState>,
    Path(account): Path<String>,
) -> AppResult<ApiResult<UserResponse>> {
    let user = state.user_service.get_info(&account).await?;
    Ok(ApiResult::ok(UserResponse::from(user)))
}

/// Upload an icon (multipart field `file`)
#[utoipa::path(
    post,
    path = "/api/user/icon/upload",
    tag = "Users",
    request_body(content = String, content_type = "multipart/form-data", description = "Form with a `file` part"),
    responses(
        (status = 200, description = "Envelope with the stored path; code 3 for rejected formats", body = String),
        (status = 400, description = "Body is not multipart")
    )
)]
pub async fn upload_icon(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<ApiResult<String>> {
    let mut multipart = multipart.map_err(|e| AppError::bad_request(e.body_text()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::upload(e.body_text()))?
    {
        if field.name() != Some(UPLOAD_FIELD_NAME) {
            continue;
        }

        let file_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::upload("file part carries no file name"))?;
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::upload(e.body_text()))?;

        let path = state.user_service.upload_icon(&file_name, &data).await?;
        return Ok(ApiResult::ok(path));
    }

    Err(AppError::upload("no file part in form"))
}

/// Set a user's icon path
#[utoipa::path(
    post,
    path = "/api/user/icon/update/{account}",
    tag = "Users",
    params(("account" = String, Path, description = "Account identifier")),
    request_body = IconUpdateRequest,
    responses(
        (status = 200, description = "Envelope; code 1 when the account does not exist"),
        (status = 400, description = "Missing iconPath")
    )
)]
pub async fn update_icon(
    State(state): State<AppState>,
    Path(account): Path<String>,
    ValidatedJson(payload): ValidatedJson<IconUpdateRequest>,
) -> AppResult<ApiResult<()>> {
    state
        .user_service
        .update_icon(&account, payload.icon_path)
        .await?;

    Ok(ApiResult::empty())
}

/// Change a user's password
#[utoipa::path(
    post,
    path = "/api/user/password/{account}",
    tag = "Users",
    params(("account" = String, Path, description = "Account identifier")),
    request_body = PasswordRequest,
    responses(
        (status = 200, description = "Envelope; code 1 when the account does not exist"),
        (status = 400, description = "Missing password")
    )
)]
pub async fn change_password(
    State(state): State<AppState>,
    Path(account): Path<String>,
    ValidatedJson(payload): ValidatedJson<PasswordRequest>,
) -> AppResult<ApiResult<()>> {
    state
        .user_service
        .change_password(&account, payload.password)
        .await?;

    Ok(ApiResult::empty())
}
