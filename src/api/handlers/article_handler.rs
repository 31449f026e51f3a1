//! Article and comment handlers.

use axum::{
    extract::{rejection::PathRejection, Path, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{Article, Comment, NewArticle, NewComment};
use crate::errors::{AppError, AppResult};
use crate::types::ApiResult;

/// Article publication request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArticleRequest {
    /// Title (surrounding whitespace is trimmed)
    #[validate(length(min = 1, message = "title is required"))]
    #[schema(example = "Three days in Dali")]
    pub title: String,
    /// Body text
    #[validate(length(min = 1, message = "content is required"))]
    pub content: String,
    /// Author account
    #[validate(length(min = 1, message = "userAccount is required"))]
    #[schema(example = "traveler01")]
    pub user_account: String,
    /// Cover image path
    pub img_path: Option<String>,
    /// Whether the trip was abroad
    pub is_foreign: Option<bool>,
}

impl From<ArticleRequest> for NewArticle {
    fn from(req: ArticleRequest) -> Self {
        Self {
            title: req.title,
            content: req.content,
            user_account: req.user_account,
            img_path: req.img_path,
            is_foreign: req.is_foreign.unwrap_or(false),
        }
    }
}

/// Comment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentRequest {
    /// Comment text
    #[validate(length(min = 1, message = "content is required"))]
    pub content: String,
    /// Commenter account
    #[validate(length(min = 1, message = "userAccount is required"))]
    pub user_account: String,
    /// Must match the id in the path
    #[schema(example = 1700000000)]
    pub article_id: i64,
}

/// Create article routes
pub fn article_routes() -> Router<AppState> {
    Router::new()
        .route("/article", post(add_article))
        .route("/article/:id", get(get_article))
        .route("/articles", get(list_articles))
        .route("/articles/:account", get(list_user_articles))
        .route("/comment/:id", post(add_comment))
        .route("/comments/:id", get(list_comments))
}

/// Numeric article id from the path, or a 400.
fn article_id(path: Result<Path<i64>, PathRejection>) -> AppResult<i64> {
    path.map(|Path(id)| id)
        .map_err(|e| AppError::bad_request(e.body_text()))
}

/// Publish an article
#[utoipa::path(
    post,
    path = "/api/user/article",
    tag = "Articles",
    request_body = ArticleRequest,
    responses(
        (status = 200, description = "Envelope with the stored article", body = Article),
        (status = 400, description = "Missing fields"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn add_article(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ArticleRequest>,
) -> AppResult<ApiResult<Article>> {
    let article = state.article_service.add_article(payload.into()).await?;
    Ok(ApiResult::ok(article))
}

/// Read an article (counts a click)
#[utoipa::path(
    get,
    path = "/api/user/article/{id}",
    tag = "Articles",
    params(("id" = i64, Path, description = "Article id")),
    responses(
        (status = 200, description = "Envelope with the article; code 1 when it does not exist", body = Article),
        (status = 400, description = "Non-numeric id"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn get_article(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<ApiResult<Article>> {
    let id = article_id(path)?;
    let article = state.article_service.get_article(id).await?;
    Ok(ApiResult::ok(article))
}

/// List every article (bare JSON array, unordered)
#[utoipa::path(
    get,
    path = "/api/user/articles",
    tag = "Articles",
    responses(
        (status = 200, description = "All articles", body = Vec<Article>),
        (status = 500, description = "Store failure")
    )
)]
pub async fn list_articles(State(state): State<AppState>) -> AppResult<Json<Vec<Article>>> {
    let articles = state.article_service.list_articles().await?;
    Ok(Json(articles))
}

/// List one author's articles, newest first
#[utoipa::path(
    get,
    path = "/api/user/articles/{account}",
    tag = "Articles",
    params(("account" = String, Path, description = "Author account")),
    responses(
        (status = 200, description = "Envelope with the author's articles", body = Vec<Article>),
        (status = 500, description = "Store failure")
    )
)]
pub async fn list_user_articles(
    State(state): State<AppState>,
    Path(account): Path<String>,
) -> AppResult<ApiResult<Vec<Article>>> {
    let articles = state.article_service.list_user_articles(&account).await?;
    Ok(ApiResult::ok(articles))
}

/// Comment on an article
#[utoipa::path(
    post,
    path = "/api/user/comment/{id}",
    tag = "Articles",
    params(("id" = i64, Path, description = "Article id")),
    request_body = CommentRequest,
    responses(
        (status = 200, description = "Envelope with the stored comment; code 1 when the article does not exist", body = Comment),
        (status = 400, description = "Missing fields, missing articleId or one that differs from the path")
    )
)]
pub async fn add_comment(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    ValidatedJson(payload): ValidatedJson<CommentRequest>,
) -> AppResult<ApiResult<Comment>> {
    let id = article_id(path)?;

    if payload.article_id != id {
        return Err(AppError::bad_request("articleId does not match the path"));
    }

    let comment = state
        .article_service
        .add_comment(
            id,
            NewComment {
                content: payload.content,
                user_account: payload.user_account,
            },
        )
        .await?;

    Ok(ApiResult::ok(comment))
}

/// List an article's comments, oldest first
#[utoipa::path(
    get,
    path = "/api/user/comments/{id}",
    tag = "Articles",
    params(("id" = i64, Path, description = "Article id")),
    responses(
        (status = 200, description = "Envelope with the comments; code 1 when the article does not exist", body = Vec<Comment>),
        (status = 400, description = "Non-numeric id")
    )
)]
pub async fn list_comments(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<ApiResult<Vec<Comment>>> {
    let id = article_id(path)?;
    let comments = state.article_service.list_comments(id).await?;
    Ok(ApiResult::ok(comments))
}
