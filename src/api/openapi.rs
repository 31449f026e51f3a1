//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::api::handlers::{article_handler, user_handler};
use crate::domain::{Article, Comment, UserResponse};

/// OpenAPI documentation for the TourWeb API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "TourWeb API",
        version = "0.1.0",
        description = "Travel articles, comments and user accounts on Redis. \
                       Responses are wrapped in a {code, message, data} envelope; code 0 is success.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    paths(
        // User endpoints
        user_handler::register,
        user_handler::login,
        user_handler::info,
        user_handler::upload_icon,
        user_handler::update_icon,
        user_handler::change_password,
        // Article endpoints
        article_handler::add_article,
        article_handler::get_article,
        article_handler::list_articles,
        article_handler::list_user_articles,
        article_handler::add_comment,
        article_handler::list_comments,
    ),
    components(
        schemas(
            UserResponse,
            Article,
            Comment,
            user_handler::CredentialsRequest,
            user_handler::IconUpdateRequest,
            user_handler::PasswordRequest,
            article_handler::ArticleRequest,
            article_handler::CommentRequest,
        )
    ),
    tags(
        (name = "Users", description = "Registration, login, profile and icon upload"),
        (name = "Articles", description = "Articles and comments")
    )
)]
pub struct ApiDoc;
