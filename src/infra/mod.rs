//! Infrastructure layer - External systems integration
//!
//! - Redis client (hashes, sorted sets, lists)
//! - Redis-backed repositories for users, articles and comments
//! - Local file storage for uploaded icons

pub mod cache;
pub mod repositories;
pub mod storage;

pub use cache::{Cache, HealthCheck};
pub use repositories::{
    ArticleRepository, ArticleStore, CommentRepository, CommentStore, UserRepository, UserStore,
};
pub use storage::FileStorage;

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockArticleRepository, MockCommentRepository, MockUserRepository};
