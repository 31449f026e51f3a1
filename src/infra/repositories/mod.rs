//! Repository layer - Data access abstraction
//!
//! Each repository owns the key layout of one record type in Redis and
//! exposes it through a trait so services can be tested without a store.

mod article_repository;
mod comment_repository;
mod user_repository;

pub use article_repository::{ArticleRepository, ArticleStore};
pub use comment_repository::{CommentRepository, CommentStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use article_repository::MockArticleRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use comment_repository::MockCommentRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
