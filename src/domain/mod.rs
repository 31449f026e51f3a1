//! Domain layer - Core business entities.
//!
//! Plain records persisted as JSON in the store, plus the pure
//! transformations applied to them before they are written.

pub mod article;
pub mod comment;
pub mod user;

pub use article::{Article, ArticleCounter, NewArticle};
pub use comment::{Comment, NewComment};
pub use user::{User, UserResponse};
