//! Comment repository backed by one list per article (`comment:{articleId}`).

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::comment_key;
use crate::domain::Comment;
use crate::errors::AppResult;
use crate::infra::Cache;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Append a comment to its article's list
    async fn append(&self, comment: &Comment) -> AppResult<()>;

    /// All comments of an article, oldest first
    async fn list(&self, article_id: i64) -> AppResult<Vec<Comment>>;
}

pub struct CommentStore {
    cache: Arc<Cache>,
}

impl CommentStore {
    pub fn new(cache: Arc<Cache>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl CommentRepository for CommentStore {
    async fn append(&self, comment: &Comment) -> AppResult<()> {
        self.cache
            .rpush_json(&comment_key(comment.article_id), comment)
            .await
    }

    async fn list(&self, article_id: i64) -> AppResult<Vec<Comment>> {
        self.cache.lrange_json(&comment_key(article_id)).await
    }
}
