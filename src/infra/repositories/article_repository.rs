//! Article repository.
//!
//! Records live in the `article` hash keyed by id; `user_article:{account}`
//! is a sorted set of the author's ids scored by the id itself, so a
//! reverse range reads newest first.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{user_article_key, KEY_ARTICLE_HASH};
use crate::domain::{Article, ArticleCounter};
use crate::errors::AppResult;
use crate::infra::Cache;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Find article by id
    async fn find(&self, id: i64) -> AppResult<Option<Article>>;

    /// Every stored article, in no particular order
    async fn list(&self) -> AppResult<Vec<Article>>;

    /// Articles for the given ids, in the order given; unknown ids are skipped
    async fn find_many(&self, ids: &[i64]) -> AppResult<Vec<Article>>;

    /// Write (or overwrite) an article record
    async fn save(&self, article: &Article) -> AppResult<()>;

    /// Atomically add one to a counter; `None` when the article is absent
    async fn increment(&self, id: i64, counter: ArticleCounter) -> AppResult<Option<Article>>;

    /// Add an article id to its author's index
    async fn index_for_user(&self, account: &str, id: i64) -> AppResult<()>;

    /// Ids of an author's articles, newest first
    async fn ids_for_user(&self, account: &str) -> AppResult<Vec<i64>>;
}

/// Concrete implementation of ArticleRepository over Redis
pub struct ArticleStore {
    cache: Arc<Cache>,
}

impl ArticleStore {
    pub fn new(cache: Arc<Cache>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl ArticleRepository for ArticleStore {
    async fn find(&self, id: i64) -> AppResult<Option<Article>> {
        self.cache
            .hget_json(KEY_ARTICLE_HASH, &id.to_string())
            .await
    }

    async fn list(&self) -> AppResult<Vec<Article>> {
        self.cache.hvals_json(KEY_ARTICLE_HASH).await
    }

    async fn find_many(&self, ids: &[i64]) -> AppResult<Vec<Article>> {
        let fields: Vec<String> = ids.iter().map(i64::to_string).collect();
        self.cache.hmget_json(KEY_ARTICLE_HASH, &fields).await
    }

    async fn save(&self, article: &Article) -> AppResult<()> {
        self.cache
            .hset_json(KEY_ARTICLE_HASH, &article.id.to_string(), article)
            .await
    }

    async fn increment(&self, id: i64, counter: ArticleCounter) -> AppResult<Option<Article>> {
        self.cache
            .hincr_json(KEY_ARTICLE_HASH, &id.to_string(), counter.field(), 1)
            .await
    }

    async fn index_for_user(&self, account: &str, id: i64) -> AppResult<()> {
        self.cache
            .zadd(&user_article_key(account), &id.to_string(), id)
            .await
    }

    async fn ids_for_user(&self, account: &str) -> AppResult<Vec<i64>> {
        let members = self.cache.zrevrange_all(&user_article_key(account)).await?;

        // Members are written from i64 ids; anything else is foreign data.
        Ok(members
            .iter()
            .filter_map(|member| match member.parse() {
                Ok(id) => Some(id),
                Err(_) => {
                    tracing::warn!(account = %account, member = %member, "Skipping malformed article index entry");
                    None
                }
            })
            .collect())
    }
}
