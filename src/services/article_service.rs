//! Article service - Publishing, reading and commenting.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use crate::domain::{Article, ArticleCounter, Comment, NewArticle, NewComment};
use crate::errors::{AppResult, OptionExt, Resource};
use crate::infra::{ArticleRepository, CommentRepository};

/// Article service trait for dependency injection.
#[async_trait]
pub trait ArticleService: Send + Sync {
    /// Publish a new article and index it under its author
    async fn add_article(&self, new: NewArticle) -> AppResult<Article>;

    /// Read an article, counting the visit
    async fn get_article(&self, id: i64) -> AppResult<Article>;

    /// All articles, in no particular order
    async fn list_articles(&self) -> AppResult<Vec<Article>>;

    /// An author's articles, newest first
    async fn list_user_articles(&self, account: &str) -> AppResult<Vec<Article>>;

    /// Comment on an existing article
    async fn add_comment(&self, article_id: i64, new: NewComment) -> AppResult<Comment>;

    /// Comments of an existing article, oldest first
    async fn list_comments(&self, article_id: i64) -> AppResult<Vec<Comment>>;
}

/// Concrete implementation of ArticleService.
pub struct ArticleManager {
    articles: Arc<dyn ArticleRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl ArticleManager {
    pub fn new(articles: Arc<dyn ArticleRepository>, comments: Arc<dyn CommentRepository>) -> Self {
        Self { articles, comments }
    }

    async fn existing(&self, id: i64) -> AppResult<Article> {
        self.articles
            .find(id)
            .await?
            .ok_or_not_found(Resource::Article)
    }
}

#[async_trait]
impl ArticleService for ArticleManager {
    async fn add_article(&self, new: NewArticle) -> AppResult<Article> {
        let article = Article::publish(new, Utc::now());

        self.articles.save(&article).await?;
        self.articles
            .index_for_user(&article.user_account, article.id)
            .await?;

        tracing::info!(id = article.id, account = %article.user_account, "Article published");
        Ok(article)
    }

    async fn get_article(&self, id: i64) -> AppResult<Article> {
        self.articles
            .increment(id, ArticleCounter::Clicks)
            .await?
            .ok_or_not_found(Resource::Article)
    }

    async fn list_articles(&self) -> AppResult<Vec<Article>> {
        self.articles.list().await
    }

    async fn list_user_articles(&self, account: &str) -> AppResult<Vec<Article>> {
        let ids = self.articles.ids_for_user(account).await?;
        self.articles.find_many(&ids).await
    }

    async fn add_comment(&self, article_id: i64, new: NewComment) -> AppResult<Comment> {
        self.existing(article_id).await?;
        let comment = Comment::new(article_id, new, Utc::now());

        self.comments.append(&comment).await?;
        self.articles
            .increment(article_id, ArticleCounter::Comments)
            .await?
            .ok_or_not_found(Resource::Article)?;

        tracing::debug!(article_id, account = %comment.user_account, "Comment added");
        Ok(comment)
    }

    async fn list_comments(&self, article_id: i64) -> AppResult<Vec<Comment>> {
        self.existing(article_id).await?;
        self.comments.list(article_id).await
    }
}
