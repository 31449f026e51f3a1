//! In-memory repositories and app wiring shared by the integration tests.

#![allow(dead_code)]

use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use tempfile::TempDir;

use tourweb::api::{create_router, AppState};
use tourweb::domain::{Article, ArticleCounter, Comment, User};
use tourweb::errors::{AppError, AppResult};
use tourweb::infra::{ArticleRepository, CommentRepository, FileStorage, HealthCheck, UserRepository};
use tourweb::services::{ArticleManager, UserManager};

/// Users keyed by account; `insert` has HSETNX semantics.
#[derive(Default)]
pub struct InMemoryUsers {
    records: Mutex<HashMap<String, User>>,
}

impl InMemoryUsers {
    pub fn get(&self, account: &str) -> Option<User> {
        self.records.lock().unwrap().get(account).cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find(&self, account: &str) -> AppResult<Option<User>> {
        Ok(self.get(account))
    }

    async fn insert(&self, user: &User) -> AppResult<bool> {
        match self.records.lock().unwrap().entry(user.account.clone()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(user.clone());
                Ok(true)
            }
        }
    }

    async fn save(&self, user: &User) -> AppResult<()> {
        self.records
            .lock()
            .unwrap()
            .insert(user.account.clone(), user.clone());
        Ok(())
    }
}

/// Articles keyed by id plus a per-author id index.
#[derive(Default)]
pub struct InMemoryArticles {
    records: Mutex<HashMap<i64, Article>>,
    index: Mutex<HashMap<String, BTreeSet<i64>>>,
}

impl InMemoryArticles {
    pub fn get(&self, id: i64) -> Option<Article> {
        self.records.lock().unwrap().get(&id).cloned()
    }

    pub fn indexed(&self, account: &str) -> Vec<i64> {
        self.index
            .lock()
            .unwrap()
            .get(account)
            .map(|ids| ids.iter().copied().collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ArticleRepository for InMemoryArticles {
    async fn find(&self, id: i64) -> AppResult<Option<Article>> {
        Ok(self.get(id))
    }

    async fn list(&self) -> AppResult<Vec<Article>> {
        Ok(self.records.lock().unwrap().values().cloned().collect())
    }

    async fn find_many(&self, ids: &[i64]) -> AppResult<Vec<Article>> {
        let records = self.records.lock().unwrap();
        Ok(ids.iter().filter_map(|id| records.get(id).cloned()).collect())
    }

    async fn save(&self, article: &Article) -> AppResult<()> {
        self.records
            .lock()
            .unwrap()
            .insert(article.id, article.clone());
        Ok(())
    }

    async fn increment(&self, id: i64, counter: ArticleCounter) -> AppResult<Option<Article>> {
        let mut records = self.records.lock().unwrap();
        Ok(records.get_mut(&id).map(|article| {
            article.bump(counter);
            article.clone()
        }))
    }

    async fn index_for_user(&self, account: &str, id: i64) -> AppResult<()> {
        self.index
            .lock()
            .unwrap()
            .entry(account.to_string())
            .or_default()
            .insert(id);
        Ok(())
    }

    async fn ids_for_user(&self, account: &str) -> AppResult<Vec<i64>> {
        let mut ids = self.indexed(account);
        ids.reverse();
        Ok(ids)
    }
}

/// Article repository that yields to the scheduler around every call, so
/// concurrent service calls interleave the way store round trips do.
pub struct YieldingArticles(pub Arc<InMemoryArticles>);

impl YieldingArticles {
    async fn pause() {
        tokio::task::yield_now().await;
    }
}

#[async_trait]
impl ArticleRepository for YieldingArticles {
    async fn find(&self, id: i64) -> AppResult<Option<Article>> {
        Self::pause().await;
        let found = self.0.find(id).await;
        Self::pause().await;
        found
    }

    async fn list(&self) -> AppResult<Vec<Article>> {
        Self::pause().await;
        self.0.list().await
    }

    async fn find_many(&self, ids: &[i64]) -> AppResult<Vec<Article>> {
        Self::pause().await;
        self.0.find_many(ids).await
    }

    async fn save(&self, article: &Article) -> AppResult<()> {
        Self::pause().await;
        self.0.save(article).await
    }

    async fn increment(&self, id: i64, counter: ArticleCounter) -> AppResult<Option<Article>> {
        Self::pause().await;
        let updated = self.0.increment(id, counter).await;
        Self::pause().await;
        updated
    }

    async fn index_for_user(&self, account: &str, id: i64) -> AppResult<()> {
        Self::pause().await;
        self.0.index_for_user(account, id).await
    }

    async fn ids_for_user(&self, account: &str) -> AppResult<Vec<i64>> {
        Self::pause().await;
        self.0.ids_for_user(account).await
    }
}

/// Comment lists keyed by article id.
#[derive(Default)]
pub struct InMemoryComments {
    lists: Mutex<HashMap<i64, Vec<Comment>>>,
}

#[async_trait]
impl CommentRepository for InMemoryComments {
    async fn append(&self, comment: &Comment) -> AppResult<()> {
        self.lists
            .lock()
            .unwrap()
            .entry(comment.article_id)
            .or_default()
            .push(comment.clone());
        Ok(())
    }

    async fn list(&self, article_id: i64) -> AppResult<Vec<Comment>> {
        Ok(self
            .lists
            .lock()
            .unwrap()
            .get(&article_id)
            .cloned()
            .unwrap_or_default())
    }
}

/// Health check with a fixed answer.
pub struct StaticHealth(pub bool);

#[async_trait]
impl HealthCheck for StaticHealth {
    async fn ping(&self) -> AppResult<()> {
        if self.0 {
            Ok(())
        } else {
            Err(AppError::internal("store unreachable"))
        }
    }
}

/// Fully wired application over in-memory repositories.
pub struct TestApp {
    pub router: Router,
    pub users: Arc<InMemoryUsers>,
    pub articles: Arc<InMemoryArticles>,
    pub comments: Arc<InMemoryComments>,
    pub upload_dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_health(true)
    }

    pub fn with_health(healthy: bool) -> Self {
        let upload_dir = tempfile::tempdir().unwrap();
        let users = Arc::new(InMemoryUsers::default());
        let articles = Arc::new(InMemoryArticles::default());
        let comments = Arc::new(InMemoryComments::default());

        let state = AppState::new(
            Arc::new(UserManager::new(
                users.clone(),
                FileStorage::new(upload_dir.path()),
            )),
            Arc::new(ArticleManager::new(articles.clone(), comments.clone())),
            Arc::new(StaticHealth(healthy)),
            upload_dir.path().to_path_buf(),
        );

        Self {
            router: create_router(state),
            users,
            articles,
            comments,
            upload_dir,
        }
    }
}
