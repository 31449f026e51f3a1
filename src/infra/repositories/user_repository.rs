//! User repository backed by the `user` hash (one JSON record per account).

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::KEY_USER_HASH;
use crate::domain::User;
use crate::errors::AppResult;
use crate::infra::Cache;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by account
    async fn find(&self, account: &str) -> AppResult<Option<User>>;

    /// Store a new user unless the account is taken.
    ///
    /// Returns `false` (and writes nothing) when the account already exists.
    /// The check and the write happen in one store command.
    async fn insert(&self, user: &User) -> AppResult<bool>;

    /// Overwrite the stored record of `user.account`
    async fn save(&self, user: &User) -> AppResult<()>;
}

/// Concrete implementation of UserRepository over Redis
pub struct UserStore {
    cache: Arc<Cache>,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(cache: Arc<Cache>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find(&self, account: &str) -> AppResult<Option<User>> {
        self.cache.hget_json(KEY_USER_HASH, account).await
    }

    async fn insert(&self, user: &User) -> AppResult<bool> {
        self.cache
            .hset_nx_json(KEY_USER_HASH, &user.account, user)
            .await
    }

    async fn save(&self, user: &User) -> AppResult<()> {
        self.cache
            .hset_json(KEY_USER_HASH, &user.account, user)
            .await
    }
}
