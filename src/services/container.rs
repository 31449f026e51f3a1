//! Service Container - Centralized service access.
//!
//! Builds every service on top of one shared store connection so handlers
//! receive their dependencies explicitly instead of through globals.

use std::sync::Arc;

use super::{ArticleManager, ArticleService, UserManager, UserService};
use crate::config::Config;
use crate::infra::{ArticleStore, Cache, CommentStore, FileStorage, UserStore};

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;

    /// Get article service
    fn articles(&self) -> Arc<dyn ArticleService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    user_service: Arc<dyn UserService>,
    article_service: Arc<dyn ArticleService>,
}

impl Services {
    /// Create service container backed by Redis and the configured upload directory
    pub fn from_cache(cache: Arc<Cache>, config: &Config) -> Self {
        let user_service = Arc::new(UserManager::new(
            Arc::new(UserStore::new(cache.clone())),
            FileStorage::new(config.upload_dir.clone()),
        ));
        let article_service = Arc::new(ArticleManager::new(
            Arc::new(ArticleStore::new(cache.clone())),
            Arc::new(CommentStore::new(cache)),
        ));

        Self {
            user_service,
            article_service,
        }
    }
}

impl ServiceContainer for Services {
    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn articles(&self) -> Arc<dyn ArticleService> {
        self.article_service.clone()
    }
}
