//! Application state - Dependency injection container.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Cache, HealthCheck};
use crate::services::{ArticleService, ServiceContainer, Services, UserService};

/// Application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Article and comment service
    pub article_service: Arc<dyn ArticleService>,
    /// Store reachability check
    pub health: Arc<dyn HealthCheck>,
    /// Directory served at `/upload`
    pub upload_dir: PathBuf,
}

impl AppState {
    /// Create application state on top of a connected store.
    pub fn from_config(cache: Arc<Cache>, config: &Config) -> Self {
        let services = Services::from_cache(cache.clone(), config);

        Self {
            user_service: services.users(),
            article_service: services.articles(),
            health: cache,
            upload_dir: config.upload_dir.clone(),
        }
    }

    /// Create application state with manually injected services.
    pub fn new(
        user_service: Arc<dyn UserService>,
        article_service: Arc<dyn ArticleService>,
        health: Arc<dyn HealthCheck>,
        upload_dir: PathBuf,
    ) -> Self {
        Self {
            user_service,
            article_service,
            health,
            upload_dir,
        }
    }
}
