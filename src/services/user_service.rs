//! User service - Registration, login, profile updates and icon upload.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::{distributions::Alphanumeric, Rng};
use std::path::Path;
use std::sync::Arc;

use crate::config::{is_allowed_icon_extension, UPLOAD_RANDOM_SUFFIX_LENGTH};
use crate::domain::User;
use crate::errors::{AppError, AppResult, OptionExt, Resource};
use crate::infra::{FileStorage, UserRepository};

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a new account; `Conflict` if it is taken
    async fn register(&self, account: String, password: String) -> AppResult<()>;

    /// Check credentials
    async fn login(&self, account: &str, password: &str) -> AppResult<()>;

    /// Get the stored user
    async fn get_info(&self, account: &str) -> AppResult<User>;

    /// Replace the user's icon path
    async fn update_icon(&self, account: &str, icon_path: String) -> AppResult<()>;

    /// Replace the user's password
    async fn change_password(&self, account: &str, password: String) -> AppResult<()>;

    /// Store an uploaded icon and return its relative path
    async fn upload_icon(&self, file_name: &str, data: &[u8]) -> AppResult<String>;
}

/// Concrete implementation of UserService.
pub struct UserManager {
    users: Arc<dyn UserRepository>,
    storage: FileStorage,
}

impl UserManager {
    pub fn new(users: Arc<dyn UserRepository>, storage: FileStorage) -> Self {
        Self { users, storage }
    }

    /// Load, modify and rewrite a user record.
    async fn modify<F>(&self, account: &str, apply: F) -> AppResult<()>
    where
        F: FnOnce(&mut User) + Send,
    {
        let mut user = self
            .users
            .find(account)
            .await?
            .ok_or_not_found(Resource::Account)?;

        apply(&mut user);
        self.users.save(&user).await
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn register(&self, account: String, password: String) -> AppResult<()> {
        let user = User::new(account, password);

        if !self.users.insert(&user).await? {
            tracing::debug!(account = %user.account, "Registration rejected, account exists");
            return Err(AppError::Conflict);
        }

        tracing::info!(account = %user.account, "User registered");
        Ok(())
    }

    async fn login(&self, account: &str, password: &str) -> AppResult<()> {
        let user = self
            .users
            .find(account)
            .await?
            .ok_or_not_found(Resource::Account)?;

        if !user.password_matches(password) {
            return Err(AppError::Unauthorized);
        }

        Ok(())
    }

    async fn get_info(&self, account: &str) -> AppResult<User> {
        self.users
            .find(account)
            .await?
            .ok_or_not_found(Resource::Account)
    }

    async fn update_icon(&self, account: &str, icon_path: String) -> AppResult<()> {
        self.modify(account, |user| user.set_icon_path(icon_path)).await
    }

    async fn change_password(&self, account: &str, password: String) -> AppResult<()> {
        self.modify(account, |user| user.set_password(password)).await
    }

    async fn upload_icon(&self, file_name: &str, data: &[u8]) -> AppResult<String> {
        let ext = icon_extension(file_name)?;
        let stored_name = icon_file_name(&ext, Utc::now());

        self.storage.save(&stored_name, data).await
    }
}

/// Lower-cased extension of an uploaded file, if it is an accepted icon format.
pub fn icon_extension(file_name: &str) -> AppResult<String> {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .filter(|ext| is_allowed_icon_extension(ext))
        .ok_or(AppError::UnsupportedMediaType)
}

/// `{epoch seconds}_{random alphanumerics}.{ext}`
pub fn icon_file_name(ext: &str, now: DateTime<Utc>) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(UPLOAD_RANDOM_SUFFIX_LENGTH)
        .map(char::from)
        .collect();

    format!("{}_{}.{}", now.timestamp(), suffix, ext)
}
