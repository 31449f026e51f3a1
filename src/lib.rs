//! TourWeb - backend for a travel-content site.
//!
//! User accounts, articles, comments and avatar uploads over HTTP, with
//! every record kept in Redis.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Stored records and their pure transformations
//! - **services**: Use cases (registration, publishing, commenting, upload)
//! - **infra**: Redis client, repositories, file storage
//! - **api**: HTTP handlers, extractors and routes
//! - **types**: The `{code, message, data}` result envelope
//! - **errors**: Centralized error handling
//!
//! # Store layout
//!
//! | Key | Type | Content |
//! |---|---|---|
//! | `user` | hash | account → user JSON |
//! | `article` | hash | id → article JSON |
//! | `user_article:{account}` | sorted set | article ids scored by id |
//! | `comment:{articleId}` | list | comment JSON, oldest first |
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve --port 8080
//!
//! # Check Redis connectivity
//! cargo run -- check
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Article, Comment, User};
pub use errors::{AppError, AppResult};
pub use infra::Cache;
