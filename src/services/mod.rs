//! Application services layer - Use cases and business logic.
//!
//! Services turn request data into store reads and writes through the
//! repository traits, and report every outcome as an `AppResult`.

mod article_service;
pub mod container;
mod user_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use article_service::{ArticleManager, ArticleService};
pub use user_service::{icon_extension, icon_file_name, UserManager, UserService};
