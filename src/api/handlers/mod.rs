//! HTTP request handlers.

pub mod article_handler;
pub mod health_handler;
pub mod user_handler;

pub use article_handler::article_routes;
pub use health_handler::health_check;
pub use user_handler::user_routes;
