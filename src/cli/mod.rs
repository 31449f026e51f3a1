//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `serve` - Start the HTTP server
//! - `check` - Ping the Redis store

pub mod args;

pub use args::{Cli, Commands};
