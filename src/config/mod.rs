//! Application configuration module
//!
//! Environment-driven settings plus the constants that define the store
//! key layout, upload rules and envelope codes.

mod constants;
mod settings;

pub use constants::*;
pub use settings::Config;
