//! Shared types.

mod response;

pub use response::ApiResult;
