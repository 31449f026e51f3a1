//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

// =============================================================================
// Store (Redis)
// =============================================================================

/// Default Redis URL (for development)
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";

/// Hash holding one JSON user record per account
pub const KEY_USER_HASH: &str = "user";

/// Hash holding one JSON article record per article id
pub const KEY_ARTICLE_HASH: &str = "article";

/// Sorted set prefix indexing a user's article ids by creation second
pub const KEY_PREFIX_USER_ARTICLE: &str = "user_article:";

/// List prefix holding an article's comments in insertion order
pub const KEY_PREFIX_COMMENT: &str = "comment:";

/// Key of the per-user article index.
pub fn user_article_key(account: &str) -> String {
    format!("{}{}", KEY_PREFIX_USER_ARTICLE, account)
}

/// Key of the per-article comment list.
pub fn comment_key(article_id: i64) -> String {
    format!("{}{}", KEY_PREFIX_COMMENT, article_id)
}

// =============================================================================
// Icon Upload
// =============================================================================

/// Default directory uploaded icons are written to
pub const DEFAULT_UPLOAD_DIR: &str = "upload";

/// URL prefix uploaded files are served under (and returned to clients)
pub const UPLOAD_URL_PREFIX: &str = "upload";

/// Multipart field carrying the uploaded file
pub const UPLOAD_FIELD_NAME: &str = "file";

/// Accepted icon extensions (compared lower-cased)
pub const ALLOWED_ICON_EXTENSIONS: &[&str] = &["jpg", "gif", "png", "bmp"];

/// Length of the random suffix in generated file names
pub const UPLOAD_RANDOM_SUFFIX_LENGTH: usize = 6;

/// Maximum accepted upload body in bytes (5 MiB)
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Check if a (lower-cased) extension is an accepted icon format
pub fn is_allowed_icon_extension(ext: &str) -> bool {
    ALLOWED_ICON_EXTENSIONS.contains(&ext)
}

// =============================================================================
// Articles
// =============================================================================

/// Click count assigned to a freshly published article
pub const INITIAL_CLICK_COUNT: i32 = 1;

/// Comment count assigned to a freshly published article
pub const INITIAL_COMMENT_COUNT: i32 = 0;

// =============================================================================
// Result Envelope
// =============================================================================

/// Success code
pub const CODE_OK: i32 = 0;

/// Missing record / duplicate record / upload failure
pub const CODE_NOT_FOUND: i32 = 1;

/// Wrong password / store failure
pub const CODE_FAILURE: i32 = 2;

/// Rejected upload format
pub const CODE_UNSUPPORTED_MEDIA: i32 = 3;

/// Malformed request payload
pub const CODE_BAD_REQUEST: i32 = 4;

/// Message carried by successful envelopes
pub const MESSAGE_OK: &str = "success";
