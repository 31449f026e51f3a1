//! Comment domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Comment record as persisted in the `comment:{articleId}` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub content: String,
    pub user_account: String,
    pub article_id: i64,
    pub gmt_create: DateTime<Utc>,
}

/// Fields supplied by the commenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub content: String,
    pub user_account: String,
}

impl Comment {
    pub fn new(article_id: i64, new: NewComment, now: DateTime<Utc>) -> Self {
        Self {
            content: new.content,
            user_account: new.user_account,
            article_id,
            gmt_create: now,
        }
    }
}
