//! Article domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{INITIAL_CLICK_COUNT, INITIAL_COMMENT_COUNT};

/// Article record as persisted in the `article` hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Publication time in epoch seconds; doubles as the identifier
    #[schema(example = 1700000000)]
    pub id: i64,
    pub title: String,
    pub content: String,
    pub click_count: i32,
    pub comment_count: i32,
    pub user_account: String,
    #[serde(default)]
    pub img_path: Option<String>,
    #[serde(default)]
    pub is_foreign: bool,
    pub gmt_create: DateTime<Utc>,
}

/// Fields supplied by the author when publishing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArticle {
    pub title: String,
    pub content: String,
    pub user_account: String,
    pub img_path: Option<String>,
    pub is_foreign: bool,
}

impl Article {
    /// Build the stored record for a new article published at `now`.
    ///
    /// Ids have one-second resolution: two articles published within the
    /// same second share an id and the later write replaces the earlier.
    pub fn publish(new: NewArticle, now: DateTime<Utc>) -> Self {
        Self {
            id: now.timestamp(),
            title: new.title.trim().to_string(),
            content: new.content,
            click_count: INITIAL_CLICK_COUNT,
            comment_count: INITIAL_COMMENT_COUNT,
            user_account: new.user_account,
            img_path: new.img_path,
            is_foreign: new.is_foreign,
            gmt_create: now,
        }
    }

    /// Add one to a counter in place.
    pub fn bump(&mut self, counter: ArticleCounter) {
        let value = match counter {
            ArticleCounter::Clicks => &mut self.click_count,
            ArticleCounter::Comments => &mut self.comment_count,
        };
        *value = value.saturating_add(1);
    }
}

/// Counters kept inside the article record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleCounter {
    Clicks,
    Comments,
}

impl ArticleCounter {
    /// JSON field name of the counter in the stored record.
    pub fn field(self) -> &'static str {
        match self {
            ArticleCounter::Clicks => "clickCount",
            ArticleCounter::Comments => "commentCount",
        }
    }
}
