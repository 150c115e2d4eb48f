use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub bookmark_id: i64,
    pub folder_id: i64,
    pub user_id: i64,
    pub bookmark_name: String,
    pub bookmark_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Input for creating a bookmark inside a folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkCreateDto {
    pub folder_id: i64,
    pub bookmark_name: String,
    pub bookmark_url: String,
}

impl BookmarkCreateDto {
    /// Same name and URL as `source`, placed into `folder_id`.
    pub fn copy_of(source: &Bookmark, folder_id: i64) -> Self {
        Self {
            folder_id,
            bookmark_name: source.bookmark_name.clone(),
            bookmark_url: source.bookmark_url.clone(),
        }
    }
}
