use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Folder, FolderStatus};

/// Audit snapshot of a folder taken at a create, update or delete.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FolderHistory {
    pub folder_history_id: i64,
    pub folder_id: i64,
    pub parent_folder_id: Option<i64>,
    pub tag_id: Option<i64>,
    pub folder_name: String,
    pub user_id: i64,
    pub status: FolderStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewFolderHistory {
    pub folder_id: i64,
    pub parent_folder_id: Option<i64>,
    pub tag_id: Option<i64>,
    pub folder_name: String,
    pub user_id: i64,
    pub status: FolderStatus,
    pub created_at: DateTime<Utc>,
}

impl NewFolderHistory {
    pub fn create(folder: &Folder, now: DateTime<Utc>) -> Self {
        Self {
            folder_id: folder.folder_id,
            parent_folder_id: folder.parent_folder_id,
            tag_id: folder.tag_id,
            folder_name: folder.folder_name.clone(),
            user_id: folder.user_id,
            status: folder.status,
            created_at: now,
        }
    }
}
