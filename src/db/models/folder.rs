//! Folder entity and the inputs that create or change it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Tag;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FolderStatus {
    Active,
    Deleted,
}

impl FolderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FolderStatus::Active => "ACTIVE",
            FolderStatus::Deleted => "DELETED",
        }
    }
}

/// A persisted folder node. `parent_folder_id == None` marks a root.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub folder_id: i64,
    pub parent_folder_id: Option<i64>,
    pub user_id: i64,
    pub tag_id: Option<i64>,
    pub folder_name: String,
    pub status: FolderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<i64>,
}

impl Folder {
    pub fn is_active(&self) -> bool {
        self.status == FolderStatus::Active
    }

    pub fn is_root(&self) -> bool {
        self.parent_folder_id.is_none()
    }

    /// Moves, retags and renames the folder in place. Callers validate the
    /// name and ownership beforehand.
    pub fn update(
        &mut self,
        parent: Option<&Folder>,
        tag: Option<&Tag>,
        folder_name: impl Into<String>,
        actor_user_id: i64,
        now: DateTime<Utc>,
    ) {
        self.parent_folder_id = parent.map(|folder| folder.folder_id);
        self.tag_id = tag.map(|tag| tag.tag_id);
        self.folder_name = folder_name.into();
        self.updated_by = Some(actor_user_id);
        self.updated_at = now;
    }

    /// Soft delete. There is no way back to `Active`.
    pub fn delete(&mut self, actor_user_id: i64, now: DateTime<Utc>) {
        self.status = FolderStatus::Deleted;
        self.updated_by = Some(actor_user_id);
        self.updated_at = now;
    }
}

/// A folder that has not been inserted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFolder {
    pub parent_folder_id: Option<i64>,
    pub user_id: i64,
    pub tag_id: Option<i64>,
    pub folder_name: String,
    pub created_at: DateTime<Utc>,
}

impl NewFolder {
    pub fn new(
        parent: Option<&Folder>,
        user_id: i64,
        tag: Option<&Tag>,
        folder_name: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            parent_folder_id: parent.map(|folder| folder.folder_id),
            user_id,
            tag_id: tag.map(|tag| tag.tag_id),
            folder_name: folder_name.into(),
            created_at: now,
        }
    }

    /// Same name and tag as `source`, owned by `user_id` under `parent`.
    pub fn copy_of(
        source: &Folder,
        parent: Option<&Folder>,
        user_id: i64,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            parent_folder_id: parent.map(|folder| folder.folder_id),
            user_id,
            tag_id: source.tag_id,
            folder_name: source.folder_name.clone(),
            created_at: now,
        }
    }

    pub(crate) fn into_folder(self, folder_id: i64) -> Folder {
        Folder {
            folder_id,
            parent_folder_id: self.parent_folder_id,
            user_id: self.user_id,
            tag_id: self.tag_id,
            folder_name: self.folder_name,
            status: FolderStatus::Active,
            created_at: self.created_at,
            updated_at: self.created_at,
            updated_by: Some(self.user_id),
        }
    }
}

/// One folder in a create batch, or the new state of an updated folder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderUpdateDto {
    #[serde(default)]
    pub parent_folder_id: Option<i64>,
    #[serde(default)]
    pub tag_id: Option<i64>,
    pub folder_name: String,
}

impl FolderUpdateDto {
    pub fn root(folder_name: impl Into<String>) -> Self {
        Self {
            parent_folder_id: None,
            tag_id: None,
            folder_name: folder_name.into(),
        }
    }

    pub fn child(parent_folder_id: i64, folder_name: impl Into<String>) -> Self {
        Self {
            parent_folder_id: Some(parent_folder_id),
            tag_id: None,
            folder_name: folder_name.into(),
        }
    }

    pub fn with_tag(mut self, tag_id: i64) -> Self {
        self.tag_id = Some(tag_id);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoldersCreateDto {
    pub folders: Vec<FolderUpdateDto>,
}
