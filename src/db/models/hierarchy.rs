//! Read-only nested view of a folder tree.

use serde::{Deserialize, Serialize};

use super::{Bookmark, Folder, Tag};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FolderHierarchyDto {
    pub roots: Vec<FolderDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FolderDto {
    pub folder_id: i64,
    pub folder_name: String,
    pub tag: Option<TagDto>,
    pub sub_folders: Vec<FolderDto>,
    pub bookmarks: Vec<BookmarkDto>,
}

impl FolderDto {
    /// A node with no children or bookmarks filled in yet.
    pub fn new(folder: &Folder, tag: Option<Tag>) -> Self {
        Self {
            folder_id: folder.folder_id,
            folder_name: folder.folder_name.clone(),
            tag: tag.map(TagDto::from),
            sub_folders: Vec::new(),
            bookmarks: Vec::new(),
        }
    }

    /// Number of folders in this subtree, this node included.
    pub fn folder_count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            count += 1;
            pending.extend(node.sub_folders.iter());
        }
        count
    }

    /// Number of bookmarks in this subtree.
    pub fn bookmark_count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            count += node.bookmarks.len();
            pending.extend(node.sub_folders.iter());
        }
        count
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TagDto {
    pub tag_id: i64,
    pub tag_name: String,
}

impl From<Tag> for TagDto {
    fn from(tag: Tag) -> Self {
        Self {
            tag_id: tag.tag_id,
            tag_name: tag.tag_name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkDto {
    pub bookmark_id: i64,
    pub bookmark_name: String,
    pub bookmark_url: String,
}

impl From<Bookmark> for BookmarkDto {
    fn from(bookmark: Bookmark) -> Self {
        Self {
            bookmark_id: bookmark.bookmark_id,
            bookmark_name: bookmark.bookmark_name,
            bookmark_url: bookmark.bookmark_url,
        }
    }
}
