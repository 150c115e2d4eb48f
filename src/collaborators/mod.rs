//! Services the folder engine depends on but does not own.
//!
//! Every method takes the caller's connection so that writes land in the same
//! transaction as the folder changes that triggered them.

use rusqlite::Connection;

use crate::{
    db::models::{Bookmark, BookmarkCreateDto, Folder, Tag},
    error::ServiceResult,
};

mod bookmarks;
mod tags;

pub use bookmarks::SqliteBookmarkService;
pub use tags::SqliteTagService;

pub trait TagService: Send + Sync {
    /// Resolves an optional tag id. A missing id or unknown tag yields `None`.
    fn get_tag(&self, conn: &Connection, tag_id: Option<i64>) -> ServiceResult<Option<Tag>>;
}

pub trait BookmarkService: Send + Sync {
    fn find_all_by_folder(&self, conn: &Connection, folder: &Folder) -> ServiceResult<Vec<Bookmark>>;

    fn create_bookmark(
        &self,
        conn: &Connection,
        input: BookmarkCreateDto,
        user_id: i64,
    ) -> ServiceResult<Bookmark>;

    fn delete_bookmark(&self, conn: &Connection, bookmark_id: i64, user_id: i64) -> ServiceResult<()>;
}
