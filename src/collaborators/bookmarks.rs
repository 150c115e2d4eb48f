use chrono::Utc;
use rusqlite::Connection;

use super::BookmarkService;
use crate::{
    db::{
        helpers::is_blank,
        models::{Bookmark, BookmarkCreateDto, Folder},
        repositories::{bookmarks, folders},
    },
    error::{ServiceError, ServiceResult},
    folders::ensure_owner,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteBookmarkService;

impl BookmarkService for SqliteBookmarkService {
    fn find_all_by_folder(&self, conn: &Connection, folder: &Folder) -> ServiceResult<Vec<Bookmark>> {
        Ok(bookmarks::find_active_by_folder(conn, folder.folder_id)?)
    }

    fn create_bookmark(
        &self,
        conn: &Connection,
        input: BookmarkCreateDto,
        user_id: i64,
    ) -> ServiceResult<Bookmark> {
        if is_blank(&input.bookmark_name) {
            return Err(ServiceError::bad_request("bookmark name is required"));
        }
        if is_blank(&input.bookmark_url) {
            return Err(ServiceError::bad_request("bookmark URL is required"));
        }

        let folder = folders::find_active_by_id(conn, input.folder_id)?
            .ok_or_else(|| ServiceError::folder_not_found(input.folder_id))?;
        ensure_owner(folder.user_id, user_id)?;

        Ok(bookmarks::insert(conn, input, user_id, Utc::now())?)
    }

    fn delete_bookmark(&self, conn: &Connection, bookmark_id: i64, user_id: i64) -> ServiceResult<()> {
        let bookmark = bookmarks::find_active_by_id(conn, bookmark_id)?.ok_or_else(|| {
            ServiceError::not_found(format!("bookmark {bookmark_id} does not exist"))
        })?;
        ensure_owner(bookmark.user_id, user_id)?;

        bookmarks::soft_delete(conn, bookmark_id, Utc::now())?;
        Ok(())
    }
}
