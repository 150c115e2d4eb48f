use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::db::{
    helpers::{parse_datetime, parse_optional_datetime},
    models::{Bookmark, BookmarkCreateDto},
    Database,
};

fn row_to_bookmark(row: &Row) -> Result<Bookmark> {
    let created_at: String = row.get("created_at")?;
    let updated_at: String = row.get("updated_at")?;
    let deleted_at: Option<String> = row.get("deleted_at")?;

    Ok(Bookmark {
        bookmark_id: row.get("bookmark_id")?,
        folder_id: row.get("folder_id")?,
        user_id: row.get("user_id")?,
        bookmark_name: row.get("bookmark_name")?,
        bookmark_url: row.get("bookmark_url")?,
        created_at: parse_datetime(&created_at, "created_at")?,
        updated_at: parse_datetime(&updated_at, "updated_at")?,
        deleted_at: parse_optional_datetime(deleted_at, "deleted_at")?,
    })
}

/// Live bookmarks of a folder, ordered by id.
pub fn find_active_by_folder(conn: &Connection, folder_id: i64) -> Result<Vec<Bookmark>> {
    let mut stmt = conn.prepare_cached(
        "SELECT bookmark_id, folder_id, user_id, bookmark_name, bookmark_url, created_at, updated_at, deleted_at
         FROM bookmarks
         WHERE folder_id = ?1 AND deleted_at IS NULL
         ORDER BY bookmark_id ASC",
    )?;

    let mut rows = stmt.query(params![folder_id])?;
    let mut bookmarks = Vec::new();
    while let Some(row) = rows.next()? {
        bookmarks.push(row_to_bookmark(row)?);
    }

    Ok(bookmarks)
}

pub fn find_active_by_id(conn: &Connection, bookmark_id: i64) -> Result<Option<Bookmark>> {
    let mut stmt = conn.prepare_cached(
        "SELECT bookmark_id, folder_id, user_id, bookmark_name, bookmark_url, created_at, updated_at, deleted_at
         FROM bookmarks
         WHERE bookmark_id = ?1 AND deleted_at IS NULL",
    )?;

    let bookmark = stmt
        .query_row(params![bookmark_id], |row| Ok(row_to_bookmark(row)))
        .optional()?
        .transpose()
        .with_context(|| format!("failed to load bookmark {bookmark_id}"))?;

    Ok(bookmark)
}

pub fn insert(
    conn: &Connection,
    input: BookmarkCreateDto,
    user_id: i64,
    now: DateTime<Utc>,
) -> Result<Bookmark> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO bookmarks (folder_id, user_id, bookmark_name, bookmark_url, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )?;
    stmt.execute(params![
        input.folder_id,
        user_id,
        input.bookmark_name,
        input.bookmark_url,
        now.to_rfc3339(),
        now.to_rfc3339(),
    ])
    .with_context(|| format!("failed to insert bookmark into folder {}", input.folder_id))?;

    Ok(Bookmark {
        bookmark_id: conn.last_insert_rowid(),
        folder_id: input.folder_id,
        user_id,
        bookmark_name: input.bookmark_name,
        bookmark_url: input.bookmark_url,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    })
}

/// Soft delete. Returns whether a live row was hit.
pub fn soft_delete(conn: &Connection, bookmark_id: i64, now: DateTime<Utc>) -> Result<bool> {
    let mut stmt = conn.prepare_cached(
        "UPDATE bookmarks
         SET deleted_at = ?1, updated_at = ?2
         WHERE bookmark_id = ?3 AND deleted_at IS NULL",
    )?;
    let rows_affected = stmt
        .execute(params![now.to_rfc3339(), now.to_rfc3339(), bookmark_id])
        .with_context(|| format!("failed to delete bookmark {bookmark_id}"))?;

    Ok(rows_affected > 0)
}

impl Database {
    /// Live bookmarks owned by a user across all folders.
    pub async fn count_active_bookmarks(&self, user_id: i64) -> Result<i64> {
        self.execute(move |conn| {
            let count = conn.query_row(
                "SELECT COUNT(*) FROM bookmarks WHERE user_id = ?1 AND deleted_at IS NULL",
                params![user_id],
                |row| row.get(0),
            )?;
            Ok(count)
        })
        .await
    }

    pub async fn list_active_bookmarks(&self, folder_id: i64) -> Result<Vec<Bookmark>> {
        self.execute(move |conn| find_active_by_folder(conn, folder_id))
            .await
    }
}
