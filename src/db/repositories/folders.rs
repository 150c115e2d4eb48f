use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension, Params, Row};

use crate::db::{
    helpers::{parse_datetime, parse_status},
    models::{Folder, FolderStatus, NewFolder},
    Database,
};

fn row_to_folder(row: &Row) -> Result<Folder> {
    let status: String = row.get("status")?;
    let created_at: String = row.get("created_at")?;
    let updated_at: String = row.get("updated_at")?;

    Ok(Folder {
        folder_id: row.get("folder_id")?,
        parent_folder_id: row.get("parent_folder_id")?,
        user_id: row.get("user_id")?,
        tag_id: row.get("tag_id")?,
        folder_name: row.get("folder_name")?,
        status: parse_status(&status)?,
        created_at: parse_datetime(&created_at, "created_at")?,
        updated_at: parse_datetime(&updated_at, "updated_at")?,
        updated_by: row.get("updated_by")?,
    })
}

fn query_folders<P: Params>(conn: &Connection, sql: &str, params: P) -> Result<Vec<Folder>> {
    let mut stmt = conn.prepare_cached(sql)?;
    let mut rows = stmt.query(params)?;
    let mut folders = Vec::new();
    while let Some(row) = rows.next()? {
        folders.push(row_to_folder(row)?);
    }
    Ok(folders)
}

/// Active folder with the given id, or `None` if missing or deleted.
pub fn find_active_by_id(conn: &Connection, folder_id: i64) -> Result<Option<Folder>> {
    let mut stmt = conn.prepare_cached(
        "SELECT folder_id, parent_folder_id, user_id, tag_id, folder_name, status, created_at, updated_at, updated_by
         FROM folders
         WHERE folder_id = ?1 AND status = ?2",
    )?;

    let folder = stmt
        .query_row(params![folder_id, FolderStatus::Active.as_str()], |row| {
            Ok(row_to_folder(row))
        })
        .optional()?
        .transpose()
        .with_context(|| format!("failed to load folder {folder_id}"))?;

    Ok(folder)
}

/// Active children of `parent_folder_id`, ordered by id.
pub fn find_active_sub_folders(conn: &Connection, parent_folder_id: i64) -> Result<Vec<Folder>> {
    query_folders(
        conn,
        "SELECT folder_id, parent_folder_id, user_id, tag_id, folder_name, status, created_at, updated_at, updated_by
         FROM folders
         WHERE parent_folder_id = ?1 AND status = ?2
         ORDER BY folder_id ASC",
        params![parent_folder_id, FolderStatus::Active.as_str()],
    )
    .with_context(|| format!("failed to load sub-folders of {parent_folder_id}"))
}

/// Active children of `parent_folder_id` that belong to `user_id`.
pub fn find_by_folder_and_user_id(
    conn: &Connection,
    parent_folder_id: i64,
    user_id: i64,
) -> Result<Vec<Folder>> {
    query_folders(
        conn,
        "SELECT folder_id, parent_folder_id, user_id, tag_id, folder_name, status, created_at, updated_at, updated_by
         FROM folders
         WHERE parent_folder_id = ?1 AND user_id = ?2 AND status = ?3
         ORDER BY folder_id ASC",
        params![parent_folder_id, user_id, FolderStatus::Active.as_str()],
    )
    .with_context(|| format!("failed to load sub-folders of {parent_folder_id} for user {user_id}"))
}

/// Active root folders of `user_id`.
pub fn find_by_user_id_and_folder_is_null(conn: &Connection, user_id: i64) -> Result<Vec<Folder>> {
    query_folders(
        conn,
        "SELECT folder_id, parent_folder_id, user_id, tag_id, folder_name, status, created_at, updated_at, updated_by
         FROM folders
         WHERE user_id = ?1 AND parent_folder_id IS NULL AND status = ?2
         ORDER BY folder_id ASC",
        params![user_id, FolderStatus::Active.as_str()],
    )
    .with_context(|| format!("failed to load root folders for user {user_id}"))
}

pub fn insert(conn: &Connection, folder: NewFolder) -> Result<Folder> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO folders (parent_folder_id, user_id, tag_id, folder_name, status, created_at, updated_at, updated_by)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )?;
    stmt.execute(params![
        folder.parent_folder_id,
        folder.user_id,
        folder.tag_id,
        folder.folder_name,
        FolderStatus::Active.as_str(),
        folder.created_at.to_rfc3339(),
        folder.created_at.to_rfc3339(),
        folder.user_id,
    ])
    .with_context(|| format!("failed to insert folder '{}'", folder.folder_name))?;

    let folder_id = conn.last_insert_rowid();
    Ok(folder.into_folder(folder_id))
}

/// Inserts every folder with one cached statement and returns them in input
/// order with their assigned ids.
pub fn insert_all(conn: &Connection, folders: Vec<NewFolder>) -> Result<Vec<Folder>> {
    let mut saved = Vec::with_capacity(folders.len());
    for folder in folders {
        saved.push(insert(conn, folder)?);
    }
    Ok(saved)
}

/// Writes the mutable columns of an existing folder.
pub fn save(conn: &Connection, folder: &Folder) -> Result<()> {
    let mut stmt = conn.prepare_cached(
        "UPDATE folders
         SET parent_folder_id = ?1,
             tag_id = ?2,
             folder_name = ?3,
             status = ?4,
             updated_at = ?5,
             updated_by = ?6
         WHERE folder_id = ?7",
    )?;
    let rows_affected = stmt
        .execute(params![
            folder.parent_folder_id,
            folder.tag_id,
            folder.folder_name,
            folder.status.as_str(),
            folder.updated_at.to_rfc3339(),
            folder.updated_by,
            folder.folder_id,
        ])
        .with_context(|| format!("failed to update folder {}", folder.folder_id))?;

    if rows_affected == 0 {
        anyhow::bail!("folder {} vanished before update", folder.folder_id);
    }

    Ok(())
}

pub fn save_all(conn: &Connection, folders: &[Folder]) -> Result<()> {
    for folder in folders {
        save(conn, folder)?;
    }
    Ok(())
}

impl Database {
    /// Every folder of a user, deleted ones included, ordered by id.
    pub async fn list_folders_by_user(&self, user_id: i64) -> Result<Vec<Folder>> {
        self.execute(move |conn| {
            query_folders(
                conn,
                "SELECT folder_id, parent_folder_id, user_id, tag_id, folder_name, status, created_at, updated_at, updated_by
                 FROM folders
                 WHERE user_id = ?1
                 ORDER BY folder_id ASC",
                params![user_id],
            )
        })
        .await
    }
}
