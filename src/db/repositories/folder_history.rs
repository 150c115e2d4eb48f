use anyhow::{Context, Result};
use rusqlite::{params, Connection, Row};

use crate::db::{
    helpers::{parse_datetime, parse_status},
    models::{FolderHistory, NewFolderHistory},
    Database,
};

fn row_to_history(row: &Row) -> Result<FolderHistory> {
    let status: String = row.get("status")?;
    let created_at: String = row.get("created_at")?;

    Ok(FolderHistory {
        folder_history_id: row.get("folder_history_id")?,
        folder_id: row.get("folder_id")?,
        parent_folder_id: row.get("parent_folder_id")?,
        tag_id: row.get("tag_id")?,
        folder_name: row.get("folder_name")?,
        user_id: row.get("user_id")?,
        status: parse_status(&status)?,
        created_at: parse_datetime(&created_at, "created_at")?,
    })
}

/// Appends one snapshot. History rows are never updated or removed.
pub fn save(conn: &Connection, history: &NewFolderHistory) -> Result<i64> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO folder_history (folder_id, parent_folder_id, tag_id, folder_name, user_id, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )?;
    stmt.execute(params![
        history.folder_id,
        history.parent_folder_id,
        history.tag_id,
        history.folder_name,
        history.user_id,
        history.status.as_str(),
        history.created_at.to_rfc3339(),
    ])
    .with_context(|| format!("failed to record history for folder {}", history.folder_id))?;

    Ok(conn.last_insert_rowid())
}

pub fn save_all(conn: &Connection, histories: &[NewFolderHistory]) -> Result<()> {
    for history in histories {
        save(conn, history)?;
    }
    Ok(())
}

impl Database {
    /// Audit trail of one folder, oldest first.
    pub async fn list_folder_history(&self, folder_id: i64) -> Result<Vec<FolderHistory>> {
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT folder_history_id, folder_id, parent_folder_id, tag_id, folder_name, user_id, status, created_at
                 FROM folder_history
                 WHERE folder_id = ?1
                 ORDER BY folder_history_id ASC",
            )?;

            let mut rows = stmt.query(params![folder_id])?;
            let mut history = Vec::new();
            while let Some(row) = rows.next()? {
                history.push(row_to_history(row)?);
            }

            Ok(history)
        })
        .await
    }

    /// Total number of snapshots across all folders.
    pub async fn count_folder_history(&self) -> Result<i64> {
        self.execute(|conn| {
            let count = conn.query_row("SELECT COUNT(*) FROM folder_history", [], |row| row.get(0))?;
            Ok(count)
        })
        .await
    }
}
