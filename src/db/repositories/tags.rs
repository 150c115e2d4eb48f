use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::db::{helpers::parse_datetime, models::Tag, Database};

fn row_to_tag(row: &Row) -> Result<Tag> {
    let created_at: String = row.get("created_at")?;

    Ok(Tag {
        tag_id: row.get("tag_id")?,
        tag_name: row.get("tag_name")?,
        created_at: parse_datetime(&created_at, "created_at")?,
    })
}

/// Live tag with the given id.
pub fn find_by_id(conn: &Connection, tag_id: i64) -> Result<Option<Tag>> {
    let mut stmt = conn.prepare_cached(
        "SELECT tag_id, tag_name, created_at
         FROM tags
         WHERE tag_id = ?1 AND deleted_at IS NULL",
    )?;

    let tag = stmt
        .query_row(params![tag_id], |row| Ok(row_to_tag(row)))
        .optional()?
        .transpose()
        .with_context(|| format!("failed to load tag {tag_id}"))?;

    Ok(tag)
}

impl Database {
    pub async fn create_tag(&self, tag_name: impl Into<String>) -> Result<Tag> {
        let tag_name = tag_name.into();
        self.execute(move |conn| {
            let now = Utc::now();
            conn.execute(
                "INSERT INTO tags (tag_name, created_at) VALUES (?1, ?2)",
                params![tag_name, now.to_rfc3339()],
            )?;

            Ok(Tag {
                tag_id: conn.last_insert_rowid(),
                tag_name,
                created_at: now,
            })
        })
        .await
    }
}
