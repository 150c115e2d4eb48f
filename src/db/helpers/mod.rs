use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};

use crate::db::models::FolderStatus;

pub fn parse_datetime(value: &str, field: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("failed to parse {field}"))
}

pub fn parse_optional_datetime(
    value: Option<String>,
    field: &str,
) -> Result<Option<DateTime<Utc>>> {
    match value {
        Some(raw) => parse_datetime(&raw, field).map(Some),
        None => Ok(None),
    }
}

pub fn parse_status(value: &str) -> Result<FolderStatus> {
    match value {
        "ACTIVE" => Ok(FolderStatus::Active),
        "DELETED" => Ok(FolderStatus::Deleted),
        other => Err(anyhow!("unknown folder status {other}")),
    }
}

/// Blank means empty once surrounding whitespace is removed.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
